pub mod elevated;
pub mod protected;
pub mod public;

use uuid::Uuid;

use crate::error::ApiError;

/// Parse a path identifier, rejecting malformed values inside the standard
/// error envelope instead of the extractor's plain-text rejection.
pub(crate) fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::bad_request("Invalid identifier"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_id_parses() {
        assert!(parse_id("11111111-1111-1111-1111-111111111111").is_ok());
    }

    #[test]
    fn malformed_id_rejected() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
