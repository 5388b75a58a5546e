use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth;
use crate::database::models::admin::ROLE_SUPERADMIN;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin context attached to the request after token
/// verification. Role and active status come from the live admins row, not
/// the token payload, so a deactivation takes effect on the next request.
#[derive(Clone, Debug)]
pub struct AuthAdmin {
    pub id: Uuid,
    pub role: String,
    pub is_active: bool,
}

/// Bearer-token authentication middleware. Each request is independently
/// re-authenticated; there is no session state.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let claims = auth::decode_token(&state.config.security.jwt_secret, &token).map_err(|e| {
        tracing::debug!("token rejected: {}", e);
        ApiError::unauthorized("Not authorized - Invalid token")
    })?;

    let admin = state
        .admins
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Not authorized - Admin not found"))?;

    if !admin.is_active {
        return Err(ApiError::unauthorized("Admin account is deactivated"));
    }

    request.extensions_mut().insert(AuthAdmin {
        id: admin.id,
        role: admin.role,
        is_active: admin.is_active,
    });

    Ok(next.run(request).await)
}

/// Role gate, layered after [`require_auth`]; never runs standalone.
pub async fn require_superadmin(request: Request, next: Next) -> Result<Response, ApiError> {
    let admin = request
        .extensions()
        .get::<AuthAdmin>()
        .ok_or_else(|| ApiError::unauthorized("Not authorized - No token provided"))?;

    if admin.role != ROLE_SUPERADMIN {
        return Err(ApiError::forbidden(format!(
            "Role '{}' is not authorized to access this route",
            admin.role
        )));
    }

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Not authorized - No token provided"))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Authorization header must use Bearer token format"))?;

    if token.trim().is_empty() {
        return Err(ApiError::unauthorized("Not authorized - No token provided"));
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_rejected() {
        let err = extract_bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn non_bearer_scheme_rejected() {
        assert!(extract_bearer_token(&headers_with("Basic abc123")).is_err());
    }

    #[test]
    fn empty_token_rejected() {
        assert!(extract_bearer_token(&headers_with("Bearer  ")).is_err());
    }

    #[test]
    fn bearer_token_extracted() {
        let token = extract_bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }
}
