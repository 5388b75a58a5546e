use crate::error::ApiError;

/// Hash a password with bcrypt. The work factor is CPU-bound, so it runs on
/// the blocking pool instead of an async executor thread.
pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, cost))
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking panic during hash: {}", e);
            ApiError::internal_server_error("Failed to process password")
        })?
        .map_err(|e| {
            tracing::error!("failed to hash password: {}", e);
            ApiError::internal_server_error("Failed to process password")
        })
}

/// Verify a password against a stored bcrypt hash. Mismatches and malformed
/// hashes both report as a failed verification.
pub async fn verify_password(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}
