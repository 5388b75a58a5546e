use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::password;
use crate::database::models::admin::{Admin, MIN_PASSWORD_LEN};
use crate::error::ApiError;
use crate::middleware::auth::AuthAdmin;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/admin/profile - the acting admin's public fields, read fresh
/// from the store.
pub async fn profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthAdmin>,
) -> ApiResult<Admin> {
    let admin = state
        .admins
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Admin not found"))?;

    Ok(ApiResponse::success(admin))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

/// PUT /api/admin/password - change the acting admin's password after
/// re-verifying the current one.
pub async fn update_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthAdmin>,
    Json(request): Json<PasswordChangeRequest>,
) -> ApiResult<Value> {
    if request.current_password.is_empty() || request.new_password.is_empty() {
        return Err(ApiError::bad_request(
            "Please provide current and new password",
        ));
    }
    if request.new_password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let admin = state
        .admins
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Admin not found"))?;

    if !password::verify_password(request.current_password, admin.password_hash.clone()).await {
        return Err(ApiError::unauthorized("Current password is incorrect"));
    }

    let hash = password::hash_password(request.new_password, state.config.security.bcrypt_cost)
        .await?;
    state.admins.update_password(admin.id, &hash).await?;

    Ok(ApiResponse::success(Value::Null).with_message("Password updated successfully"))
}
