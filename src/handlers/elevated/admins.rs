use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::auth::password;
use crate::database::models::admin::{Admin, AdminInput};
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::middleware::auth::AuthAdmin;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/admin/register - create another admin account. Superadmin
/// only; duplicate username or email rejects before anything persists.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<AdminInput>,
) -> ApiResult<Value> {
    input
        .validate()
        .map_err(|fields| ApiError::validation_error("Admin validation failed", Some(fields)))?;

    let hash = password::hash_password(input.password.clone(), state.config.security.bcrypt_cost)
        .await?;
    let admin = state
        .admins
        .create(
            input.username.trim(),
            input.email.trim(),
            &hash,
            input.role_or_default(),
        )
        .await?;

    Ok(ApiResponse::created(json!({
        "id": admin.id,
        "username": admin.username,
        "email": admin.email,
        "role": admin.role,
    }))
    .with_message("Admin registered successfully"))
}

/// GET /api/admin/all - every admin account; hashes never serialize.
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Admin>> {
    let admins = state.admins.list().await?;
    Ok(ApiResponse::success(admins))
}

/// PATCH /api/admin/:id/toggle - flip another admin's active flag. The
/// self-target check runs before the mutating store call.
pub async fn toggle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthAdmin>,
    Path(id): Path<String>,
) -> ApiResult<Admin> {
    let id = parse_id(&id)?;
    if id == auth.id {
        return Err(ApiError::bad_request("Cannot deactivate your own account"));
    }

    let admin = state.admins.toggle(id).await?;

    let message = if admin.is_active {
        "Admin activated successfully"
    } else {
        "Admin deactivated successfully"
    };
    Ok(ApiResponse::success(admin).with_message(message))
}

/// DELETE /api/admin/:id - permanently remove another admin account.
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthAdmin>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    if id == auth.id {
        return Err(ApiError::bad_request("Cannot delete your own account"));
    }

    state.admins.delete(id).await?;

    Ok(ApiResponse::success(Value::Null).with_message("Admin deleted successfully"))
}
