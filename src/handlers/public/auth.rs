use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_token, password};
use crate::database::models::admin::{AdminInput, ROLE_SUPERADMIN};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/admin/setup - create the first superadmin. Permitted only
/// while the admins table is empty; afterwards it always rejects.
pub async fn setup(
    State(state): State<AppState>,
    Json(input): Json<AdminInput>,
) -> ApiResult<Value> {
    if state.admins.count().await? > 0 {
        return Err(ApiError::bad_request(
            "Setup already completed. Admins already exist.",
        ));
    }

    input
        .validate()
        .map_err(|fields| {
            ApiError::validation_error("Please provide username, email, and password", Some(fields))
        })?;

    let hash = password::hash_password(input.password.clone(), state.config.security.bcrypt_cost)
        .await?;
    let admin = state
        .admins
        .create(
            input.username.trim(),
            input.email.trim(),
            &hash,
            ROLE_SUPERADMIN,
        )
        .await?;

    let token = generate_token(
        &state.config.security.jwt_secret,
        admin.id,
        state.config.security.jwt_expiry_days,
    )?;

    tracing::info!("superadmin created via setup: {}", admin.username);

    Ok(ApiResponse::created(json!({
        "id": admin.id,
        "username": admin.username,
        "email": admin.email,
        "role": admin.role,
        "token": token,
    }))
    .with_message("Super admin created successfully"))
}

/// POST /api/admin/login - authenticate an admin and issue a bearer token.
/// Unknown email, wrong password, and deactivated accounts all reject with
/// 401 and no token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Value> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Please provide email and password"));
    }

    let admin = state
        .admins
        .find_by_email(request.email.trim())
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !admin.is_active {
        return Err(ApiError::unauthorized("Admin account is deactivated"));
    }

    if !password::verify_password(request.password, admin.password_hash.clone()).await {
        tracing::warn!("failed login attempt for {}", admin.email);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    state.admins.touch_last_login(admin.id).await?;

    let token = generate_token(
        &state.config.security.jwt_secret,
        admin.id,
        state.config.security.jwt_expiry_days,
    )?;

    Ok(ApiResponse::success(json!({
        "id": admin.id,
        "username": admin.username,
        "email": admin.email,
        "role": admin.role,
        "token": token,
    }))
    .with_message("Login successful"))
}
