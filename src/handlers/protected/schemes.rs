use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;

use crate::database::models::scheme::{Scheme, SchemeInput};
use crate::handlers::parse_id;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::query::{ListParams, Pagination, SchemeQuery};
use crate::state::AppState;

/// GET /api/schemes/admin/all - full listing including inactive schemes,
/// with substring search and status/category filters.
pub async fn list_all(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Scheme>> {
    let query = SchemeQuery::admin(&params, &state.config.pagination);
    let (schemes, total) = state.schemes.list_full(&query).await?;

    Ok(ApiResponse::success(schemes).with_pagination(Pagination::new(query.page(), total)))
}

/// POST /api/schemes - create a scheme. Field validation runs before any
/// store call; nothing persists on failure.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<SchemeInput>,
) -> ApiResult<Scheme> {
    input.validate()?;
    let scheme = state.schemes.create(&input).await?;

    Ok(ApiResponse::created(scheme).with_message("Scheme created successfully"))
}

/// PUT /api/schemes/:id - update with the same full validation as create.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SchemeInput>,
) -> ApiResult<Scheme> {
    let id = parse_id(&id)?;
    input.validate()?;
    let scheme = state.schemes.update(id, &input).await?;

    Ok(ApiResponse::success(scheme).with_message("Scheme updated successfully"))
}

/// DELETE /api/schemes/:id - permanent removal; there is no tombstone.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    state.schemes.delete(id).await?;

    Ok(ApiResponse::success(Value::Null).with_message("Scheme deleted successfully"))
}

/// PATCH /api/schemes/:id/toggle - flip the active flag.
pub async fn toggle(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Scheme> {
    let id = parse_id(&id)?;
    let scheme = state.schemes.toggle(id).await?;

    let message = if scheme.is_active {
        "Scheme activated successfully"
    } else {
        "Scheme deactivated successfully"
    };
    Ok(ApiResponse::success(scheme).with_message(message))
}
