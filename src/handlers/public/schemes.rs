use axum::extract::{Path, Query, State};

use crate::database::models::scheme::{CategoryCount, Scheme, SchemeSummary};
use crate::database::scheme_store::SchemeStats;
use crate::handlers::parse_id;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::query::{ListParams, Pagination, SchemeQuery};
use crate::state::AppState;

/// GET /api/schemes - paginated listing of active schemes with search,
/// category/state/ministry filters, and caller-selected sort.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<SchemeSummary>> {
    let query = SchemeQuery::public(&params, &state.config.pagination);
    let (schemes, total) = state.schemes.list_summaries(&query).await?;

    Ok(ApiResponse::success(schemes).with_pagination(Pagination::new(query.page(), total)))
}

/// GET /api/schemes/:id - scheme detail. The read increments the view
/// counter; fetching twice yields two increments by design.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Scheme> {
    let id = parse_id(&id)?;
    let scheme = state.schemes.fetch_counting_view(id).await?;
    Ok(ApiResponse::success(scheme))
}

/// GET /api/schemes/categories - active categories with scheme counts.
pub async fn categories(State(state): State<AppState>) -> ApiResult<Vec<CategoryCount>> {
    let categories = state.schemes.categories().await?;
    Ok(ApiResponse::success(categories))
}

/// GET /api/schemes/stats - dashboard aggregates: totals, per-category and
/// per-state breakdowns, most viewed, recently added.
pub async fn stats(State(state): State<AppState>) -> ApiResult<SchemeStats> {
    let stats = state.schemes.stats().await?;
    Ok(ApiResponse::success(stats))
}
