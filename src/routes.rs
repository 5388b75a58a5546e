use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get, patch, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{elevated, protected, public};
use crate::middleware::auth::{require_auth, require_superadmin};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_scheme_routes())
        .merge(admin_auth_routes(state.clone()))
        .merge(admin_scheme_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Public catalog: browse, search, detail (view-counting), aggregates.
fn public_scheme_routes() -> Router<AppState> {
    Router::new()
        .route("/api/schemes", get(public::schemes::list))
        .route("/api/schemes/categories", get(public::schemes::categories))
        .route("/api/schemes/stats", get(public::schemes::stats))
        .route("/api/schemes/:id", get(public::schemes::show))
}

/// Admin account routes: public setup/login, bearer-protected profile and
/// password, superadmin-only account management.
fn admin_auth_routes(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/api/admin/setup", post(public::auth::setup))
        .route("/api/admin/login", post(public::auth::login));

    let protected_routes = Router::new()
        .route("/api/admin/profile", get(protected::auth::profile))
        .route("/api/admin/password", put(protected::auth::update_password))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let elevated_routes = Router::new()
        .route("/api/admin/register", post(elevated::admins::register))
        .route("/api/admin/all", get(elevated::admins::list))
        .route("/api/admin/:id/toggle", patch(elevated::admins::toggle))
        .route("/api/admin/:id", delete(elevated::admins::delete))
        .layer(middleware::from_fn(require_superadmin))
        .layer(middleware::from_fn_with_state(state, require_auth));

    public_routes.merge(protected_routes).merge(elevated_routes)
}

/// Scheme management: any active admin.
fn admin_scheme_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/schemes/admin/all", get(protected::schemes::list_all))
        .route("/api/schemes", post(protected::schemes::create))
        .route("/api/schemes/:id", put(protected::schemes::update))
        .route("/api/schemes/:id", delete(protected::schemes::delete))
        .route("/api/schemes/:id/toggle", patch(protected::schemes::toggle))
        .layer(middleware::from_fn_with_state(state, require_auth))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "AgriSchemes API",
            "version": version,
            "description": "Catalog of Indian government agricultural schemes",
            "endpoints": {
                "schemes": "/api/schemes[/:id] (public)",
                "categories": "/api/schemes/categories (public)",
                "stats": "/api/schemes/stats (public)",
                "admin_auth": "/api/admin/setup, /api/admin/login (public - token acquisition)",
                "admin_account": "/api/admin/profile, /api/admin/password (bearer)",
                "admin_management": "/api/admin/* (bearer, superadmin)",
                "scheme_management": "/api/schemes[/:id] POST/PUT/DELETE, /api/schemes/admin/all (bearer)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "message": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
