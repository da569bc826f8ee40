use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

pub mod health;

/// API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: true,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(_code: i32, message: impl Into<String>) -> Self {
        Self {
            code: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_msg(message: impl Into<String>) -> Self {
        Self {
            code: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Hierarchy routes
        .route("/hierarchy/query", get(handlers::hierarchy::query_tree))
        .route("/hierarchy/delete", post(handlers::hierarchy::cascade_delete))
        .route(
            "/hierarchy/delete/preview",
            get(handlers::hierarchy::delete_preview),
        )
        .route("/hierarchy/batch/create", post(handlers::hierarchy::batch_create))
        .route("/hierarchy/batch/update", post(handlers::hierarchy::batch_update))
        .route(
            "/hierarchy/student/migrate",
            post(handlers::hierarchy::migrate_students),
        )
        .route(
            "/hierarchy/consistency/check",
            get(handlers::hierarchy::check_consistency),
        )
        // Subject integrity
        .route("/subject/validate", get(handlers::hierarchy::validate_subjects))
        // Operation log routes
        .route("/oplog/query", get(handlers::oplog::query_oplog))
        .route("/oplog/delete", post(handlers::oplog::delete_oplog));

    Router::new()
        .nest("/api", api_routes)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for 404
pub async fn fallback() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(404, "Not Found")),
    )
}
