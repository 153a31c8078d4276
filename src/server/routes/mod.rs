//! REST route modules, one per domain
//!
//! Route handlers only extract and validate arguments, then delegate to the
//! matching command; no domain logic lives here.

pub mod chat_routes;
pub mod document_routes;
pub mod insight_routes;
pub mod task_routes;

use super::state::AppState;
use axum::Router;

/// Assemble the full /api surface
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(task_routes::router())
        .merge(document_routes::router())
        .merge(chat_routes::router())
        .merge(insight_routes::router())
}
