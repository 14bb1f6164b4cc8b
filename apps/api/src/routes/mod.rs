pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::search::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Talent search API
        .route(
            "/api/v1/search/talents",
            get(handlers::handle_search_talents),
        )
        .route(
            "/api/v1/search/talents/quick",
            post(handlers::handle_quick_search),
        )
        .route(
            "/api/v1/search/universal",
            get(handlers::handle_universal_search),
        )
        .with_state(state)
}
