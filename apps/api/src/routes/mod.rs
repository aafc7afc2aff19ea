pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::errors::handle_panic;
use crate::matchmaking::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_handler))
        // Simulation API
        .route("/api/v1/simulate", post(handlers::handle_simulate))
        .route("/api/v1/simulate/form", post(handlers::handle_simulate_form))
        .route("/api/v1/invoke", post(handlers::handle_invoke))
        .with_state(state);

    with_response_layers(router)
}

/// Any-origin CORS on every response, and panics converted to the JSON error shape.
fn with_response_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
}
