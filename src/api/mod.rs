use crate::state::AppState;
use axum::Router;
use axum::routing::{get, put};
use std::sync::{Arc, RwLock};

pub mod handlers;
pub mod responses;

pub fn router(state: Arc<RwLock<AppState>>) -> Router {
    Router::new()
        .route("/api/bedtime", get(handlers::get_bedtime))
        .route("/api/inputs", put(handlers::put_inputs))
        .route("/api/options", get(handlers::get_options))
        .route("/api/health", get(handlers::get_health))
        .with_state(state)
}
