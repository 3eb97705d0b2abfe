use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/add", get(handlers::add_drill_form).post(handlers::add_drill))
        .route("/complete", post(handlers::complete))
        .with_state(state)
}
