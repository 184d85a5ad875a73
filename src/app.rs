use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/profile", post(handlers::submit_profile))
        .route("/slip-up", post(handlers::submit_slip_up))
        .route("/api/metrics", get(handlers::get_metrics))
        .route("/api/milestones", get(handlers::get_milestones))
        .route("/api/timeline", get(handlers::get_timeline))
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route(
            "/api/slip-ups",
            get(handlers::list_slip_ups).post(handlers::create_slip_up),
        )
        .with_state(state)
}
