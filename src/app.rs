use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/session", get(handlers::session))
        .route("/api/day/today", get(handlers::get_today))
        .route("/api/day/:date", get(handlers::get_day).put(handlers::save_day))
        .route("/api/day/:date/meals", post(handlers::add_day_meal))
        .route("/api/day/:date/meals/:meal_id", delete(handlers::remove_day_meal))
        .route("/api/goals", get(handlers::get_goals).put(handlers::save_goals))
        .route("/api/share", post(handlers::share_today))
        .route("/api/coach/clients", get(handlers::coach_overview))
        .with_state(state)
}
