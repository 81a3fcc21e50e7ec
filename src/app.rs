use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::add_task))
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/api/tasks/:id/notes", put(handlers::update_notes))
        .route(
            "/api/tasks/:id/image",
            post(handlers::attach_image).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/stock", get(handlers::get_stock).post(handlers::create_stock_item))
        .route("/api/stock/chart", get(handlers::get_stock_chart))
        .route("/api/stock/:id/movements", post(handlers::record_movement))
        .route("/api/stock/:id/sales", post(handlers::record_sale))
        .route("/api/flocks", get(handlers::list_flocks).post(handlers::add_flock))
        .route("/api/flocks/overview", get(handlers::get_flock_overview))
        .route("/api/flocks/:id/logs", post(handlers::append_daily_log))
        .route("/api/export", get(handlers::export))
        .with_state(state)
}
