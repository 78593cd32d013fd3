use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use super::handlers::{expenses, predefined, salaries, system};
use super::{panic_response, AppState};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/api/health", get(system::health))
        .nest("/api/expenses", expense_routes())
        .nest("/api/salaries", salary_routes())
        .nest("/api/predefined-expenses", predefined_routes())
        .fallback(system::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(expenses::list).post(expenses::create))
        .route("/month/:month", get(expenses::by_month))
        .route(
            "/:id",
            get(expenses::get).put(expenses::update).delete(expenses::delete),
        )
}

fn salary_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(salaries::list).post(salaries::upsert))
        .route(
            "/:month",
            get(salaries::get).put(salaries::update).delete(salaries::delete),
        )
}

// Static `/apply/all` wins over `/apply/:month` in axum's matcher.
fn predefined_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(predefined::list).post(predefined::create))
        .route("/apply/all", post(predefined::apply_range))
        .route("/apply/:month", post(predefined::apply_month))
        .route(
            "/:id",
            get(predefined::get)
                .put(predefined::update)
                .delete(predefined::delete),
        )
}
