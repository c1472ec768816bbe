use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/markets", get(handlers::markets))
        .route("/markets/{slug}", get(handlers::market))
        .route("/markets/{slug}/activity", get(handlers::activity))
        .route("/markets/{slug}/holders", get(handlers::holders))
        .route("/ranking/holders", get(handlers::holders_ranking))
        .route("/ranking/traders", get(handlers::traders_ranking))
        .route("/ranking/winners", get(handlers::winners_ranking));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
