//! Route definitions for the Pranata Mangsa server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes
        .nest("/auth", auth_routes(state.clone()))
        // Location catalog (public, needed before login)
        .route("/locations", get(handlers::list_locations))
        // Protected routes - calendar and predictions
        .nest("/mangsa", mangsa_routes(state.clone()))
        // Protected routes - weather
        .nest("/weather", weather_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::me).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
        .route("/login", post(handlers::login))
}

/// Calendar and prediction routes (protected)
fn mangsa_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_mangsa))
        .route("/current", get(handlers::get_current_mangsa))
        .route("/season/:kind", get(handlers::list_mangsa_by_season))
        .route("/reconcile", post(handlers::reconcile_mangsa))
        .route("/predict", post(handlers::predict_mangsa))
        .route("/compare", post(handlers::compare_mangsa))
        .route("/:mangsa_id", get(handlers::get_mangsa))
        .route("/:mangsa_id/neighbors", get(handlers::get_mangsa_neighbors))
        .route("/:mangsa_id/reminders", get(handlers::get_mangsa_reminders))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Weather routes (protected)
fn weather_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/current", post(handlers::get_current_weather))
        .route("/forecast", post(handlers::get_weather_forecast))
        .route("/features", post(handlers::get_weather_features))
        .route("/dasarian", post(handlers::get_dasarian_features))
        .route("/detail", get(handlers::get_weather_detail))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
