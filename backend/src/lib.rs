//! Pranata Mangsa dashboard - Backend Server
//!
//! Serves the traditional Javanese farming calendar, current weather and
//! model-backed season predictions to the dashboard.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;

use error::AppResult;
use external::{HttpPolicy, PredictionClient, WeatherClient};
use services::{AuthService, MangsaService, WeatherService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: AuthService,
    pub weather: WeatherClient,
    pub prediction: PredictionClient,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let auth = AuthService::new(&config.jwt, &config.auth)?;
        Self::with_auth(config, auth)
    }

    /// Build state around an existing auth service
    pub fn with_auth(config: Config, auth: AuthService) -> AppResult<Self> {
        let policy = HttpPolicy::from(&config.http);
        let prediction = PredictionClient::new(&config.prediction, policy)?;
        let weather = WeatherClient::new(&config.weather, prediction.base_url(), policy)?;

        Ok(Self {
            config: Arc::new(config),
            auth,
            weather,
            prediction,
        })
    }

    pub fn weather_service(&self) -> WeatherService {
        WeatherService::new(self.weather.clone())
    }

    pub fn mangsa_service(&self) -> MangsaService {
        MangsaService::new(self.weather_service(), self.prediction.clone())
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Pranata Mangsa API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
