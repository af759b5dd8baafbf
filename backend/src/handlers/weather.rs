//! Weather handlers

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use shared::{DasarianFeatures, GpsCoordinates, LocationInput, WeatherForecast};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::weather::{WeatherFeatures, WeatherReport};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub lat: Decimal,
    pub lon: Decimal,
}

/// Current weather for a location
pub async fn get_current_weather(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(location): Json<LocationInput>,
) -> AppResult<Json<WeatherReport>> {
    let report = state.weather_service().current(&location).await?;
    Ok(Json(report))
}

/// Short-term forecast for a location
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(location): Json<LocationInput>,
) -> AppResult<Json<WeatherForecast>> {
    let forecast = state.weather_service().forecast(&location).await?;
    Ok(Json(forecast))
}

/// Model features built from current weather
pub async fn get_weather_features(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(location): Json<LocationInput>,
) -> AppResult<Json<WeatherFeatures>> {
    let features = state.weather_service().features(&location).await?;
    Ok(Json(features))
}

/// Detailed weather from the prediction backend, unchanged
pub async fn get_weather_detail(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<Value>> {
    let coordinates = GpsCoordinates::new(query.lat, query.lon);
    shared::validate_indonesian_coordinates(&coordinates).map_err(|message| {
        AppError::Validation {
            field: "lat,lon".to_string(),
            message: message.to_string(),
            message_ind: "Koordinat di luar wilayah Indonesia".to_string(),
        }
    })?;

    let detail = state
        .weather
        .get_weather_detail(coordinates.latitude, coordinates.longitude)
        .await?;
    Ok(Json(detail))
}

/// Ten-day aggregates used as model input
pub async fn get_dasarian_features(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(location): Json<LocationInput>,
) -> AppResult<Json<DasarianFeatures>> {
    let location = location.resolve()?;
    let features = state
        .weather
        .get_dasarian_features(&location.coordinates)
        .await?;
    Ok(Json(features))
}
