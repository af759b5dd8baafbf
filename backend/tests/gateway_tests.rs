//! Weather and prediction gateway tests
//!
//! Each test runs the real clients against an in-process stub upstream:
//! - Response mapping for current weather, forecast and weather-data
//! - Retry of transient failures, no retry of client errors
//! - Prediction request/response shapes

mod common;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use std::time::{Duration, Instant};

use common::*;
use pranata_mangsa_backend::error::AppError;
use pranata_mangsa_backend::external::{HttpPolicy, PredictionClient, WeatherClient};
use shared::{FeatureVector, GpsCoordinates, WeatherCondition};

fn gresik() -> GpsCoordinates {
    GpsCoordinates::new(
        Decimal::from_str("-7.1621").unwrap(),
        Decimal::from_str("112.6526").unwrap(),
    )
}

fn clients(base_url: &str) -> (WeatherClient, PredictionClient) {
    let config = test_config(base_url);
    let policy = HttpPolicy::from(&config.http);
    let prediction = PredictionClient::new(&config.prediction, policy).unwrap();
    let weather = WeatherClient::new(&config.weather, prediction.base_url(), policy).unwrap();
    (weather, prediction)
}

// ============================================================================
// Weather gateway
// ============================================================================

mod weather_gateway {
    use super::*;

    #[tokio::test]
    async fn test_current_weather_is_mapped() {
        let base = spawn_stub(healthy_upstream(json!(5))).await;
        let (weather, _) = clients(&base);

        let observation = weather.get_current_weather(&gresik()).await.unwrap();
        assert_eq!(observation.condition, "Clouds");
        assert_eq!(observation.humidity_percent, 80);
        assert_eq!(observation.wind_direction_deg, 120);
        assert_eq!(observation.rain_volume_mm(), 0.0);
    }

    #[tokio::test]
    async fn test_forecast_keeps_five_entries() {
        let base = spawn_stub(healthy_upstream(json!(5))).await;
        let (weather, _) = clients(&base);

        let forecast = weather.get_forecast(&gresik()).await.unwrap();
        assert_eq!(forecast.entries.len(), 5);
        assert!(forecast
            .entries
            .iter()
            .all(|e| e.condition == WeatherCondition::Rainy));
        assert_eq!(forecast.location, gresik());
    }

    #[tokio::test]
    async fn test_weather_data_passthrough_and_dasarian() {
        let base = spawn_stub(healthy_upstream(json!(5))).await;
        let (weather, _) = clients(&base);

        let coords = gresik();
        let detail = weather
            .get_weather_detail(coords.latitude, coords.longitude)
            .await
            .unwrap();
        assert_eq!(detail["location"]["name"], "Gresik");

        let dasarian = weather.get_dasarian_features(&coords).await.unwrap();
        assert_eq!(dasarian.total_rainfall, 112.5);
        assert_eq!(dasarian.avg_wind_direction, 135.0);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let mut config = test_config(UNREACHABLE);
        config.weather.api_key = String::new();
        let policy = HttpPolicy::from(&config.http);
        let weather = WeatherClient::new(&config.weather, UNREACHABLE, policy).unwrap();

        let result = weather.get_current_weather(&gresik()).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_unavailable() {
        let (weather, _) = clients(UNREACHABLE);
        let result = weather.get_current_weather(&gresik()).await;
        assert!(matches!(result, Err(AppError::WeatherServiceUnavailable(_))));
    }
}

// ============================================================================
// Retry policy
// ============================================================================

mod retry_policy {
    use super::*;

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let hits = Hits::default();
        let base = spawn_stub(flaky_upstream(
            StatusCode::SERVICE_UNAVAILABLE,
            2,
            hits.clone(),
        ))
        .await;
        let (weather, _) = clients(&base);

        // max_retries = 2, so the third attempt succeeds
        let observation = weather.get_current_weather(&gresik()).await.unwrap();
        assert_eq!(observation.condition, "Rain");
        assert_eq!(hits.count(), 3);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let hits = Hits::default();
        let base = spawn_stub(flaky_upstream(
            StatusCode::INTERNAL_SERVER_ERROR,
            10,
            hits.clone(),
        ))
        .await;
        let (weather, _) = clients(&base);

        let result = weather.get_current_weather(&gresik()).await;
        assert!(matches!(result, Err(AppError::WeatherServiceUnavailable(_))));
        assert_eq!(hits.count(), 3);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let hits = Hits::default();
        let base = spawn_stub(flaky_upstream(StatusCode::UNAUTHORIZED, 10, hits.clone())).await;
        let (weather, _) = clients(&base);

        let result = weather.get_current_weather(&gresik()).await;
        assert!(matches!(result, Err(AppError::ExternalService(_))));
        assert_eq!(hits.count(), 1);
    }
}

// ============================================================================
// Prediction gateway
// ============================================================================

mod prediction_gateway {
    use super::*;

    #[tokio::test]
    async fn test_predict_returns_raw_value() {
        let base = spawn_stub(healthy_upstream(json!(9))).await;
        let (_, prediction) = clients(&base);

        let value = prediction
            .predict(&FeatureVector::default_features())
            .await
            .unwrap();
        assert_eq!(value, json!(9));
    }

    #[tokio::test]
    async fn test_predict_passes_through_odd_values() {
        let base = spawn_stub(healthy_upstream(json!("tidak tahu"))).await;
        let (_, prediction) = clients(&base);

        let value = prediction
            .predict(&FeatureVector::default_features())
            .await
            .unwrap();
        assert_eq!(value, json!("tidak tahu"));
    }

    #[tokio::test]
    async fn test_invalid_features_never_leave_the_server() {
        let (_, prediction) = clients(UNREACHABLE);
        let mut features = FeatureVector::default_features();
        features.humidity = 140.0;

        let result = prediction.predict(&features).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_predict_live_prefers_model_answer() {
        let base = spawn_stub(healthy_upstream(json!(3))).await;
        let (_, prediction) = clients(&base);

        let live = prediction.predict_live(Some(&gresik())).await.unwrap();
        assert_eq!(live.prediction, json!(3));
        assert_eq!(live.prediction_by_date, json!(1));
    }

    #[tokio::test]
    async fn test_slow_prediction_service_times_out() {
        let hits = Hits::default();
        let base = spawn_stub(slow_prediction_upstream(Duration::from_secs(5), hits.clone())).await;
        let config = impatient_config(&base);
        let prediction =
            PredictionClient::new(&config.prediction, HttpPolicy::from(&config.http)).unwrap();

        let started = Instant::now();
        let result = prediction.predict(&FeatureVector::default_features()).await;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(matches!(
            result,
            Err(AppError::PredictionServiceUnavailable(_))
        ));
        // a timeout counts as transient and is retried once
        assert_eq!(hits.count(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_prediction_service() {
        let (_, prediction) = clients(UNREACHABLE);
        let result = prediction.predict(&FeatureVector::default_features()).await;
        assert!(matches!(
            result,
            Err(AppError::PredictionServiceUnavailable(_))
        ));
    }
}
