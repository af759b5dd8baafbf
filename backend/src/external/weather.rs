//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap for current conditions and the short-term
//! forecast, and with the prediction backend's `/weather-data` endpoint for
//! the ten-day aggregates.

use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use shared::{
    DasarianFeatures, ForecastEntry, GpsCoordinates, Observation, WeatherCondition,
    WeatherForecast,
};

use super::{read_json, send_with_retry, GatewayError, HttpPolicy};
use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Number of 3-hourly forecast entries shown on the dashboard
pub const FORECAST_ENTRIES: usize = 5;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    policy: HttpPolicy,
    api_key: String,
    base_url: String,
    language: String,
    proxy_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
    deg: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    weather: Vec<OWMWeather>,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

/// The part of the `/weather-data` body this server reads
#[derive(Debug, Deserialize)]
struct WeatherDataResponse {
    dasarian_features: DasarianFeatures,
}

fn weather_error(e: GatewayError) -> AppError {
    if e.is_transient() {
        AppError::WeatherServiceUnavailable(e.to_string())
    } else {
        AppError::ExternalService(format!("Weather API: {}", e))
    }
}

impl WeatherClient {
    /// Create a client from configuration. `proxy_fallback` is used for
    /// `/weather-data` when no dedicated proxy URL is configured.
    pub fn new(config: &WeatherConfig, proxy_fallback: &str, policy: HttpPolicy) -> AppResult<Self> {
        let client = policy
            .client()
            .map_err(|e| AppError::Configuration(format!("weather HTTP client: {}", e)))?;

        Ok(Self {
            client,
            policy,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            proxy_url: config
                .backend_proxy_url
                .as_deref()
                .unwrap_or(proxy_fallback)
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn require_api_key(&self) -> AppResult<()> {
        if self.api_key.is_empty() {
            return Err(AppError::Configuration(
                "weather.api_key is not set".to_string(),
            ));
        }
        Ok(())
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(&self, location: &GpsCoordinates) -> AppResult<Observation> {
        self.require_api_key()?;
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric&lang={}",
            self.base_url, location.latitude, location.longitude, self.api_key, self.language
        );
        tracing::debug!(
            "Fetching weather for coordinates: {}, {}",
            location.latitude,
            location.longitude
        );

        let response = send_with_retry(&self.policy, "weather API", || self.client.get(&url))
            .await
            .map_err(weather_error)?;
        let data: OWMCurrentResponse = read_json(response).await.map_err(weather_error)?;

        Ok(convert_current_response(data))
    }

    /// Fetch the first few 3-hourly forecast entries by GPS coordinates
    pub async fn get_forecast(&self, location: &GpsCoordinates) -> AppResult<WeatherForecast> {
        self.require_api_key()?;
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric&lang={}",
            self.base_url, location.latitude, location.longitude, self.api_key, self.language
        );
        tracing::debug!(
            "Fetching forecast for coordinates: {}, {}",
            location.latitude,
            location.longitude
        );

        let response = send_with_retry(&self.policy, "forecast API", || self.client.get(&url))
            .await
            .map_err(weather_error)?;
        let data: OWMForecastResponse = read_json(response).await.map_err(weather_error)?;

        Ok(WeatherForecast {
            location: location.clone(),
            entries: convert_forecast_response(data),
        })
    }

    /// Detailed weather from the prediction backend, passed through as-is
    pub async fn get_weather_detail(&self, latitude: Decimal, longitude: Decimal) -> AppResult<Value> {
        let url = format!(
            "{}/weather-data?lat={}&lon={}",
            self.proxy_url, latitude, longitude
        );
        tracing::debug!("Fetching weather data from backend: {}", url);

        let response = send_with_retry(&self.policy, "weather-data", || self.client.get(&url))
            .await
            .map_err(weather_error)?;
        read_json(response).await.map_err(weather_error)
    }

    /// Ten-day aggregates for a location
    pub async fn get_dasarian_features(
        &self,
        location: &GpsCoordinates,
    ) -> AppResult<DasarianFeatures> {
        let detail = self
            .get_weather_detail(location.latitude, location.longitude)
            .await?;
        let data: WeatherDataResponse = serde_json::from_value(detail).map_err(|e| {
            AppError::ExternalService(format!("weather-data has no dasarian features: {}", e))
        })?;
        Ok(data.dasarian_features)
    }
}

fn rain_of(rain: Option<&OWMRain>) -> (Option<f64>, Option<f64>) {
    rain.map(|r| (r.one_hour, r.three_hour)).unwrap_or((None, None))
}

/// Convert OpenWeatherMap current response to an observation
fn convert_current_response(data: OWMCurrentResponse) -> Observation {
    let weather = data.weather.first();
    let (rain_1h_mm, rain_3h_mm) = rain_of(data.rain.as_ref());

    Observation {
        temperature_celsius: data.main.temp,
        feels_like_celsius: data.main.feels_like,
        humidity_percent: data.main.humidity,
        wind_speed_mps: data.wind.speed,
        wind_direction_deg: data.wind.deg.unwrap_or(0),
        condition: weather.map(|w| w.main.clone()).unwrap_or_default(),
        description: weather.map(|w| w.description.clone()).unwrap_or_default(),
        rain_1h_mm,
        rain_3h_mm,
    }
}

/// Convert OpenWeatherMap forecast response to dashboard entries
fn convert_forecast_response(data: OWMForecastResponse) -> Vec<ForecastEntry> {
    data.list
        .into_iter()
        .take(FORECAST_ENTRIES)
        .map(|item| {
            let weather = item.weather.first();
            let (_, rain_3h) = rain_of(item.rain.as_ref());
            ForecastEntry {
                timestamp: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
                temperature: item.main.temp.round() as i32,
                condition: WeatherCondition::from_provider(
                    weather.map(|w| w.main.as_str()).unwrap_or_default(),
                ),
                description: weather.map(|w| w.description.clone()).unwrap_or_default(),
                humidity: item.main.humidity,
                wind_speed_kmh: shared::mps_to_kmh(item.wind.speed),
                rainfall_mm: rain_3h.unwrap_or(0.0),
            }
        })
        .collect()
}
