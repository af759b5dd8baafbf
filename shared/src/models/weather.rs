//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// Dashboard weather category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
}

impl WeatherCondition {
    /// Map a provider condition ("Rain", "Clouds", "Thunderstorm", ...) onto a
    /// category. Keywords are checked in order: rain/drizzle, cloud,
    /// thunderstorm, clear. Anything else is sunny.
    pub fn from_provider(main: &str) -> Self {
        let main = main.to_lowercase();
        if main.contains("rain") || main.contains("drizzle") {
            WeatherCondition::Rainy
        } else if main.contains("cloud") {
            WeatherCondition::Cloudy
        } else if main.contains("thunderstorm") {
            WeatherCondition::Stormy
        } else {
            WeatherCondition::Sunny
        }
    }
}

/// Raw provider reading before it is shaped for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub temperature_celsius: f64,
    pub feels_like_celsius: f64,
    pub humidity_percent: i32,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: i32,
    /// Provider's main condition, e.g. "Thunderstorm"
    pub condition: String,
    pub description: String,
    pub rain_1h_mm: Option<f64>,
    pub rain_3h_mm: Option<f64>,
}

impl Observation {
    /// One-hour volume when reported, otherwise three-hour, otherwise zero
    pub fn rain_volume_mm(&self) -> f64 {
        self.rain_1h_mm.or(self.rain_3h_mm).unwrap_or(0.0)
    }
}

/// Rain intensity per part of the day, 0-100
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RainfallBreakdown {
    pub morning: u32,
    pub afternoon: u32,
    pub night: u32,
}

impl RainfallBreakdown {
    pub fn from_rain_volume(volume_mm: f64) -> Self {
        if !(volume_mm > 0.0) {
            return Self::default();
        }
        let scale = |factor: f64| (volume_mm * factor).round().min(100.0) as u32;
        Self {
            morning: scale(10.0),
            afternoon: scale(15.0),
            night: scale(8.0),
        }
    }

    pub fn average(&self) -> f64 {
        (self.morning + self.afternoon + self.night) as f64 / 3.0
    }
}

/// Conditions that raise a farmer-facing warning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherAlertType {
    Thunderstorm,
    ExtremeHeat,
    StrongWind,
    HeavyRain,
}

impl WeatherAlertType {
    pub const HEAT_THRESHOLD_CELSIUS: f64 = 35.0;
    pub const WIND_THRESHOLD_MPS: f64 = 10.0;
    pub const HEAVY_RAIN_THRESHOLD_MM: f64 = 10.0;

    pub fn message(&self) -> &'static str {
        match self {
            WeatherAlertType::Thunderstorm => {
                "Peringatan badai petir - hindari aktivitas di luar ruangan"
            }
            WeatherAlertType::ExtremeHeat => {
                "Suhu sangat tinggi - pastikan tanaman mendapat cukup air"
            }
            WeatherAlertType::StrongWind => "Angin kencang - lindungi tanaman yang rentan",
            WeatherAlertType::HeavyRain => {
                "Hujan lebat diprediksi - pastikan drainase lahan baik"
            }
        }
    }
}

/// Alerts raised by an observation, in a fixed order
pub fn detect_alerts(observation: &Observation) -> Vec<WeatherAlertType> {
    let mut alerts = Vec::new();
    if observation.condition == "Thunderstorm" {
        alerts.push(WeatherAlertType::Thunderstorm);
    }
    if observation.temperature_celsius > WeatherAlertType::HEAT_THRESHOLD_CELSIUS {
        alerts.push(WeatherAlertType::ExtremeHeat);
    }
    if observation.wind_speed_mps > WeatherAlertType::WIND_THRESHOLD_MPS {
        alerts.push(WeatherAlertType::StrongWind);
    }
    if observation.rain_volume_mm() > WeatherAlertType::HEAVY_RAIN_THRESHOLD_MM {
        alerts.push(WeatherAlertType::HeavyRain);
    }
    alerts
}

/// Convert m/s to whole km/h
pub fn mps_to_kmh(speed_mps: f64) -> i32 {
    (speed_mps * 3.6).round() as i32
}

/// Eight-point compass name in Indonesian
pub fn compass_direction(degrees: f64) -> &'static str {
    const DIRECTIONS: [&str; 8] = [
        "Utara",
        "Timur Laut",
        "Timur",
        "Tenggara",
        "Selatan",
        "Barat Daya",
        "Barat",
        "Barat Laut",
    ];
    let normalized = degrees.rem_euclid(360.0);
    let index = (normalized / 45.0).round() as usize % DIRECTIONS.len();
    DIRECTIONS[index]
}

/// Current conditions as shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// Rounded Celsius
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: i32,
    pub wind_speed_kmh: i32,
    pub wind_direction_deg: i32,
    pub condition: WeatherCondition,
    pub description: String,
    pub precipitation_mm: f64,
    pub rainfall: RainfallBreakdown,
    pub alerts: Vec<String>,
}

impl WeatherSnapshot {
    pub fn from_observation(observation: &Observation) -> Self {
        let rain = observation.rain_volume_mm();
        Self {
            temperature: observation.temperature_celsius.round() as i32,
            feels_like: observation.feels_like_celsius.round() as i32,
            humidity: observation.humidity_percent,
            wind_speed_kmh: mps_to_kmh(observation.wind_speed_mps),
            wind_direction_deg: observation.wind_direction_deg,
            condition: WeatherCondition::from_provider(&observation.condition),
            description: observation.description.clone(),
            precipitation_mm: rain,
            rainfall: RainfallBreakdown::from_rain_volume(rain),
            alerts: detect_alerts(observation)
                .iter()
                .map(|a| a.message().to_string())
                .collect(),
        }
    }

    pub fn wind_compass(&self) -> &'static str {
        compass_direction(self.wind_direction_deg as f64)
    }
}

/// One entry of the short-term forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature: i32,
    pub condition: WeatherCondition,
    pub description: String,
    pub humidity: i32,
    pub wind_speed_kmh: i32,
    pub rainfall_mm: f64,
}

/// Short-term forecast for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub location: GpsCoordinates,
    pub entries: Vec<ForecastEntry>,
}

/// Aggregated ten-day ("dasarian") statistics used as model input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DasarianFeatures {
    pub avg_temperature: f64,
    pub total_rainfall: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
    pub avg_wind_direction: f64,
}
