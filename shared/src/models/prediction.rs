//! Season prediction models
//!
//! The external LVQ classifier answers with an integer class between 1 and 12.
//! These types carry that answer, the weather features it was computed from,
//! and the outcome of reconciling it with the calendar.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

use super::mangsa::MangsaInfo;
use super::weather::WeatherSnapshot;

/// Problems with a class id received from the prediction service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    #[error("prediction is missing")]
    Missing,

    #[error("prediction is not a number: {0}")]
    NotNumeric(String),

    #[error("prediction {0} is outside 1-12")]
    OutOfRange(i64),
}

/// Validated classifier output, 1-12
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PredictionClassId(u8);

impl PredictionClassId {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 12;

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Parse a JSON value from a prediction response.
    ///
    /// Accepts integers, floats with no fractional part, and strings holding
    /// either of those. Anything else is rejected.
    pub fn from_value(value: &Value) -> Result<Self, PredictionError> {
        match value {
            Value::Null => Err(PredictionError::Missing),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::try_from(i)
                } else {
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                            Self::try_from(f as i64)
                        }
                        _ => Err(PredictionError::NotNumeric(n.to_string())),
                    }
                }
            }
            Value::String(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Self::try_from(i);
                }
                match trimmed.parse::<f64>() {
                    Ok(f) if f.is_finite() && f.fract() == 0.0 => Self::try_from(f as i64),
                    _ => Err(PredictionError::NotNumeric(s.clone())),
                }
            }
            other => Err(PredictionError::NotNumeric(other.to_string())),
        }
    }
}

impl TryFrom<i64> for PredictionClassId {
    type Error = PredictionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(PredictionError::OutOfRange(value))
        }
    }
}

impl std::fmt::Display for PredictionClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a reported period came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    /// The classifier's answer was used
    Model,
    /// The traditional calendar was used
    Calendar,
}

impl PredictionSource {
    /// Label shown on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            PredictionSource::Model => "Prediksi AI",
            PredictionSource::Calendar => "Kalender tradisional",
        }
    }
}

/// A period together with how it was chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangsaPrediction {
    pub mangsa: MangsaInfo,
    pub source: PredictionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
}

/// Agreement between the model and the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Side-by-side result of both resolution paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionComparison {
    pub ml_based: MangsaInfo,
    pub calendar_based: MangsaInfo,
    pub is_matching: bool,
    pub confidence: Confidence,
    pub ml_source: PredictionSource,
}

/// Problems with a feature vector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("expected {expected} features, got {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("invalid feature values: {0}")]
    OutOfRange(String),
}

/// Model input: `[temperature, rainfall, humidity, wind_speed, wind_direction]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct FeatureVector {
    /// Celsius
    #[validate(range(min = -50.0, max = 60.0))]
    pub temperature: f64,
    /// Mean of the rainfall breakdown
    #[validate(range(min = 0.0, max = 1000.0))]
    pub rainfall: f64,
    /// Percent
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    /// km/h
    #[validate(range(min = 0.0, max = 500.0))]
    pub wind_speed: f64,
    /// Degrees
    #[validate(range(min = 0.0, max = 360.0))]
    pub wind_direction: f64,
}

impl FeatureVector {
    pub const LEN: usize = 5;

    /// Features used when live weather is unavailable
    pub fn default_features() -> Self {
        Self {
            temperature: 30.0,
            rainfall: 20.0,
            humidity: 75.0,
            wind_speed: 10.0,
            wind_direction: 90.0,
        }
    }

    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Self {
        Self {
            temperature: snapshot.temperature as f64,
            rainfall: snapshot.rainfall.average(),
            humidity: snapshot.humidity as f64,
            wind_speed: snapshot.wind_speed_kmh as f64,
            wind_direction: snapshot.wind_direction_deg as f64,
        }
    }

    /// Build from a raw slice, checking length and ranges
    pub fn from_slice(values: &[f64]) -> Result<Self, FeatureError> {
        let [temperature, rainfall, humidity, wind_speed, wind_direction] = values else {
            return Err(FeatureError::WrongLength {
                expected: Self::LEN,
                found: values.len(),
            });
        };
        let features = Self {
            temperature: *temperature,
            rainfall: *rainfall,
            humidity: *humidity,
            wind_speed: *wind_speed,
            wind_direction: *wind_direction,
        };
        features.check()?;
        Ok(features)
    }

    pub fn check(&self) -> Result<(), FeatureError> {
        // range checks let NaN through
        if let Some(bad) = self.to_array().iter().find(|v| !v.is_finite()) {
            return Err(FeatureError::OutOfRange(format!("non-finite value {}", bad)));
        }
        self.validate()
            .map_err(|e| FeatureError::OutOfRange(e.to_string()))
    }

    pub fn to_array(&self) -> [f64; 5] {
        [
            self.temperature,
            self.rainfall,
            self.humidity,
            self.wind_speed,
            self.wind_direction,
        ]
    }
}
