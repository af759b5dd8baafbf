//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build coordinates from floating point degrees.
    ///
    /// Non-finite values collapse to zero, which the Indonesia bounds check
    /// rejects further down the line.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Decimal::try_from(latitude).unwrap_or_default(),
            longitude: Decimal::try_from(longitude).unwrap_or_default(),
        }
    }
}

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Indonesian,
    English,
}
