//! Location models and the built-in city catalog

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::GpsCoordinates;

/// A selectable city
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    pub id: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::from_degrees(self.latitude, self.longitude)
    }
}

/// A province and the cities offered in it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Province {
    pub id: &'static str,
    pub name: &'static str,
    pub cities: &'static [City],
}

static PROVINCES: [Province; 2] = [
    Province {
        id: "jatim",
        name: "Jawa Timur",
        cities: &[City {
            id: "gresik",
            name: "Gresik",
            latitude: -7.1621,
            longitude: 112.6526,
        }],
    },
    Province {
        id: "jateng",
        name: "Jawa Tengah",
        cities: &[City {
            id: "yogyakarta",
            name: "Yogyakarta",
            latitude: -7.7828,
            longitude: 110.3608,
        }],
    },
];

pub fn provinces() -> &'static [Province] {
    &PROVINCES
}

/// Find a city by id or name, optionally restricted to one province.
/// Matching ignores case.
pub fn find_city(city: &str, province: Option<&str>) -> Option<(&'static Province, &'static City)> {
    let city = city.trim();
    PROVINCES
        .iter()
        .filter(|p| {
            province
                .map(|wanted| {
                    let wanted = wanted.trim();
                    p.id.eq_ignore_ascii_case(wanted) || p.name.eq_ignore_ascii_case(wanted)
                })
                .unwrap_or(true)
        })
        .find_map(|p| {
            p.cities
                .iter()
                .find(|c| c.id.eq_ignore_ascii_case(city) || c.name.eq_ignore_ascii_case(city))
                .map(|c| (p, c))
        })
}

/// Problems resolving a location
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("coordinates outside Indonesia: {0}")]
    OutOfBounds(String),
}

/// Location as supplied by a client: either raw coordinates or a catalog city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationInput {
    Coords {
        lat: Decimal,
        lon: Decimal,
    },
    Location {
        city: String,
        #[serde(default)]
        province: Option<String>,
    },
}

/// A location reduced to coordinates, with labels when known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub coordinates: GpsCoordinates,
}

impl LocationInput {
    pub fn resolve(&self) -> Result<ResolvedLocation, LocationError> {
        let resolved = match self {
            LocationInput::Coords { lat, lon } => ResolvedLocation {
                province: None,
                city: None,
                coordinates: GpsCoordinates::new(*lat, *lon),
            },
            LocationInput::Location { city, province } => {
                let (p, c) = find_city(city, province.as_deref())
                    .ok_or_else(|| LocationError::UnknownCity(city.clone()))?;
                ResolvedLocation {
                    province: Some(p.name.to_string()),
                    city: Some(c.name.to_string()),
                    coordinates: c.coordinates(),
                }
            }
        };

        crate::validation::validate_indonesian_coordinates(&resolved.coordinates).map_err(
            |_| {
                LocationError::OutOfBounds(format!(
                    "{}, {}",
                    resolved.coordinates.latitude, resolved.coordinates.longitude
                ))
            },
        )?;

        Ok(resolved)
    }
}
