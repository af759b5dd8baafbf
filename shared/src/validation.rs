//! Validation utilities for the Pranata Mangsa dashboard
//!
//! Input checks for locations, calendar positions and credentials.

use rust_decimal::Decimal;

use crate::models::MonthDay;
use crate::types::GpsCoordinates;

// ============================================================================
// Location Validations
// ============================================================================

/// Validate coordinates fall inside Indonesia's bounding box
/// (about 11°S to 6°N, 95°E to 141°E)
pub fn validate_indonesian_coordinates(coords: &GpsCoordinates) -> Result<(), &'static str> {
    let (lat, lon) = (coords.latitude, coords.longitude);
    if lat < Decimal::from(-11) || lat > Decimal::from(6) {
        return Err("Latitude must be between -11 and 6");
    }
    if lon < Decimal::from(95) || lon > Decimal::from(141) {
        return Err("Longitude must be between 95 and 141");
    }
    Ok(())
}

/// Check coordinates are on Java, where the calendar is traditionally used
pub fn is_on_java(coords: &GpsCoordinates) -> bool {
    coords.latitude >= Decimal::from(-9)
        && coords.latitude <= Decimal::from(-5)
        && coords.longitude >= Decimal::from(105)
        && coords.longitude <= Decimal::from(115)
}

// ============================================================================
// Calendar Validations
// ============================================================================

/// Validate a month/day pair
pub fn validate_month_day(month: u32, day: u32) -> Result<MonthDay, &'static str> {
    let md = MonthDay::new(month, day);
    if md.is_valid() {
        Ok(md)
    } else {
        Err("Invalid month/day combination")
    }
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate username format (3-32 lowercase alphanumeric or underscore)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 32 {
        return Err("Username must be at most 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err("Username must be lowercase alphanumeric only");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}
