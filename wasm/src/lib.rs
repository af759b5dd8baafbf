//! WebAssembly module for the Pranata Mangsa dashboard
//!
//! Lets the browser work out the season without a round trip:
//! - Period lookup by date
//! - Reconciling a model answer with the calendar
//! - Comparing both answers
//! - Weather condition mapping and model features

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use shared::{
    calendar, compass_direction, reconciler, resolver, FeatureVector, GpsCoordinates, MangsaInfo,
    Observation, WeatherCondition, WeatherSnapshot,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    if let Err(e) = calendar::validate() {
        web_sys::console::error_1(&JsValue::from_str(&format!("Calendar table invalid: {}", e)));
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", date, e))
}

/// Model output as JSON when it parses, otherwise as a plain string
fn parse_prediction(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn mangsa_for_date_json(date: &str) -> Result<String, String> {
    let period = resolver::resolve(parse_date(date)?);
    to_json(&MangsaInfo::from(period))
}

fn mangsa_for_month_day_json(month: u32, day: u32) -> Result<String, String> {
    let month_day = shared::validate_month_day(month, day).map_err(|e| e.to_string())?;
    to_json(&MangsaInfo::from(resolver::resolve_month_day(month_day)))
}

fn reconcile_json(raw_prediction: &str, date: &str) -> Result<String, String> {
    let outcome = reconciler::reconcile_value(&parse_prediction(raw_prediction), parse_date(date)?);
    to_json(&outcome)
}

fn compare_json(raw_prediction: &str, date: &str) -> Result<String, String> {
    let date = parse_date(date)?;
    let prediction = reconciler::reconcile_value(&parse_prediction(raw_prediction), date);
    to_json(&reconciler::compare_predictions(&prediction, date))
}

fn features_from_observation(observation_json: &str) -> Result<Vec<f64>, String> {
    let observation: Observation = serde_json::from_str(observation_json)
        .map_err(|e| format!("Invalid observation JSON: {}", e))?;
    let features = FeatureVector::from_snapshot(&WeatherSnapshot::from_observation(&observation));
    features.check().map_err(|e| e.to_string())?;
    Ok(features.to_array().to_vec())
}

/// Period for a `YYYY-MM-DD` date, as JSON
#[wasm_bindgen]
pub fn mangsa_for_date(date: &str) -> Result<String, JsValue> {
    mangsa_for_date_json(date).map_err(|e| JsValue::from_str(&e))
}

/// Period for a month and day, as JSON
#[wasm_bindgen]
pub fn mangsa_for_month_day(month: u32, day: u32) -> Result<String, JsValue> {
    mangsa_for_month_day_json(month, day).map_err(|e| JsValue::from_str(&e))
}

/// Period for today in the browser's local time, as JSON
#[wasm_bindgen]
pub fn mangsa_today() -> Result<String, JsValue> {
    let now = js_sys::Date::new_0();
    mangsa_for_month_day(now.get_month() + 1, now.get_date())
}

/// All twelve periods in cycle order, as JSON
#[wasm_bindgen]
pub fn all_mangsa() -> String {
    let periods: Vec<MangsaInfo> = calendar::all().iter().map(MangsaInfo::from).collect();
    to_json(&periods).unwrap_or_else(|_| "[]".to_string())
}

/// Reconcile a raw model answer (JSON text) with the calendar on `date`
#[wasm_bindgen]
pub fn reconcile_prediction(raw_prediction: &str, date: &str) -> Result<String, JsValue> {
    reconcile_json(raw_prediction, date).map_err(|e| JsValue::from_str(&e))
}

/// Compare a raw model answer with the calendar on `date`
#[wasm_bindgen]
pub fn compare_prediction(raw_prediction: &str, date: &str) -> Result<String, JsValue> {
    compare_json(raw_prediction, date).map_err(|e| JsValue::from_str(&e))
}

/// Dashboard category for a provider condition ("sunny", "cloudy", ...)
#[wasm_bindgen]
pub fn map_weather_condition(main: &str) -> String {
    match WeatherCondition::from_provider(main) {
        WeatherCondition::Sunny => "sunny",
        WeatherCondition::Cloudy => "cloudy",
        WeatherCondition::Rainy => "rainy",
        WeatherCondition::Stormy => "stormy",
    }
    .to_string()
}

/// Model features from an observation (JSON)
#[wasm_bindgen]
pub fn weather_features(observation_json: &str) -> Result<Vec<f64>, JsValue> {
    features_from_observation(observation_json).map_err(|e| JsValue::from_str(&e))
}

/// Indonesian compass name for a wind direction
#[wasm_bindgen]
pub fn wind_direction_name(degrees: f64) -> String {
    compass_direction(degrees).to_string()
}

/// Whether the coordinates fall inside Indonesia
#[wasm_bindgen]
pub fn is_indonesian_location(latitude: f64, longitude: f64) -> bool {
    shared::validate_indonesian_coordinates(&GpsCoordinates::from_degrees(latitude, longitude))
        .is_ok()
}
