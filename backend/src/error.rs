//! Error handling for the Pranata Mangsa server
//!
//! Provides consistent error responses in English and Bahasa Indonesia

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
        message_ind: String,
    },

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_ind: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Weather service unavailable: {0}")]
    WeatherServiceUnavailable(String),

    #[error("Prediction service unavailable: {0}")]
    PredictionServiceUnavailable(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<shared::LocationError> for AppError {
    fn from(e: shared::LocationError) -> Self {
        match e {
            shared::LocationError::UnknownCity(city) => AppError::NotFound(format!("City {}", city)),
            shared::LocationError::OutOfBounds(coords) => AppError::Validation {
                field: "location".to_string(),
                message: format!("Coordinates outside Indonesia: {}", coords),
                message_ind: format!("Koordinat di luar wilayah Indonesia: {}", coords),
            },
        }
    }
}

impl From<shared::FeatureError> for AppError {
    fn from(e: shared::FeatureError) -> Self {
        AppError::Validation {
            field: "features".to_string(),
            message: e.to_string(),
            message_ind: format!("Fitur cuaca tidak valid: {}", e),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_ind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message_en: impl Into<String>, message_ind: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message_en: message_en.into(),
            message_ind: message_ind.into(),
            field: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new(
                    "INVALID_CREDENTIALS",
                    "Invalid username or password",
                    "Nama pengguna atau kata sandi salah",
                ),
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("TOKEN_EXPIRED", "Token has expired", "Token sudah kedaluwarsa"),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("INVALID_TOKEN", "Invalid token", "Token tidak valid"),
            ),
            AppError::Unauthorized {
                message,
                message_ind,
            } => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("UNAUTHORIZED", message.clone(), message_ind.clone()),
            ),
            AppError::Validation {
                field,
                message,
                message_ind,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some(field.clone()),
                    ..ErrorDetail::new("VALIDATION_ERROR", message.clone(), message_ind.clone())
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new(
                    "VALIDATION_ERROR",
                    msg.clone(),
                    format!("Data tidak valid: {}", msg),
                ),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new(
                    "NOT_FOUND",
                    format!("{} not found", resource),
                    format!("{} tidak ditemukan", resource),
                ),
            ),
            AppError::WeatherServiceUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail::new(
                    "WEATHER_SERVICE_UNAVAILABLE",
                    "Weather service is temporarily unavailable",
                    "Layanan cuaca sedang tidak tersedia",
                ),
            ),
            AppError::PredictionServiceUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail::new(
                    "PREDICTION_SERVICE_UNAVAILABLE",
                    "Season prediction service is temporarily unavailable",
                    "Layanan prediksi mangsa sedang tidak tersedia",
                ),
            ),
            AppError::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail::new(
                    "EXTERNAL_SERVICE_ERROR",
                    format!("External service error: {}", msg),
                    format!("Terjadi kesalahan pada layanan eksternal: {}", msg),
                ),
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "CONFIGURATION_ERROR",
                    format!("Configuration error: {}", msg),
                    format!("Terjadi kesalahan konfigurasi: {}", msg),
                ),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "INTERNAL_ERROR",
                    "An internal server error occurred",
                    "Terjadi kesalahan pada server",
                ),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
