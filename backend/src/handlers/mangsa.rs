//! Pranata Mangsa handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use shared::{LocationInput, MangsaInfo, MangsaPrediction, PredictionComparison, Reminder, SeasonKind};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::mangsa::{LocatedPrediction, MangsaNeighbors, PredictionMode};
use crate::services::MangsaService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CurrentMangsaQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ReconcileInput {
    /// Raw classifier output; anything but a class id in 1-12 falls back
    #[serde(default)]
    pub class_id: Value,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct PredictInput {
    pub location: LocationInput,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub mode: PredictionMode,
}

/// List all twelve periods
pub async fn list_mangsa(_current_user: CurrentUser) -> Json<Vec<MangsaInfo>> {
    Json(MangsaService::list())
}

/// Get one period by id
pub async fn get_mangsa(
    _current_user: CurrentUser,
    Path(mangsa_id): Path<u8>,
) -> AppResult<Json<MangsaInfo>> {
    Ok(Json(MangsaService::get(mangsa_id)?))
}

/// Period in effect on a date (today by default)
pub async fn get_current_mangsa(
    _current_user: CurrentUser,
    Query(query): Query<CurrentMangsaQuery>,
) -> Json<MangsaInfo> {
    Json(MangsaService::current(query.date))
}

/// Previous, current and next period
pub async fn get_mangsa_neighbors(
    _current_user: CurrentUser,
    Path(mangsa_id): Path<u8>,
) -> AppResult<Json<MangsaNeighbors>> {
    Ok(Json(MangsaService::neighbors(mangsa_id)?))
}

/// Periods of one season kind
pub async fn list_mangsa_by_season(
    _current_user: CurrentUser,
    Path(kind): Path<String>,
) -> AppResult<Json<Vec<MangsaInfo>>> {
    let kind: SeasonKind = kind.parse().map_err(|message: String| AppError::Validation {
        field: "kind".to_string(),
        message_ind: format!("Jenis musim tidak dikenal: {}", kind),
        message,
    })?;
    Ok(Json(MangsaService::by_season(kind)))
}

/// Reminders for a period
pub async fn get_mangsa_reminders(
    _current_user: CurrentUser,
    Path(mangsa_id): Path<u8>,
) -> AppResult<Json<Vec<Reminder>>> {
    Ok(Json(MangsaService::reminders(mangsa_id)?))
}

/// Reconcile a classifier answer with the calendar
pub async fn reconcile_mangsa(
    _current_user: CurrentUser,
    Json(input): Json<ReconcileInput>,
) -> Json<MangsaPrediction> {
    Json(MangsaService::reconcile(&input.class_id, input.date))
}

/// Predict the period for a location
pub async fn predict_mangsa(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<PredictInput>,
) -> AppResult<Json<LocatedPrediction>> {
    tracing::debug!("Prediction requested by {}", current_user.0.username);
    let prediction = state
        .mangsa_service()
        .predict(&input.location, input.date, input.mode)
        .await?;
    Ok(Json(prediction))
}

/// Compare the model's period with the calendar's
pub async fn compare_mangsa(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<PredictInput>,
) -> AppResult<Json<PredictionComparison>> {
    let comparison = state
        .mangsa_service()
        .compare(&input.location, input.date, input.mode)
        .await?;
    Ok(Json(comparison))
}
