//! Reconciliation of classifier output with the traditional calendar
//!
//! A class id from the prediction service selects a period directly. When the
//! id is missing or unusable, or when the service itself failed, the period is
//! resolved from the date instead. None of these functions return an error.

use std::fmt::Display;

use chrono::NaiveDate;
use serde_json::Value;

use crate::calendar::{self, PERIOD_COUNT};
use crate::models::{
    Confidence, MangsaInfo, MangsaPrediction, Period, PredictionClassId, PredictionComparison,
    PredictionError, PredictionSource,
};
use crate::resolver;

/// Class id (1-12) to calendar table index
const CLASS_TO_INDEX: [(u8, usize); PERIOD_COUNT] = [
    (1, 0),
    (2, 1),
    (3, 2),
    (4, 3),
    (5, 4),
    (6, 5),
    (7, 6),
    (8, 7),
    (9, 8),
    (10, 9),
    (11, 10),
    (12, 11),
];

/// Table index for a validated class id
pub fn class_index(class_id: PredictionClassId) -> Option<usize> {
    CLASS_TO_INDEX
        .iter()
        .find(|(id, _)| *id == class_id.get())
        .map(|(_, index)| *index)
}

fn lookup(class_id: Option<i64>) -> Result<(PredictionClassId, &'static Period), PredictionError> {
    let raw = class_id.ok_or(PredictionError::Missing)?;
    let class_id = PredictionClassId::try_from(raw)?;
    let index = class_index(class_id).ok_or(PredictionError::OutOfRange(raw))?;
    Ok((class_id, &calendar::all()[index]))
}

/// Period for a class id, or the date-based period when the id is unusable
pub fn reconcile(class_id: Option<i64>, fallback_date: NaiveDate) -> &'static Period {
    match lookup(class_id) {
        Ok((_, period)) => period,
        Err(e) => {
            tracing::warn!("Invalid ML prediction ({}), using calendar-based mangsa", e);
            resolver::resolve(fallback_date)
        }
    }
}

/// Like [`reconcile`], reporting which path produced the period
pub fn reconcile_with_source(class_id: Option<i64>, fallback_date: NaiveDate) -> MangsaPrediction {
    match lookup(class_id) {
        Ok((class_id, period)) => MangsaPrediction {
            mangsa: MangsaInfo::from(period),
            source: PredictionSource::Model,
            class_id: Some(class_id.get()),
            fallback_reason: None,
            weather: None,
        },
        Err(e) => calendar_fallback(e, fallback_date),
    }
}

/// Reconcile a raw JSON prediction value (number, numeric string, null, ...)
pub fn reconcile_value(value: &Value, fallback_date: NaiveDate) -> MangsaPrediction {
    match PredictionClassId::from_value(value) {
        Ok(class_id) => reconcile_with_source(Some(class_id.get() as i64), fallback_date),
        Err(e) => calendar_fallback(e, fallback_date),
    }
}

/// Reconcile the outcome of a prediction call. A failed call falls back to the
/// calendar the same way an invalid id does.
pub fn reconcile_outcome<E: Display>(
    outcome: Result<Value, E>,
    fallback_date: NaiveDate,
) -> MangsaPrediction {
    match outcome {
        Ok(value) => reconcile_value(&value, fallback_date),
        Err(e) => calendar_fallback(format!("prediction service failed: {}", e), fallback_date),
    }
}

fn calendar_fallback(reason: impl Display, fallback_date: NaiveDate) -> MangsaPrediction {
    let reason = reason.to_string();
    tracing::warn!("{}, using calendar-based mangsa for {}", reason, fallback_date);
    MangsaPrediction {
        mangsa: MangsaInfo::from(resolver::resolve(fallback_date)),
        source: PredictionSource::Calendar,
        class_id: None,
        fallback_reason: Some(reason),
        weather: None,
    }
}

/// Grade agreement between two periods
pub fn confidence(ml_based: &Period, calendar_based: &Period) -> Confidence {
    if ml_based.id == calendar_based.id {
        return Confidence::High;
    }
    let ml_index = calendar::index_of(ml_based.id);
    let cal_index = calendar::index_of(calendar_based.id);
    match (ml_index, cal_index) {
        (Some(a), Some(b)) if a.abs_diff(b) <= 1 => Confidence::Medium,
        _ => Confidence::Low,
    }
}

/// Compare the model's period with the date-based period for `date`
pub fn compare_predictions(prediction: &MangsaPrediction, date: NaiveDate) -> PredictionComparison {
    let calendar_based = resolver::resolve(date);
    let ml_based = calendar::get_by_id(prediction.mangsa.id).unwrap_or(calendar_based);
    compare_periods(ml_based, calendar_based, prediction.source)
}

/// Compare two already-resolved periods
pub fn compare_periods(
    ml_based: &Period,
    calendar_based: &Period,
    ml_source: PredictionSource,
) -> PredictionComparison {
    PredictionComparison {
        ml_based: MangsaInfo::from(ml_based),
        calendar_based: MangsaInfo::from(calendar_based),
        is_matching: ml_based.id == calendar_based.id,
        confidence: confidence(ml_based, calendar_based),
        ml_source,
    }
}
