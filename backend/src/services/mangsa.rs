//! Season service: calendar lookups and model-backed predictions
//!
//! Prediction never fails once the location is valid. A weather outage is
//! bridged with default features and a prediction outage falls back to the
//! calendar.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use shared::{
    auto_reminders, calendar, reconciler, resolver, FeatureVector, LocationInput, MangsaInfo,
    MangsaPrediction, Period, PredictionComparison, Reminder, ResolvedLocation, SeasonKind,
};

use crate::error::{AppError, AppResult};
use crate::external::PredictionClient;
use crate::services::WeatherService;

/// How the prediction service should be asked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMode {
    /// Send features built from the current weather to `/predict`
    #[default]
    Features,
    /// Let the service collect its own data via `/predict-live`
    Live,
}

/// A period with its neighbours in the cycle
#[derive(Debug, Clone, Serialize)]
pub struct MangsaNeighbors {
    pub previous: MangsaInfo,
    pub current: MangsaInfo,
    pub next: MangsaInfo,
}

/// Prediction together with the location it was made for
#[derive(Debug, Clone, Serialize)]
pub struct LocatedPrediction {
    pub location: ResolvedLocation,
    #[serde(flatten)]
    pub prediction: MangsaPrediction,
    pub source_label: &'static str,
}

/// Season service
#[derive(Clone)]
pub struct MangsaService {
    weather: WeatherService,
    prediction: PredictionClient,
}

/// Today's date on the server's clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Period for today
pub fn resolve_today() -> &'static Period {
    resolver::resolve(today())
}

fn period(id: u8) -> AppResult<&'static Period> {
    calendar::get_by_id(id).ok_or_else(|| AppError::NotFound(format!("Mangsa {}", id)))
}

impl MangsaService {
    pub fn new(weather: WeatherService, prediction: PredictionClient) -> Self {
        Self { weather, prediction }
    }

    /// All twelve periods in cycle order
    pub fn list() -> Vec<MangsaInfo> {
        calendar::all().iter().map(MangsaInfo::from).collect()
    }

    pub fn get(id: u8) -> AppResult<MangsaInfo> {
        period(id).map(MangsaInfo::from)
    }

    /// Period in effect on `date`, today when absent
    pub fn current(date: Option<NaiveDate>) -> MangsaInfo {
        let period = match date {
            Some(date) => resolver::resolve(date),
            None => resolve_today(),
        };
        MangsaInfo::from(period)
    }

    pub fn neighbors(id: u8) -> AppResult<MangsaNeighbors> {
        let current = period(id)?;
        Ok(MangsaNeighbors {
            previous: MangsaInfo::from(calendar::previous(current)),
            current: MangsaInfo::from(current),
            next: MangsaInfo::from(calendar::next(current)),
        })
    }

    pub fn by_season(kind: SeasonKind) -> Vec<MangsaInfo> {
        calendar::by_season(kind)
            .into_iter()
            .map(MangsaInfo::from)
            .collect()
    }

    pub fn reminders(id: u8) -> AppResult<Vec<Reminder>> {
        let current = period(id)?;
        Ok(auto_reminders(current, calendar::next(current)))
    }

    /// Reconcile a raw class id (any JSON value) against `date`
    pub fn reconcile(class_id: &serde_json::Value, date: Option<NaiveDate>) -> MangsaPrediction {
        reconciler::reconcile_value(class_id, date.unwrap_or_else(today))
    }

    /// Ask the model which period a location is in, falling back to the
    /// calendar whenever the model cannot give a usable answer
    pub async fn predict(
        &self,
        input: &LocationInput,
        date: Option<NaiveDate>,
        mode: PredictionMode,
    ) -> AppResult<LocatedPrediction> {
        let location = input.resolve()?;
        let date = date.unwrap_or_else(today);

        if !shared::is_on_java(&location.coordinates) {
            tracing::info!(
                "Location {}, {} is outside Java; the calendar may not apply",
                location.coordinates.latitude,
                location.coordinates.longitude
            );
        }

        let prediction = match mode {
            PredictionMode::Features => self.predict_from_weather(&location, date).await,
            PredictionMode::Live => self.predict_live(&location, date).await,
        };

        Ok(LocatedPrediction {
            source_label: prediction.source.label(),
            location,
            prediction,
        })
    }

    async fn predict_from_weather(&self, location: &ResolvedLocation, date: NaiveDate) -> MangsaPrediction {
        let weather = match self.weather.snapshot(location).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Weather unavailable ({}), using default features", e);
                None
            }
        };
        let features = weather
            .as_ref()
            .map(FeatureVector::from_snapshot)
            .unwrap_or_else(FeatureVector::default_features);

        let outcome = self.prediction.predict(&features).await;
        let mut prediction = reconciler::reconcile_outcome(outcome, date);
        prediction.weather = weather;
        prediction
    }

    async fn predict_live(&self, location: &ResolvedLocation, date: NaiveDate) -> MangsaPrediction {
        let outcome = self
            .prediction
            .predict_live(Some(&location.coordinates))
            .await
            .map(|live| live.prediction);
        reconciler::reconcile_outcome(outcome, date)
    }

    /// Run both paths and report how well they agree
    pub async fn compare(
        &self,
        input: &LocationInput,
        date: Option<NaiveDate>,
        mode: PredictionMode,
    ) -> AppResult<PredictionComparison> {
        let date = date.unwrap_or_else(today);
        let located = self.predict(input, Some(date), mode).await?;
        let comparison = reconciler::compare_predictions(&located.prediction, date);
        tracing::debug!(
            "Comparison for {}: model {} vs calendar {} ({:?})",
            date,
            comparison.ml_based.id,
            comparison.calendar_based.id,
            comparison.confidence
        );
        Ok(comparison)
    }
}
