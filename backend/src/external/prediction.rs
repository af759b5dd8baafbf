//! Client for the LVQ season prediction service
//!
//! The service answers with a class id between 1 and 12. This client only
//! transports the raw JSON value; validation and the calendar fallback live in
//! `shared::reconciler`.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared::{FeatureVector, GpsCoordinates};

use super::{read_json, send_with_retry, GatewayError, HttpPolicy};
use crate::config::PredictionConfig;
use crate::error::{AppError, AppResult};

/// Prediction service client
#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    policy: HttpPolicy,
    base_url: String,
}

/// Request body for `POST /predict`
#[derive(Debug, Serialize)]
struct PredictRequest {
    features: [f64; FeatureVector::LEN],
}

/// Response body of `POST /predict`
#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    prediction: Value,
}

/// Response body of `GET /predict-live`
#[derive(Debug, Default, Deserialize)]
struct LiveResponse {
    #[serde(default)]
    prediction_ai: Value,
    #[serde(default)]
    used_by_frontend: Value,
    #[serde(default)]
    prediction_by_date: Value,
    #[serde(default)]
    features: Option<Value>,
}

/// Outcome of a live prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LivePrediction {
    /// The value to reconcile: the model's answer when present, then the
    /// service's own choice, then its date-based answer
    pub prediction: Value,
    pub prediction_ai: Value,
    pub prediction_by_date: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Value>,
}

impl From<LiveResponse> for LivePrediction {
    fn from(r: LiveResponse) -> Self {
        let prediction = [&r.prediction_ai, &r.used_by_frontend, &r.prediction_by_date]
            .into_iter()
            .find(|v| !v.is_null())
            .cloned()
            .unwrap_or(Value::Null);

        LivePrediction {
            prediction,
            prediction_ai: r.prediction_ai,
            prediction_by_date: r.prediction_by_date,
            features: r.features,
        }
    }
}

fn prediction_error(e: GatewayError) -> AppError {
    if e.is_transient() {
        AppError::PredictionServiceUnavailable(e.to_string())
    } else {
        AppError::ExternalService(format!("Prediction API: {}", e))
    }
}

impl PredictionClient {
    pub fn new(config: &PredictionConfig, policy: HttpPolicy) -> AppResult<Self> {
        let client = policy
            .client()
            .map_err(|e| AppError::Configuration(format!("prediction HTTP client: {}", e)))?;

        Ok(Self {
            client,
            policy,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL, also the default host of `/weather-data`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify a feature vector. Returns the raw `prediction` value, which
    /// is `null` when the service omitted it.
    pub async fn predict(&self, features: &FeatureVector) -> AppResult<Value> {
        features.check()?;
        let url = format!("{}/predict", self.base_url);
        let body = PredictRequest {
            features: features.to_array(),
        };
        tracing::debug!("Sending prediction request: {:?}", body.features);

        let response = send_with_retry(&self.policy, "prediction API", || {
            self.client.post(&url).json(&body)
        })
        .await
        .map_err(prediction_error)?;
        let data: PredictResponse = read_json(response).await.map_err(prediction_error)?;

        tracing::debug!("Prediction API response: {}", data.prediction);
        Ok(data.prediction)
    }

    /// Let the service gather weather itself and classify the location
    pub async fn predict_live(&self, location: Option<&GpsCoordinates>) -> AppResult<LivePrediction> {
        let url = match location {
            Some(coords) => format!(
                "{}/predict-live?lat={}&lon={}",
                self.base_url, coords.latitude, coords.longitude
            ),
            None => format!("{}/predict-live", self.base_url),
        };
        tracing::debug!("Calling prediction API: {}", url);

        let response = send_with_retry(&self.policy, "live prediction API", || {
            self.client.get(&url)
        })
        .await
        .map_err(prediction_error)?;
        let data: LiveResponse = read_json(response).await.map_err(prediction_error)?;

        Ok(data.into())
    }
}
