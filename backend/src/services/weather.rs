//! Weather service shaping provider data for the dashboard

use serde::Serialize;

use shared::{
    FeatureVector, LocationInput, ResolvedLocation, WeatherForecast, WeatherSnapshot,
};

use crate::error::AppResult;
use crate::external::WeatherClient;

/// Weather service
#[derive(Clone)]
pub struct WeatherService {
    client: WeatherClient,
}

/// Current conditions for a resolved location
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub location: ResolvedLocation,
    pub weather: WeatherSnapshot,
    /// Eight-point compass name of the wind direction
    pub wind_compass: &'static str,
}

/// Model input built from live weather
#[derive(Debug, Clone, Serialize)]
pub struct WeatherFeatures {
    pub location: ResolvedLocation,
    pub features: FeatureVector,
    /// Same values in model order
    pub vector: [f64; FeatureVector::LEN],
    pub weather: WeatherSnapshot,
}

impl WeatherService {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Current weather for a location
    pub async fn current(&self, input: &LocationInput) -> AppResult<WeatherReport> {
        let location = input.resolve()?;
        let weather = self.snapshot(&location).await?;
        Ok(WeatherReport {
            wind_compass: weather.wind_compass(),
            location,
            weather,
        })
    }

    /// Dashboard snapshot for an already resolved location
    pub async fn snapshot(&self, location: &ResolvedLocation) -> AppResult<WeatherSnapshot> {
        let observation = self
            .client
            .get_current_weather(&location.coordinates)
            .await?;
        let snapshot = WeatherSnapshot::from_observation(&observation);
        if !snapshot.alerts.is_empty() {
            tracing::info!(
                "{} weather alert(s) at {}, {}",
                snapshot.alerts.len(),
                location.coordinates.latitude,
                location.coordinates.longitude
            );
        }
        Ok(snapshot)
    }

    /// Short-term forecast for a location
    pub async fn forecast(&self, input: &LocationInput) -> AppResult<WeatherForecast> {
        let location = input.resolve()?;
        self.client.get_forecast(&location.coordinates).await
    }

    /// Feature vector for the season model, from current weather
    pub async fn features(&self, input: &LocationInput) -> AppResult<WeatherFeatures> {
        let location = input.resolve()?;
        let weather = self.snapshot(&location).await?;
        let features = FeatureVector::from_snapshot(&weather);
        features.check()?;
        tracing::debug!("Weather features for prediction: {:?}", features.to_array());

        Ok(WeatherFeatures {
            location,
            vector: features.to_array(),
            features,
            weather,
        })
    }
}
