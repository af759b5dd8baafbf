//! Helpers shared by the backend integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use pranata_mangsa_backend::config::{
    AuthConfig, Config, HttpConfig, JwtConfig, PredictionConfig, ServerConfig, WeatherConfig,
};
use pranata_mangsa_backend::services::AuthService;
use pranata_mangsa_backend::{create_app, AppState};

/// Nothing listens here, so every call is refused
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

pub fn test_config(base_url: &str) -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        jwt: JwtConfig {
            secret: "integration-secret".to_string(),
            access_token_expiry: 3600,
        },
        auth: AuthConfig {
            username: "petani".to_string(),
            password: Some("petani123".to_string()),
            password_hash: None,
            display_name: "Petani Indonesia".to_string(),
        },
        weather: WeatherConfig {
            api_endpoint: base_url.to_string(),
            api_key: "test-key".to_string(),
            language: "id".to_string(),
            backend_proxy_url: None,
        },
        prediction: PredictionConfig {
            api_base_url: base_url.to_string(),
        },
        http: HttpConfig {
            timeout_secs: 2,
            max_retries: 2,
            retry_backoff_ms: 5,
        },
    }
}

pub fn test_state(base_url: &str) -> AppState {
    state_for(test_config(base_url))
}

/// App state with a cheap bcrypt cost
pub fn state_for(config: Config) -> AppState {
    let auth = AuthService::with_cost(&config.jwt, &config.auth, 4).unwrap();
    AppState::with_auth(config, auth).unwrap()
}

/// Config whose gateways give up after one second and retry once
pub fn impatient_config(base_url: &str) -> Config {
    let mut config = test_config(base_url);
    config.http.timeout_secs = 1;
    config.http.max_retries = 1;
    config
}

/// Serve `app` on an ephemeral port and return its base URL
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Counts requests reaching the stub
#[derive(Clone, Default)]
pub struct Hits(pub Arc<AtomicUsize>);

impl Hits {
    pub fn bump(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn owm_current(main: &str, temp: f64, wind_mps: f64, rain_1h: Option<f64>) -> Value {
    let mut body = json!({
        "coord": {"lat": -7.16, "lon": 112.65},
        "weather": [{"id": 500, "main": main, "description": "deskripsi", "icon": "10d"}],
        "main": {"temp": temp, "feels_like": temp + 2.0, "temp_min": temp, "temp_max": temp,
                 "pressure": 1010, "humidity": 80},
        "wind": {"speed": wind_mps, "deg": 120},
        "clouds": {"all": 75},
        "dt": 1_735_700_000,
        "name": "Gresik"
    });
    if let Some(rain) = rain_1h {
        body["rain"] = json!({"1h": rain});
    }
    body
}

pub fn owm_forecast(entries: usize) -> Value {
    let list: Vec<Value> = (0..entries)
        .map(|i| {
            json!({
                "dt": 1_735_700_000 + (i as i64) * 10_800,
                "main": {"temp": 28.0, "feels_like": 31.0, "humidity": 85},
                "weather": [{"main": "Rain", "description": "hujan ringan"}],
                "wind": {"speed": 2.0, "deg": 200},
                "rain": {"3h": 0.5}
            })
        })
        .collect();
    json!({"cod": "200", "list": list, "city": {"name": "Gresik"}})
}

/// A well-behaved upstream: weather, forecast, weather-data and both
/// prediction endpoints. The model always answers `class_id`.
pub fn healthy_upstream(class_id: Value) -> Router {
    let live = class_id.clone();
    Router::new()
        .route(
            "/weather",
            get(|| async { Json(owm_current("Clouds", 29.4, 3.0, None)) }),
        )
        .route("/forecast", get(|| async { Json(owm_forecast(8)) }))
        .route(
            "/weather-data",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "temperature": 29,
                    "location": {"name": "Gresik", "country": "ID", "lat": q.get("lat"), "lon": q.get("lon")},
                    "dasarian_features": {
                        "avg_temperature": 28.7,
                        "total_rainfall": 112.5,
                        "avg_humidity": 83.0,
                        "avg_wind_speed": 2.9,
                        "avg_wind_direction": 135.0
                    }
                }))
            }),
        )
        .route(
            "/predict",
            post(move |Json(body): Json<Value>| {
                let class_id = class_id.clone();
                async move {
                    assert_eq!(body["features"].as_array().map(|f| f.len()), Some(5));
                    Json(json!({ "prediction": class_id }))
                }
            }),
        )
        .route(
            "/predict-live",
            get(move || {
                let live = live.clone();
                async move { Json(json!({ "prediction_ai": live, "prediction_by_date": 1 })) }
            }),
        )
}

/// An upstream whose endpoints fail `failures` times with `status` before
/// answering normally
pub fn flaky_upstream(status: StatusCode, failures: usize, hits: Hits) -> Router {
    async fn handler(
        State((hits, status, failures)): State<(Hits, StatusCode, usize)>,
    ) -> axum::response::Response {
        if hits.bump() <= failures {
            (status, "upstream trouble").into_response()
        } else {
            Json(owm_current("Rain", 27.0, 2.0, Some(1.0))).into_response()
        }
    }

    Router::new()
        .route("/weather", get(handler))
        .with_state((hits, status, failures))
}

/// Healthy weather, but `/predict` answers only after `delay`
pub fn slow_prediction_upstream(delay: Duration, hits: Hits) -> Router {
    Router::new()
        .route(
            "/weather",
            get(|| async { Json(owm_current("Clouds", 29.4, 3.0, None)) }),
        )
        .route(
            "/predict",
            post(move || {
                let hits = hits.clone();
                async move {
                    hits.bump();
                    tokio::time::sleep(delay).await;
                    Json(json!({ "prediction": 5 }))
                }
            }),
        )
}

pub async fn login_token(state: &AppState) -> String {
    state.auth.login("petani", "petani123").unwrap().access_token
}

/// Send a request through the full router
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub fn app_for(state: AppState) -> Router {
    create_app(state)
}
