//! Location catalog handlers

use axum::Json;

use shared::{provinces, Province};

/// List the provinces and cities offered for selection
pub async fn list_locations() -> Json<&'static [Province]> {
    Json(provinces())
}
