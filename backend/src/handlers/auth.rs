//! Authentication handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::{User, UserRole};

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::AppState;

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub id: String,
    pub username: String,
    pub name: String,
    pub role: UserRole,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    body.validate()?;
    let tokens = state.auth.login(&body.username, &body.password)?;

    Ok(Json(LoginResponse {
        access_token: tokens.access_token,
        token_type: tokens.token_type,
        expires_in: tokens.expires_in,
        user: tokens.user,
    }))
}

/// Current user endpoint handler
pub async fn me(current_user: CurrentUser) -> Json<MeResponse> {
    let user = current_user.0;
    Json(MeResponse {
        id: user.user_id,
        username: user.username,
        name: user.name,
        role: user.role,
    })
}
