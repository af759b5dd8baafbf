//! Authentication service for the single dashboard account

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{AuthConfig, JwtConfig};
use crate::error::{AppError, AppResult};
use shared::{Language, User, UserRole};

/// Id of the only account
const USER_ID: &str = "1";

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    access_token_expiry: i64,
    username: String,
    password_hash: String,
    display_name: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub username: String,
    pub name: String,
    pub role: UserRole,
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

impl AuthService {
    pub fn new(jwt: &JwtConfig, account: &AuthConfig) -> AppResult<Self> {
        Self::with_cost(jwt, account, DEFAULT_COST)
    }

    /// Like [`AuthService::new`] with an explicit bcrypt cost for hashing a
    /// plain configured password
    pub fn with_cost(jwt: &JwtConfig, account: &AuthConfig, cost: u32) -> AppResult<Self> {
        let password_hash = match (&account.password_hash, &account.password) {
            (Some(existing), _) => existing.clone(),
            (None, Some(password)) => hash(password, cost)
                .map_err(|e| AppError::Configuration(format!("Password hashing failed: {}", e)))?,
            (None, None) => {
                return Err(AppError::Configuration(
                    "no password configured for the dashboard account".to_string(),
                ))
            }
        };

        Ok(Self {
            jwt_secret: jwt.secret.clone(),
            access_token_expiry: jwt.access_token_expiry,
            username: account.username.clone(),
            password_hash,
            display_name: account.display_name.clone(),
        })
    }

    /// The account this server knows about
    pub fn user(&self) -> User {
        User {
            id: USER_ID.to_string(),
            name: self.display_name.clone(),
            username: self.username.clone(),
            role: UserRole::Farmer,
            preferred_language: Language::Indonesian,
        }
    }

    /// Authenticate with username and password
    pub fn login(&self, username: &str, password: &str) -> AppResult<AuthTokens> {
        if username.trim() != self.username {
            return Err(AppError::InvalidCredentials);
        }

        let valid = verify(password, &self.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("User {} logged in", self.username);
        self.generate_tokens()
    }

    /// Validate access token and return claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }

    fn generate_tokens(&self) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let access_exp = now + Duration::seconds(self.access_token_expiry);
        let user = self.user();

        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
            jti: Uuid::new_v4().to_string(),
            exp: access_exp.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn account(password: Option<&str>, password_hash: Option<String>) -> AuthConfig {
        AuthConfig {
            username: "petani".to_string(),
            password: password.map(str::to_string),
            password_hash,
            display_name: "Petani Indonesia".to_string(),
        }
    }

    fn service() -> AuthService {
        AuthService::with_cost(&jwt(), &account(Some("petani123"), None), 4).unwrap()
    }

    #[test]
    fn test_login_issues_verifiable_token() {
        let auth = service();
        let tokens = auth.login("petani", "petani123").unwrap();
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.user.name, "Petani Indonesia");

        let claims = auth.validate_token(&tokens.access_token).unwrap();
        assert_eq!(claims.username, "petani");
        assert_eq!(claims.role, UserRole::Farmer);
    }

    #[test]
    fn test_wrong_credentials() {
        let auth = service();
        assert!(matches!(
            auth.login("petani", "salah"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("tamu", "petani123"),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_configured_hash_is_used() {
        let hashed = hash("rahasia-sawah", 4).unwrap();
        let auth = AuthService::new(&jwt(), &account(None, Some(hashed))).unwrap();
        assert!(auth.login("petani", "rahasia-sawah").is_ok());
    }

    #[test]
    fn test_missing_password_is_configuration_error() {
        assert!(matches!(
            AuthService::with_cost(&jwt(), &account(None, None), 4),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let auth = service();
        let tokens = auth.login("petani", "petani123").unwrap();
        let tampered = format!("{}x", tokens.access_token);
        assert!(matches!(
            auth.validate_token(&tampered),
            Err(AppError::InvalidToken)
        ));
    }
}
