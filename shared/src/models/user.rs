//! User models

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// The dashboard user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub role: UserRole,
    #[serde(default)]
    pub preferred_language: Language,
}

/// Roles known to the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Farmer,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Farmer => write!(f, "farmer"),
        }
    }
}
