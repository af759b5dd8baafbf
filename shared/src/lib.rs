//! Shared types and domain logic for the Pranata Mangsa dashboard
//!
//! This crate holds the traditional Javanese farming calendar, the date
//! resolver, the reconciliation of model predictions with the calendar, and
//! the weather shaping used by the backend and the browser (via WASM).

pub mod calendar;
pub mod models;
pub mod reconciler;
pub mod resolver;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
