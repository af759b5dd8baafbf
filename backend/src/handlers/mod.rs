//! HTTP handlers

pub mod auth;
pub mod health;
pub mod location;
pub mod mangsa;
pub mod weather;

pub use auth::*;
pub use health::*;
pub use location::*;
pub use mangsa::*;
pub use weather::*;
