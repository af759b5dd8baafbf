//! Business logic services for the Pranata Mangsa server

pub mod auth;
pub mod mangsa;
pub mod weather;

pub use auth::AuthService;
pub use mangsa::MangsaService;
pub use weather::WeatherService;
