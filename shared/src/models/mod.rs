//! Domain models for the Pranata Mangsa dashboard

mod location;
mod mangsa;
mod prediction;
mod reminder;
mod user;
mod weather;

pub use location::*;
pub use mangsa::*;
pub use prediction::*;
pub use reminder::*;
pub use user::*;
pub use weather::*;
