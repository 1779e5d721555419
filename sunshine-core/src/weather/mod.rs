//! Weather data shown on the face

pub mod icon;
pub mod snapshot;

pub use icon::{IconArt, WeatherIcon};
pub use snapshot::{WeatherSnapshot, WeatherUpdate};
