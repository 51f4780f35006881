//! Core library for the `weather` card.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather fetcher
//! - The widget state machine and the runtime that drives its timers
//! - Icon selection and the text presenter
//!
//! It is used by `weather-card-cli`, but the state machine and presenter
//! don't care what kind of terminal or window ends up showing them.

pub mod config;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;
pub mod render;
pub mod runtime;
pub mod widget;

pub use config::{Config, Timings};
pub use error::FetchError;
pub use icon::Icon;
pub use model::{Condition, WeatherReading};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use runtime::{Runtime, Surface};
pub use widget::{Action, Effect, View, WidgetState};
