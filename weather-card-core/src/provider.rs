use crate::{Config, FetchError, WeatherReading, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Source of current conditions for a place name.
///
/// The widget only ever talks to OpenWeather; the trait is the seam the
/// runtime is written against so it can be driven by a scripted source.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, place: &str) -> Result<WeatherReading, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    Ok(Arc::new(OpenWeatherProvider::with_base_url(
        api_key.to_owned(),
        config.base_url.clone(),
    )))
}
