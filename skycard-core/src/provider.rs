use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::FetchError, model::WeatherSnapshot};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current-weather snapshots.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;
}
