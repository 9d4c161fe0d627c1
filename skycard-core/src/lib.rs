//! Core library for the `skycard` weather lookup tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap current-weather client
//! - The query controller and its `Idle -> Loading -> Success | Error` lifecycle
//! - Card presentation and the local clock ticker
//!
//! It is used by `skycard-cli`, but can also be reused by other front ends.

pub mod card;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod provider;

pub use card::{ConditionKind, Gradient, WeatherCard};
pub use clock::ClockTicker;
pub use config::Config;
pub use controller::{PendingQuery, QueryController, QueryState};
pub use error::{FailureKind, FetchError};
pub use model::{Condition, Conditions, Temperatures, WeatherSnapshot};
pub use provider::{OpenWeatherProvider, WeatherProvider};
