use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    config::{Config, DEFAULT_BASE_URL},
    error::FetchError,
    model::{Condition, Conditions, Temperatures, WeatherSnapshot},
};

use super::WeatherProvider;

/// OpenWeatherMap current-weather client.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Build a provider from config, with the request timeout applied.
    pub fn from_config(config: &Config, api_key: String) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        tracing::debug!(city, url = %self.base_url, "requesting current weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        match status {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized),
            _ => {}
        }

        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        parsed.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct OwSys {
    // Not part of the documented response; kept as the card's region label.
    state: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    feels_like: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    timezone: i32,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: u32,
}

impl TryFrom<OwCurrentResponse> for WeatherSnapshot {
    type Error = FetchError;

    fn try_from(raw: OwCurrentResponse) -> Result<Self, Self::Error> {
        let conditions = raw
            .weather
            .into_iter()
            .map(|w| Condition {
                main: w.main,
                description: w.description,
                icon: w.icon,
            })
            .collect();
        let conditions = Conditions::new(conditions).ok_or(FetchError::NoConditions)?;

        Ok(WeatherSnapshot {
            location_name: raw.name,
            region: raw.sys.state,
            timezone_offset_secs: raw.timezone,
            temperature: Temperatures {
                current_c: raw.main.temp,
                min_c: raw.main.temp_min,
                max_c: raw.main.temp_max,
                feels_like_c: raw.main.feels_like,
            },
            humidity_pct: raw.main.humidity,
            pressure_hpa: raw.main.pressure,
            conditions,
            wind_speed_mps: raw.wind.speed,
            visibility_m: raw.visibility,
            sunrise: unix_to_utc(raw.sys.sunrise)?,
            sunset: unix_to_utc(raw.sys.sunset)?,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        self.fetch_current(city).await
    }
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, FetchError> {
    DateTime::from_timestamp(ts, 0).ok_or(FetchError::InvalidTimestamp(ts))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
