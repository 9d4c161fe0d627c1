use anyhow::{Context, anyhow};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use skycard_core::{
    ClockTicker, Config, OpenWeatherProvider, QueryController, QueryState, WeatherCard,
    WeatherProvider,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycard", version, about = "Current weather for any city")]
pub struct Cli {
    /// OpenWeatherMap API key; overrides the configured one.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default city.
    Configure,

    /// Look up one city and print the result.
    Show {
        /// City name; the configured default city if absent.
        city: Option<String>,

        /// Print the raw snapshot as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },

    /// Show the default city, then prompt for more cities until Esc/Ctrl-C.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Interactive);

        // `configure` must still work when the existing file is broken.
        let mut config = match command {
            Command::Configure => Config::load_or_default()?,
            _ => Config::load()?,
        };

        match command {
            Command::Configure => configure(&mut config),
            Command::Show { city, json } => {
                let provider = build_provider(&config, self.api_key)?;
                let city = city.unwrap_or_else(|| config.default_city.clone());
                show(&config, provider, &city, json).await
            }
            Command::Interactive => {
                let provider = build_provider(&config, self.api_key)?;
                interactive(&config, provider).await
            }
        }
    }
}

fn build_provider(config: &Config, api_key: Option<String>) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = match api_key {
        Some(key) => key,
        None => config.api_key()?.to_owned(),
    };
    OpenWeatherProvider::from_config(config, api_key)
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    config.set_api_key(api_key.trim().to_string());
    if !default_city.trim().is_empty() {
        config.default_city = default_city.trim().to_string();
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show<P: WeatherProvider>(
    config: &Config,
    provider: P,
    city: &str,
    json: bool,
) -> anyhow::Result<()> {
    let mut controller = QueryController::new(provider);

    match controller.mount(city).await {
        QueryState::Success(snapshot) if json => {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        }
        QueryState::Success(snapshot) => {
            render::card(&WeatherCard::build(
                snapshot,
                &config.icon_base_url,
                &Local,
                Utc::now(),
            ));
        }
        // A failed one-shot lookup exits non-zero.
        QueryState::Error(message) => return Err(anyhow!("{message}")),
        QueryState::Idle | QueryState::Loading => {}
    }

    Ok(())
}

async fn interactive<P: WeatherProvider>(config: &Config, provider: P) -> anyhow::Result<()> {
    let mut controller = QueryController::new(provider);
    let mut ticker: Option<ClockTicker> = None;

    render::banner();
    controller.set_query(config.default_city.clone());

    loop {
        if let Some(pending) = controller.begin_submit() {
            render::loading();
            let result = controller.provider().current_weather(&pending.city).await;
            controller.settle(result);
        }

        display(config, controller.state(), &mut ticker);

        let initial = controller.query().to_string();
        let help = ticker
            .as_ref()
            .map(|t| format!("Local time there: {}. Esc to quit.", t.label()))
            .unwrap_or_else(|| "Esc to quit.".to_string());

        let mut prompt = tokio::task::spawn_blocking(move || {
            Text::new("City:")
                .with_initial_value(&initial)
                .with_placeholder("e.g. London, New York, Tokyo")
                .with_help_message(&help)
                .prompt()
        });

        // Keep the displayed clock current while waiting for input.
        let input = loop {
            tokio::select! {
                input = &mut prompt => break input.context("Prompt task failed")?,
                label = next_tick(&mut ticker) => render::clock(&label),
            }
        };

        match input {
            Ok(text) => controller.set_query(text),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        }
    }

    if let Some(ticker) = ticker {
        ticker.stop();
    }
    Ok(())
}

/// Next refreshed clock label; never resolves when no card is shown.
async fn next_tick(ticker: &mut Option<ClockTicker>) -> String {
    if let Some(ticker) = ticker.as_mut() {
        if let Some(label) = ticker.next_label().await {
            return label;
        }
    }
    std::future::pending().await
}

/// Render `state`. The displayed card owns the clock ticker, so replacing the
/// card also drops (and stops) the previous ticker.
fn display(config: &Config, state: &QueryState, ticker: &mut Option<ClockTicker>) {
    *ticker = match state {
        QueryState::Success(snapshot) => {
            let ticker =
                ClockTicker::spawn(snapshot.timezone_offset_secs, config.clock_refresh());
            let mut card =
                WeatherCard::build(snapshot, &config.icon_base_url, &Local, Utc::now());
            card.set_clock_label(ticker.label());
            render::card(&card);
            Some(ticker)
        }
        QueryState::Error(message) => {
            render::error(message);
            render::welcome();
            None
        }
        QueryState::Idle => {
            render::welcome();
            None
        }
        QueryState::Loading => None,
    };
}
