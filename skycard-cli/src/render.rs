use colored::{Color, Colorize};
use skycard_core::{ConditionKind, WeatherCard};

fn accent(kind: ConditionKind) -> Color {
    match kind {
        ConditionKind::Clear => Color::Yellow,
        ConditionKind::Clouds => Color::BrightBlack,
        ConditionKind::Rain | ConditionKind::Other => Color::Blue,
        ConditionKind::Snow => Color::BrightCyan,
        ConditionKind::Thunderstorm => Color::Magenta,
    }
}

pub fn banner() {
    println!("{}", "Weather App".bold());
    println!("Get real-time weather information for any city worldwide\n");
}

pub fn card(card: &WeatherCard) {
    let text = card.to_string();
    let mut lines = text.lines();

    // Title line carries the condition accent, the rest is printed as-is.
    if let Some(title) = lines.next() {
        println!("{}", title.color(accent(card.kind)).bold());
    }
    for line in lines {
        println!("{line}");
    }
    println!();
}

/// Refreshed local time for the card on screen.
pub fn clock(label: &str) {
    println!("{}", format!("Local time there: {label}").dimmed());
}

pub fn loading() {
    println!("{}", "Loading...".dimmed());
}

pub fn error(message: &str) {
    eprintln!("{}", message.red());
}

/// Shown whenever there is nothing to display and nothing in flight.
pub fn welcome() {
    println!("{}", "Welcome to Weather App".blue().bold());
    println!(
        "Enter a city name to get started with real-time weather information. \
         You'll see temperature, humidity, wind speed, and much more!"
    );
    println!(
        "{}\n",
        "Note: you'll need an OpenWeatherMap API key (`skycard configure`).".dimmed()
    );
}
