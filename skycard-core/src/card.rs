//! Presentation of a [`WeatherSnapshot`] as a card.
//!
//! Everything here is a pure function of the snapshot plus the time inputs the
//! caller hands in, so the same snapshot always renders the same card.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt::{self, Display};

use crate::{
    clock::{format_clock, weekday_clock_label},
    model::WeatherSnapshot,
};

/// Closed set of condition categories the card styles differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionKind {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    Other,
}

impl ConditionKind {
    /// Case-insensitive match on the provider's category label.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "clear" => ConditionKind::Clear,
            "clouds" => ConditionKind::Clouds,
            "rain" => ConditionKind::Rain,
            "snow" => ConditionKind::Snow,
            "thunderstorm" => ConditionKind::Thunderstorm,
            _ => ConditionKind::Other,
        }
    }

    pub fn gradient(self) -> Gradient {
        match self {
            ConditionKind::Clear => Gradient::new("yellow-400", "orange-500"),
            ConditionKind::Clouds => Gradient::new("gray-400", "gray-600"),
            ConditionKind::Rain => Gradient::new("blue-400", "blue-600"),
            ConditionKind::Snow => Gradient::new("blue-200", "blue-400"),
            ConditionKind::Thunderstorm => Gradient::new("purple-400", "purple-700"),
            ConditionKind::Other => Gradient::new("blue-400", "blue-600"),
        }
    }
}

/// Header background, as a pair of palette tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub from: &'static str,
    pub to: &'static str,
}

impl Gradient {
    const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }
}

impl Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Display-ready fields of one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherCard {
    pub title: String,
    pub description: String,
    pub clock_label: String,
    pub kind: ConditionKind,
    pub gradient: Gradient,
    pub icon_url: String,
    pub temperature: String,
    pub feels_like: String,
    pub min_max: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
    pub pressure: String,
    pub sunrise: String,
    pub sunset: String,
    pub condition_badge: String,
}

impl WeatherCard {
    /// `tz` is the zone sunrise/sunset are shown in; the clock label always uses
    /// the snapshot's own offset.
    pub fn build<Tz>(
        snapshot: &WeatherSnapshot,
        icon_base_url: &str,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let condition = snapshot.condition();
        let kind = ConditionKind::from_label(&condition.main);
        let temps = &snapshot.temperature;

        let title = match &snapshot.region {
            Some(region) => format!("{}, {}", snapshot.location_name, region),
            None => snapshot.location_name.clone(),
        };

        Self {
            title,
            description: condition.description.clone(),
            clock_label: weekday_clock_label(now, snapshot.timezone_offset_secs),
            kind,
            gradient: kind.gradient(),
            icon_url: icon_url(icon_base_url, &condition.icon),
            temperature: format!("{}°C", round_half_up(temps.current_c)),
            feels_like: format!("Feels like {}°C", round_half_up(temps.feels_like_c)),
            min_max: format!(
                "{}° / {}°",
                round_half_up(temps.min_c),
                round_half_up(temps.max_c)
            ),
            humidity: format!("{}%", snapshot.humidity_pct),
            wind: format!("{} m/s", snapshot.wind_speed_mps),
            visibility: format_visibility(snapshot.visibility_m),
            pressure: format!("{} hPa", snapshot.pressure_hpa),
            sunrise: format_clock(snapshot.sunrise, tz),
            sunset: format_clock(snapshot.sunset, tz),
            condition_badge: format!("Weather condition: {}", condition.main),
        }
    }

    pub fn set_clock_label(&mut self, label: String) {
        self.clock_label = label;
    }
}

impl Display for WeatherCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "  {}", self.description)?;
        writeln!(f, "  {}", self.clock_label)?;
        writeln!(f, "  {}  ({})", self.temperature, self.feels_like)?;
        writeln!(f, "  Icon: {}", self.icon_url)?;
        writeln!(f)?;

        let rows = [
            ("Min/Max", &self.min_max),
            ("Humidity", &self.humidity),
            ("Wind", &self.wind),
            ("Visibility", &self.visibility),
            ("Pressure", &self.pressure),
            ("Sunrise", &self.sunrise),
            ("Sunset", &self.sunset),
        ];
        for (label, value) in rows {
            writeln!(f, "  {label:<11}{value}")?;
        }

        writeln!(f)?;
        write!(f, "  {}", self.condition_badge)
    }
}

pub fn icon_url(icon_base_url: &str, icon: &str) -> String {
    format!("{}/{}@4x.png", icon_base_url.trim_end_matches('/'), icon)
}

/// Meters shown as kilometers with one decimal, e.g. "10.0 km".
pub fn format_visibility(meters: u32) -> String {
    format!("{:.1} km", f64::from(meters) / 1000.0)
}

/// Rounds .5 towards positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DEFAULT_ICON_BASE_URL, model::tests::sample_snapshot};

    fn card_for(main: &str) -> WeatherCard {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        WeatherCard::build(&sample_snapshot(main), DEFAULT_ICON_BASE_URL, &Utc, now)
    }

    #[test]
    fn rain_selects_rain_gradient_and_badge() {
        let card = card_for("Rain");

        assert_eq!(card.kind, ConditionKind::Rain);
        assert_eq!(card.gradient, Gradient::new("blue-400", "blue-600"));
        assert_eq!(card.condition_badge, "Weather condition: Rain");
        assert!(card.to_string().contains("Weather condition: Rain"));
    }

    #[test]
    fn condition_labels_are_case_insensitive() {
        assert_eq!(ConditionKind::from_label("CLEAR"), ConditionKind::Clear);
        assert_eq!(ConditionKind::from_label("clouds"), ConditionKind::Clouds);
        assert_eq!(ConditionKind::from_label("Thunderstorm"), ConditionKind::Thunderstorm);
        assert_eq!(ConditionKind::from_label("Mist"), ConditionKind::Other);
        assert_eq!(
            ConditionKind::Other.gradient(),
            ConditionKind::Rain.gradient()
        );
        assert_eq!(
            ConditionKind::Snow.gradient().to_string(),
            "blue-200 -> blue-400"
        );
    }

    #[test]
    fn fields_are_formatted_from_snapshot() {
        let card = card_for("Clear");

        assert_eq!(card.title, "Delhi");
        assert_eq!(card.temperature, "31°C");
        assert_eq!(card.feels_like, "Feels like 35°C");
        assert_eq!(card.min_max, "30° / 34°");
        assert_eq!(card.humidity, "48%");
        assert_eq!(card.wind, "3.6 m/s");
        assert_eq!(card.pressure, "1008 hPa");
        assert_eq!(card.visibility, "10.0 km");
        assert_eq!(card.sunrise, "10:13 PM");
        assert_eq!(card.clock_label, "Wednesday, 03:43 AM");
        assert_eq!(card.icon_url, "https://openweathermap.org/img/wn/10d@4x.png");
    }

    #[test]
    fn title_includes_region_when_present() {
        let mut snapshot = sample_snapshot("Clear");
        snapshot.region = Some("NCT".into());
        let card = WeatherCard::build(&snapshot, DEFAULT_ICON_BASE_URL, &Utc, Utc::now());
        assert_eq!(card.title, "Delhi, NCT");
    }

    #[test]
    fn visibility_keeps_one_decimal() {
        assert_eq!(format_visibility(10_000), "10.0 km");
        assert_eq!(format_visibility(8_460), "8.5 km");
        assert_eq!(format_visibility(0), "0.0 km");
    }

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(31.49), 31);
    }

    #[test]
    fn icon_url_tolerates_trailing_slash() {
        assert_eq!(
            icon_url("https://example.test/icons/", "01n"),
            "https://example.test/icons/01n@4x.png"
        );
    }

    #[test]
    fn clock_label_can_be_refreshed() {
        let mut card = card_for("Clear");
        card.set_clock_label("Friday, 01:00 PM".into());
        assert!(card.to_string().contains("Friday, 01:00 PM"));
    }
}
