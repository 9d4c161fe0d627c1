use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weather condition entry as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Category label, e.g. "Rain" or "Clouds".
    pub main: String,
    pub description: String,
    /// Provider icon identifier, e.g. "10d".
    pub icon: String,
}

/// Ordered, non-empty list of conditions. Only the first one is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Condition>", into = "Vec<Condition>")]
pub struct Conditions(Vec<Condition>);

impl Conditions {
    /// Returns `None` for an empty list.
    pub fn new(entries: Vec<Condition>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self(entries))
        }
    }

    pub fn primary(&self) -> &Condition {
        &self.0[0]
    }

    pub fn as_slice(&self) -> &[Condition] {
        &self.0
    }
}

impl TryFrom<Vec<Condition>> for Conditions {
    type Error = &'static str;

    fn try_from(value: Vec<Condition>) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("weather condition list must not be empty")
    }
}

impl From<Conditions> for Vec<Condition> {
    fn from(value: Conditions) -> Self {
        value.0
    }
}

/// Temperatures in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    pub current_c: f64,
    pub min_c: f64,
    pub max_c: f64,
    pub feels_like_c: f64,
}

/// One fetched weather result for a single query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    /// Read from `sys.state`, which the provider does not document. Usually absent.
    pub region: Option<String>,
    /// Offset from UTC in seconds at the queried location.
    pub timezone_offset_secs: i32,
    pub temperature: Temperatures,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub conditions: Conditions,
    pub wind_speed_mps: f64,
    pub visibility_m: u32,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn condition(&self) -> &Condition {
        self.conditions.primary()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn condition(main: &str) -> Condition {
        Condition {
            main: main.to_string(),
            description: format!("{} description", main.to_lowercase()),
            icon: "10d".to_string(),
        }
    }

    pub(crate) fn sample_snapshot(main: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: "Delhi".to_string(),
            region: None,
            timezone_offset_secs: 19_800,
            temperature: Temperatures {
                current_c: 31.4,
                min_c: 29.6,
                max_c: 33.5,
                feels_like_c: 34.5,
            },
            humidity_pct: 48,
            pressure_hpa: 1008,
            conditions: Conditions::new(vec![condition(main)]).expect("non-empty"),
            wind_speed_mps: 3.6,
            visibility_m: 10_000,
            sunrise: DateTime::from_timestamp(1_700_000_000, 0).expect("valid ts"),
            sunset: DateTime::from_timestamp(1_700_040_000, 0).expect("valid ts"),
        }
    }

    #[test]
    fn empty_conditions_are_rejected() {
        assert!(Conditions::new(Vec::new()).is_none());
    }

    #[test]
    fn primary_is_first_entry() {
        let conditions = Conditions::new(vec![condition("Rain"), condition("Mist")]).unwrap();
        assert_eq!(conditions.primary().main, "Rain");
        assert_eq!(conditions.as_slice().len(), 2);
    }

    #[test]
    fn deserializing_empty_conditions_fails() {
        let mut value = serde_json::to_value(sample_snapshot("Clear")).unwrap();
        value["conditions"] = serde_json::json!([]);

        let err = serde_json::from_value::<WeatherSnapshot>(value).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn snapshot_json_keeps_condition_list() {
        let snapshot = sample_snapshot("Snow");
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: WeatherSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.condition().main, "Snow");
    }
}
