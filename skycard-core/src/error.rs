use reqwest::StatusCode;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a city name";
pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found. Please check the spelling and try again.";
pub const INVALID_API_KEY_MESSAGE: &str =
    "Invalid API key. Please check your OpenWeatherMap API key.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

/// Coarse classification of a failed lookup, used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Unauthorized,
    /// Anything else: other statuses, unusable bodies, connect errors, timeouts.
    Provider,
}

impl FailureKind {
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::NotFound => CITY_NOT_FOUND_MESSAGE,
            FailureKind::Unauthorized => INVALID_API_KEY_MESSAGE,
            FailureKind::Provider => FETCH_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("city not found")]
    NotFound,

    #[error("provider rejected the API key")]
    Unauthorized,

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("provider response contained no weather conditions")]
    NoConditions,

    #[error("provider response contained an invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::NotFound => FailureKind::NotFound,
            FetchError::Unauthorized => FailureKind::Unauthorized,
            FetchError::Status { .. }
            | FetchError::Transport(_)
            | FetchError::Decode(_)
            | FetchError::NoConditions
            | FetchError::InvalidTimestamp(_) => FailureKind::Provider,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}
