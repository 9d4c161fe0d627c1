//! Query controller: owns the search text and the fetch lifecycle.
//!
//! The lifecycle is `Idle -> Loading -> {Success | Error}`. Any submit restarts
//! at `Loading`, whatever the current state is.

use crate::{
    error::{EMPTY_QUERY_MESSAGE, FailureKind, FetchError},
    model::WeatherSnapshot,
    provider::WeatherProvider,
};

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Idle,
    Loading,
    Success(WeatherSnapshot),
    Error(String),
}

/// A validated query that is about to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub city: String,
}

#[derive(Debug)]
pub struct QueryController<P> {
    provider: P,
    query_text: String,
    state: QueryState,
}

impl<P: WeatherProvider> QueryController<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            query_text: String::new(),
            state: QueryState::Idle,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query_text
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match &self.state {
            QueryState::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            QueryState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, QueryState::Loading)
    }

    /// Initial query issued when the view first appears.
    pub async fn mount(&mut self, default_city: &str) -> &QueryState {
        self.set_query(default_city);
        self.submit().await
    }

    /// Validate the query text and issue one request for it.
    pub async fn submit(&mut self) -> &QueryState {
        if let Some(pending) = self.begin_submit() {
            let result = self.provider.current_weather(&pending.city).await;
            self.settle(result);
        }
        &self.state
    }

    /// First half of [`submit`](Self::submit): validates the query text and enters
    /// `Loading`. Returns `None` (and records the validation error) for blank input.
    pub fn begin_submit(&mut self) -> Option<PendingQuery> {
        if self.query_text.trim().is_empty() {
            self.state = QueryState::Error(EMPTY_QUERY_MESSAGE.to_string());
            return None;
        }

        self.state = QueryState::Loading;
        Some(PendingQuery {
            city: self.query_text.clone(),
        })
    }

    /// Second half of [`submit`](Self::submit). The last call wins.
    pub fn settle(&mut self, result: Result<WeatherSnapshot, FetchError>) {
        self.state = match result {
            Ok(snapshot) => {
                tracing::debug!(location = %snapshot.location_name, "weather lookup succeeded");
                QueryState::Success(snapshot)
            }
            Err(err) => {
                match err.kind() {
                    FailureKind::NotFound | FailureKind::Unauthorized => {
                        tracing::debug!(error = %err, "weather lookup failed")
                    }
                    FailureKind::Provider => {
                        tracing::warn!(error = %err, "weather lookup failed")
                    }
                }
                QueryState::Error(err.user_message().to_string())
            }
        };
    }
}
