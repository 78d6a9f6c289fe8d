//! Configuration options for the Lavka client

use std::path::PathBuf;
use std::time::Duration;

/// Configuration options for the Lavka client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout applied to every backend call
    pub request_timeout: Option<Duration>,

    /// Whether to persist the session to durable storage
    pub persist_session: bool,

    /// File the session is persisted to; `None` keeps the session in memory
    pub session_file: Option<PathBuf>,

    /// How long a debounced validation waits before firing
    pub debounce_interval: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            persist_session: true,
            session_file: None,
            debounce_interval: Duration::from_millis(300),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set whether to persist the session
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }

    /// Set the file the session is persisted to
    pub fn with_session_file(mut self, value: impl Into<PathBuf>) -> Self {
        self.session_file = Some(value.into());
        self
    }

    /// Set the debounce interval for validation checks
    pub fn with_debounce_interval(mut self, value: Duration) -> Self {
        self.debounce_interval = value;
        self
    }
}
