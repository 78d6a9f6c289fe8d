//! Field validation and debounced remote checks

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::fetch::Fetch;

/// Outcome of a single field check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the field passed
    pub is_valid: bool,
    /// Inline message to show next to the field
    pub message: String,
}

impl ValidationResult {
    fn pass(message: &str) -> Self {
        Self {
            is_valid: true,
            message: message.to_string(),
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            is_valid: false,
            message: message.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct AvailabilityBody {
    available: bool,
}

/// Field validators backing the sign-up and admin forms
#[derive(Clone)]
pub struct Validator {
    base_url: String,
    client: Client,
}

impl Validator {
    /// Create a new Validator
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    /// Check username availability against the backend.
    ///
    /// An unreachable or rejecting endpoint degrades to a pass so sign-up
    /// is never blocked by the check itself.
    pub async fn username(&self, username: &str) -> ValidationResult {
        if username.chars().count() < 2 {
            return ValidationResult::fail("username must be at least 2 characters");
        }

        let url = format!("{}/auth/check-username", self.base_url);
        let checked = match Fetch::post(&self.client, &url).json(&json!({ "username": username })) {
            Ok(request) => request.execute::<AvailabilityBody>().await,
            Err(err) => Err(err),
        };

        match checked {
            Ok(body) if body.available => ValidationResult::pass("username is available"),
            Ok(_) => ValidationResult::fail("username is already taken"),
            Err(err) => {
                debug!("username check unavailable, passing locally: {}", err);
                ValidationResult::pass("check skipped")
            }
        }
    }

    /// Check a password against the local strength rules
    pub fn password(&self, password: &str) -> ValidationResult {
        if password.chars().count() < 6 {
            return ValidationResult::fail("password must be at least 6 characters");
        }
        if !password.chars().any(char::is_uppercase) {
            return ValidationResult::fail("password must contain an uppercase letter");
        }
        if !password.chars().any(char::is_lowercase) {
            return ValidationResult::fail("password must contain a lowercase letter");
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return ValidationResult::fail("password must contain a digit");
        }
        ValidationResult::pass("password meets the requirements")
    }

    /// Check a price entered as text
    pub fn price(&self, price: &str) -> ValidationResult {
        let parsed: f64 = match price.trim().parse() {
            Ok(value) => value,
            Err(_) => return ValidationResult::fail("price must be a number"),
        };
        if !parsed.is_finite() {
            return ValidationResult::fail("price must be a number");
        }
        if parsed <= 0.0 {
            return ValidationResult::fail("price must be greater than 0");
        }
        if parsed > 1_000_000.0 {
            return ValidationResult::fail("price must not exceed 1,000,000");
        }
        ValidationResult::pass("price looks good")
    }
}

/// Debounced scheduling for validation-on-keystroke.
///
/// Each `schedule` aborts the previous pending check and starts a fresh
/// timer task, so only the last keystroke's check ever runs.
pub struct Debounce {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debounce {
    /// Create a debouncer with the given delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule a task to run after the delay, cancelling any pending one
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            task.await;
        });

        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Cancel the pending task, if any
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debounce {
    fn drop(&mut self) {
        self.cancel();
    }
}
