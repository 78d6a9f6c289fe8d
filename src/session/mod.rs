//! Session store: authentication and the current identity

mod storage;
mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;
use reqwest::Client;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::loading::LoadingGuard;

pub use storage::*;
pub use types::*;

/// Client for authentication and session state.
///
/// Holds the current identity in memory (shared with the other stores,
/// which read the bearer token from it) and mirrors it to durable storage
/// so the identity survives a restart.
#[derive(Clone)]
pub struct SessionClient {
    /// Base path of the storefront API
    base_url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session, shared with the other stores
    session: Arc<Mutex<Option<Session>>>,

    /// Durable storage for the session
    storage: Arc<dyn SessionStorage>,

    /// Advisory loading flag
    loading: Arc<AtomicBool>,

    /// Client options
    options: ClientOptions,
}

impl SessionClient {
    /// Create a new SessionClient
    pub fn new(
        base_url: &str,
        client: Client,
        session: Arc<Mutex<Option<Session>>>,
        storage: Arc<dyn SessionStorage>,
        options: ClientOptions,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            session,
            storage,
            loading: Arc::new(AtomicBool::new(false)),
            options,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth{}", self.base_url, path)
    }

    /// Sign in with username and password.
    ///
    /// On success the returned session is stored in memory and persisted.
    /// On failure nothing is mutated; the stored identity (if any) stays.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<User, Error> {
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("signing in as {}", credentials.username);

        let response = Fetch::post(&self.client, &self.auth_url("/login"))
            .timeout(self.options.request_timeout)
            .json(credentials)?
            .execute::<AuthResponse>()
            .await?;

        self.store_session(Session {
            token: response.token,
            user: response.user.clone(),
        });

        Ok(response.user)
    }

    /// Register a new account and sign it in
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<User, Error> {
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("registering {}", credentials.username);

        let response = Fetch::post(&self.client, &self.auth_url("/register"))
            .timeout(self.options.request_timeout)
            .json(credentials)?
            .execute::<AuthResponse>()
            .await?;

        self.store_session(Session {
            token: response.token,
            user: response.user.clone(),
        });

        Ok(response.user)
    }

    /// Sign out the current user.
    ///
    /// Clears memory and durable storage synchronously; no backend
    /// confirmation is requested.
    pub fn sign_out(&self) {
        {
            let mut current = self.session.lock().unwrap();
            *current = None;
        }
        self.storage.clear();
        debug!("signed out");
    }

    /// Restore the persisted session into memory, returning its identity.
    ///
    /// The token is not re-validated against the backend; it is trusted
    /// until the first rejected call.
    pub fn restore(&self) -> Option<User> {
        let stored = self.storage.load()?;
        let user = stored.user.clone();
        let mut current = self.session.lock().unwrap();
        *current = Some(stored);
        Some(user)
    }

    fn store_session(&self, session: Session) {
        if self.options.persist_session {
            self.storage.save(&session);
        }
        let mut current = self.session.lock().unwrap();
        *current = Some(session);
    }

    /// Get the current identity
    pub fn current_user(&self) -> Option<User> {
        let current = self.session.lock().unwrap();
        current.as_ref().map(|session| session.user.clone())
    }

    /// Get the current bearer token
    pub fn token(&self) -> Option<String> {
        let current = self.session.lock().unwrap();
        current.as_ref().map(|session| session.token.clone())
    }

    /// Whether an identity is currently held
    pub fn is_authenticated(&self) -> bool {
        self.session.lock().unwrap().is_some()
    }

    /// Whether the current identity carries the administrator role
    pub fn is_admin(&self) -> bool {
        let current = self.session.lock().unwrap();
        current
            .as_ref()
            .map(|session| session.user.is_admin())
            .unwrap_or(false)
    }

    /// Whether a sign-in or sign-up call is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}
