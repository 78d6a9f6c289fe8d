//! Basket store: the authenticated user's selected items

mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;
use reqwest::Client;
use serde_json::json;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::loading::LoadingGuard;
use crate::session::Session;

pub use types::*;

/// Client for basket operations.
///
/// The basket only exists for an authenticated identity; every operation
/// checks the shared session first and rejects with an authentication
/// error, touching no state, when nobody is signed in.
///
/// After each mutating call the store reloads the authoritative basket
/// from the backend instead of trusting optimistic local state. This
/// trades a round-trip for consistency.
#[derive(Clone)]
pub struct BasketClient {
    /// Base path of the storefront API
    base_url: String,

    /// HTTP client used for requests
    client: Client,

    /// The held basket
    entries: Arc<Mutex<Vec<BasketEntry>>>,

    /// Shared session, read for the bearer token
    session: Arc<Mutex<Option<Session>>>,

    /// Advisory loading flag
    loading: Arc<AtomicBool>,

    /// Client options
    options: ClientOptions,
}

impl BasketClient {
    /// Create a new BasketClient
    pub fn new(
        base_url: &str,
        client: Client,
        session: Arc<Mutex<Option<Session>>>,
        options: ClientOptions,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            entries: Arc::new(Mutex::new(Vec::new())),
            session,
            loading: Arc::new(AtomicBool::new(false)),
            options,
        }
    }

    fn cart_url(&self, path: &str) -> String {
        format!("{}/cart{}", self.base_url, path)
    }

    fn require_token(&self) -> Result<String, Error> {
        let current = self.session.lock().unwrap();
        current
            .as_ref()
            .map(|session| session.token.clone())
            .ok_or_else(|| Error::auth("sign in to use the basket"))
    }

    async fn reload(&self, token: &str) -> Result<(), Error> {
        let fetched = Fetch::get(&self.client, &self.cart_url(""))
            .timeout(self.options.request_timeout)
            .bearer_auth(token)
            .execute::<Vec<BasketEntry>>()
            .await?;

        let mut held = self.entries.lock().unwrap();
        *held = fetched;

        Ok(())
    }

    /// Fetch the basket and replace the held collection
    pub async fn load(&self) -> Result<Vec<BasketEntry>, Error> {
        let token = self.require_token()?;
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("loading basket");

        let fetched = Fetch::get(&self.client, &self.cart_url(""))
            .timeout(self.options.request_timeout)
            .bearer_auth(&token)
            .execute::<Vec<BasketEntry>>()
            .await?;

        let mut held = self.entries.lock().unwrap();
        *held = fetched.clone();

        Ok(fetched)
    }

    /// Add a product to the basket.
    ///
    /// Repeated adds of the same product increment the quantity of its one
    /// entry; the backend merges and the reload reflects it.
    pub async fn add(&self, product_id: &str, quantity: u32) -> Result<(), Error> {
        let token = self.require_token()?;
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("adding {} x{} to basket", product_id, quantity);

        Fetch::post(&self.client, &self.cart_url(""))
            .timeout(self.options.request_timeout)
            .bearer_auth(&token)
            .json(&json!({ "productId": product_id, "quantity": quantity }))?
            .execute_empty()
            .await?;

        self.reload(&token).await
    }

    /// Add one unit of a product to the basket
    pub async fn add_one(&self, product_id: &str) -> Result<(), Error> {
        self.add(product_id, 1).await
    }

    /// Set the quantity of a basket entry.
    ///
    /// A quantity below 1 is a no-op; entries are never removed through
    /// this path, use [`remove`](Self::remove) instead.
    pub async fn update_quantity(&self, product_id: &str, quantity: u32) -> Result<(), Error> {
        let token = self.require_token()?;
        if quantity < 1 {
            return Ok(());
        }
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("setting {} quantity to {}", product_id, quantity);

        Fetch::put(&self.client, &self.cart_url(&format!("/{}", product_id)))
            .timeout(self.options.request_timeout)
            .bearer_auth(&token)
            .json(&json!({ "quantity": quantity }))?
            .execute_empty()
            .await?;

        self.reload(&token).await
    }

    /// Remove a basket entry
    pub async fn remove(&self, product_id: &str) -> Result<(), Error> {
        let token = self.require_token()?;
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("removing {} from basket", product_id);

        Fetch::delete(&self.client, &self.cart_url(&format!("/{}", product_id)))
            .timeout(self.options.request_timeout)
            .bearer_auth(&token)
            .execute_empty()
            .await?;

        self.reload(&token).await
    }

    /// Empty the basket; the held collection is cleared after the backend
    /// confirms
    pub async fn clear(&self) -> Result<(), Error> {
        let token = self.require_token()?;
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("clearing basket");

        Fetch::delete(&self.client, &self.cart_url(""))
            .timeout(self.options.request_timeout)
            .bearer_auth(&token)
            .execute_empty()
            .await?;

        let mut held = self.entries.lock().unwrap();
        held.clear();

        Ok(())
    }

    /// Drop local basket state without a backend call.
    ///
    /// Used after checkout, when the backend has already consumed the
    /// server-side cart while creating the order.
    pub(crate) fn reset_local(&self) {
        let mut held = self.entries.lock().unwrap();
        held.clear();
    }

    /// Snapshot of the held basket
    pub fn entries(&self) -> Vec<BasketEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Sum of unit price times quantity over the held basket
    pub fn total(&self) -> f64 {
        let held = self.entries.lock().unwrap();
        held.iter()
            .map(|entry| entry.price * f64::from(entry.quantity))
            .sum()
    }

    /// Total number of units in the held basket
    pub fn item_count(&self) -> u32 {
        let held = self.entries.lock().unwrap();
        held.iter().map(|entry| entry.quantity).sum()
    }

    /// Whether a basket call is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}
