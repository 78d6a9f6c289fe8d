//! Order store: checkout and order management

mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;
use reqwest::Client;
use serde_json::json;

use crate::basket::BasketClient;
use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::loading::LoadingGuard;
use crate::session::Session;

pub use types::*;

/// Client for order operations.
///
/// Checkout reads the basket store it was constructed with: an order is
/// only created from a non-empty basket, and a successful creation clears
/// the basket's local state (the backend consumes the server-side cart as
/// part of creating the order).
#[derive(Clone)]
pub struct OrdersClient {
    /// Base path of the storefront API
    base_url: String,

    /// HTTP client used for requests
    client: Client,

    /// The held orders
    orders: Arc<Mutex<Vec<Order>>>,

    /// Shared session, read for the bearer token and role
    session: Arc<Mutex<Option<Session>>>,

    /// The basket store checkout draws from
    basket: BasketClient,

    /// Advisory loading flag
    loading: Arc<AtomicBool>,

    /// Client options
    options: ClientOptions,
}

impl OrdersClient {
    /// Create a new OrdersClient
    pub fn new(
        base_url: &str,
        client: Client,
        session: Arc<Mutex<Option<Session>>>,
        basket: BasketClient,
        options: ClientOptions,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            orders: Arc::new(Mutex::new(Vec::new())),
            session,
            basket,
            loading: Arc::new(AtomicBool::new(false)),
            options,
        }
    }

    fn orders_url(&self, path: &str) -> String {
        format!("{}/orders{}", self.base_url, path)
    }

    fn require_token(&self) -> Result<String, Error> {
        let current = self.session.lock().unwrap();
        current
            .as_ref()
            .map(|session| session.token.clone())
            .ok_or_else(|| Error::auth("sign in to manage orders"))
    }

    fn is_admin(&self) -> bool {
        let current = self.session.lock().unwrap();
        current
            .as_ref()
            .map(|session| session.user.is_admin())
            .unwrap_or(false)
    }

    /// Create an order from the current basket contents.
    ///
    /// Rejected without a request when the basket is empty. On success the
    /// basket's local state is cleared and the canonical order, status
    /// `pending`, is appended to the held collection.
    pub async fn create_order(&self, shipping_address: &str) -> Result<Order, Error> {
        let token = self.require_token()?;
        if self.basket.entries().is_empty() {
            return Err(Error::validation("basket", "the basket is empty"));
        }

        let _guard = LoadingGuard::hold(&self.loading);
        debug!("creating order");

        let order = Fetch::post(&self.client, &self.orders_url(""))
            .timeout(self.options.request_timeout)
            .bearer_auth(&token)
            .json(&json!({ "shippingAddress": shipping_address }))?
            .execute::<Order>()
            .await?;

        self.basket.reset_local();

        let mut held = self.orders.lock().unwrap();
        held.push(order.clone());

        Ok(order)
    }

    /// Set an order's status.
    ///
    /// Admin-only by convention of the surrounding UI; no transition
    /// validation happens here, the backend has the final word. The held
    /// entry is patched after the backend confirms, so overlapping calls
    /// converge to whichever response arrives last.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> Result<(), Error> {
        let token = self.require_token()?;
        debug!("setting order {} to {}", id, status);

        Fetch::put(&self.client, &self.orders_url(&format!("/{}/status", id)))
            .timeout(self.options.request_timeout)
            .bearer_auth(&token)
            .json(&json!({ "status": status }))?
            .execute_empty()
            .await?;

        let mut held = self.orders.lock().unwrap();
        if let Some(order) = held.iter_mut().find(|order| order.id == id) {
            order.status = status;
        }

        Ok(())
    }

    /// Fetch the current user's orders and replace the held collection
    pub async fn list_mine(&self) -> Result<Vec<Order>, Error> {
        let token = self.require_token()?;
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("listing own orders");

        let fetched = Fetch::get(&self.client, &self.orders_url("/my"))
            .timeout(self.options.request_timeout)
            .bearer_auth(&token)
            .execute::<Vec<Order>>()
            .await?;

        let mut held = self.orders.lock().unwrap();
        *held = fetched.clone();

        Ok(fetched)
    }

    /// Fetch every order and replace the held collection.
    ///
    /// Requires the administrator role; a plain identity is rejected
    /// before any request is made.
    pub async fn list_all(&self) -> Result<Vec<Order>, Error> {
        let token = self.require_token()?;
        if !self.is_admin() {
            return Err(Error::auth("administrator role required"));
        }

        let _guard = LoadingGuard::hold(&self.loading);
        debug!("listing all orders");

        let fetched = Fetch::get(&self.client, &self.orders_url(""))
            .timeout(self.options.request_timeout)
            .bearer_auth(&token)
            .execute::<Vec<Order>>()
            .await?;

        let mut held = self.orders.lock().unwrap();
        *held = fetched.clone();

        Ok(fetched)
    }

    /// Snapshot of the held orders
    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }

    /// Whether an order call is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}
