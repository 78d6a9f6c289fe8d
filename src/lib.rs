//! Lavka Storefront Client Library
//!
//! A Rust client for the Lavka storefront REST backend. Four stores —
//! session, catalog, basket and orders — each hold a local copy of one
//! slice of application state and expose async operations that call the
//! backend and reconcile the held state with the response.

pub mod basket;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
mod loading;
pub mod orders;
pub mod session;
pub mod validate;

use std::sync::{Arc, Mutex};

use reqwest::Client;

use crate::basket::BasketClient;
use crate::catalog::CatalogClient;
use crate::config::ClientOptions;
use crate::orders::OrdersClient;
use crate::session::{FileStorage, MemoryStorage, Session, SessionClient, SessionStorage};
use crate::validate::{Debounce, Validator};

/// The main entry point for the Lavka client
pub struct Lavka {
    /// Base path of the storefront API, e.g. `http://localhost:5000/api`
    pub base_url: String,
    /// HTTP client shared by every store
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    session: SessionClient,
    catalog: CatalogClient,
    basket: BasketClient,
    orders: OrdersClient,
}

impl Lavka {
    /// Create a new Lavka client
    ///
    /// # Example
    ///
    /// ```
    /// use lavka_client::Lavka;
    ///
    /// let lavka = Lavka::new("http://localhost:5000/api");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new Lavka client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use lavka_client::{config::ClientOptions, Lavka};
    ///
    /// let options = ClientOptions::default().with_session_file("/tmp/lavka-session.json");
    /// let lavka = Lavka::new_with_options("http://localhost:5000/api", options);
    /// lavka.session().restore();
    /// ```
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http_client = Client::new();

        let shared_session: Arc<Mutex<Option<Session>>> = Arc::new(Mutex::new(None));
        let storage: Arc<dyn SessionStorage> = match &options.session_file {
            Some(path) if options.persist_session => Arc::new(FileStorage::new(path.clone())),
            _ => Arc::new(MemoryStorage::default()),
        };

        let session = SessionClient::new(
            &base_url,
            http_client.clone(),
            Arc::clone(&shared_session),
            storage,
            options.clone(),
        );
        let catalog = CatalogClient::new(
            &base_url,
            http_client.clone(),
            Arc::clone(&shared_session),
            options.clone(),
        );
        let basket = BasketClient::new(
            &base_url,
            http_client.clone(),
            Arc::clone(&shared_session),
            options.clone(),
        );
        let orders = OrdersClient::new(
            &base_url,
            http_client.clone(),
            Arc::clone(&shared_session),
            basket.clone(),
            options.clone(),
        );

        Self {
            base_url,
            http_client,
            options,
            session,
            catalog,
            basket,
            orders,
        }
    }

    /// Get the session store for authentication and identity
    pub fn session(&self) -> &SessionClient {
        &self.session
    }

    /// Get the catalog store for product operations
    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Get the basket store for the current user's selected items
    pub fn basket(&self) -> &BasketClient {
        &self.basket
    }

    /// Get the order store for checkout and order management
    pub fn orders(&self) -> &OrdersClient {
        &self.orders
    }

    /// Create a validator for form field checks
    pub fn validator(&self) -> Validator {
        Validator::new(&self.base_url, self.http_client.clone())
    }

    /// Create a debouncer for validation-on-keystroke, using the
    /// configured debounce interval
    pub fn debouncer(&self) -> Debounce {
        Debounce::new(self.options.debounce_interval)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::basket::BasketClient;
    pub use crate::catalog::CatalogClient;
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::orders::{OrderStatus, OrdersClient};
    pub use crate::session::{Credentials, Role, SessionClient};
    pub use crate::Lavka;
}
