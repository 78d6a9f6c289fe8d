//! Catalog store: the sellable item collection

mod types;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;
use reqwest::Client;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::loading::LoadingGuard;
use crate::session::Session;

pub use types::*;

/// Client for catalog operations.
///
/// Holds a local copy of the catalog and keeps it in sync with backend
/// responses: `list` replaces the whole collection, `create` and `update`
/// fold in the canonical record the backend returns, `delete` removes an
/// entry only after the backend confirms. `search` and `get_by_id` read
/// the held collection without a round-trip.
#[derive(Clone)]
pub struct CatalogClient {
    /// Base path of the storefront API
    base_url: String,

    /// HTTP client used for requests
    client: Client,

    /// The held catalog
    products: Arc<Mutex<Vec<Product>>>,

    /// Shared session, read for the bearer token
    session: Arc<Mutex<Option<Session>>>,

    /// Advisory loading flag
    loading: Arc<AtomicBool>,

    /// Client options
    options: ClientOptions,
}

impl CatalogClient {
    /// Create a new CatalogClient
    pub fn new(
        base_url: &str,
        client: Client,
        session: Arc<Mutex<Option<Session>>>,
        options: ClientOptions,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            products: Arc::new(Mutex::new(Vec::new())),
            session,
            loading: Arc::new(AtomicBool::new(false)),
            options,
        }
    }

    fn products_url(&self, path: &str) -> String {
        format!("{}/products{}", self.base_url, path)
    }

    fn token(&self) -> Option<String> {
        let current = self.session.lock().unwrap();
        current.as_ref().map(|session| session.token.clone())
    }

    /// Fetch the catalog, optionally filtered by a server-side keyword,
    /// and replace the held collection with the response
    pub async fn list(&self, keyword: Option<&str>) -> Result<Vec<Product>, Error> {
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("listing products, keyword: {:?}", keyword);

        let mut request = Fetch::get(&self.client, &self.products_url(""))
            .timeout(self.options.request_timeout)
            .maybe_bearer(self.token().as_deref());

        if let Some(keyword) = keyword {
            let mut params = HashMap::new();
            params.insert("keyword".to_string(), keyword.to_string());
            request = request.query(params);
        }

        let fetched = request.execute::<Vec<Product>>().await?;

        let mut held = self.products.lock().unwrap();
        *held = fetched.clone();

        Ok(fetched)
    }

    /// Create a product and append the backend's canonical record, not the
    /// submitted draft, so server-computed fields are respected
    pub async fn create(&self, product: &NewProduct) -> Result<Product, Error> {
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("creating product {}", product.name);

        let created = Fetch::post(&self.client, &self.products_url(""))
            .timeout(self.options.request_timeout)
            .maybe_bearer(self.token().as_deref())
            .json(product)?
            .execute::<Product>()
            .await?;

        let mut held = self.products.lock().unwrap();
        held.push(created.clone());

        Ok(created)
    }

    /// Update a product; the canonical response record replaces the held
    /// entry with the same id
    pub async fn update(&self, id: &str, patch: &ProductPatch) -> Result<Product, Error> {
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("updating product {}", id);

        let updated = Fetch::put(&self.client, &self.products_url(&format!("/{}", id)))
            .timeout(self.options.request_timeout)
            .maybe_bearer(self.token().as_deref())
            .json(patch)?
            .execute::<Product>()
            .await?;

        let mut held = self.products.lock().unwrap();
        match held.iter_mut().find(|product| product.id == id) {
            Some(slot) => *slot = updated.clone(),
            None => held.push(updated.clone()),
        }

        Ok(updated)
    }

    /// Delete a product; the held entry is removed only after the backend
    /// confirms
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let _guard = LoadingGuard::hold(&self.loading);
        debug!("deleting product {}", id);

        Fetch::delete(&self.client, &self.products_url(&format!("/{}", id)))
            .timeout(self.options.request_timeout)
            .maybe_bearer(self.token().as_deref())
            .execute_empty()
            .await?;

        let mut held = self.products.lock().unwrap();
        held.retain(|product| product.id != id);

        Ok(())
    }

    /// Look up a product in the held collection
    pub fn get_by_id(&self, id: &str) -> Option<Product> {
        let held = self.products.lock().unwrap();
        held.iter().find(|product| product.id == id).cloned()
    }

    /// Case-insensitive substring search over name, description and
    /// category of the held collection; no round-trip is made
    pub fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.to_lowercase();
        let held = self.products.lock().unwrap();
        held.iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
                    || product.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Snapshot of the held collection
    pub fn products(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    /// Whether a catalog call is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}
