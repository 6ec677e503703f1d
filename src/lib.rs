//! Agrilume Marketplace Client Library
//!
//! A Rust client library for the Agrilume marketplace backend, covering
//! authentication and session probing, the product catalog, purchase
//! requests, buyer/seller messaging, and the deferred purchase-request
//! workflow that spans a login redirect.

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod messages;
pub mod pending;
pub mod products;
pub mod requests;
pub mod storage;

use reqwest::Client;
use std::sync::Arc;

use crate::auth::{Auth, User};
use crate::config::ClientOptions;
use crate::dispatch::{IntentOutcome, Page, PostLoginOutcome};
use crate::error::Error;
use crate::messages::MessagesClient;
use crate::pending::PendingStore;
use crate::products::ProductsClient;
use crate::requests::RequestsClient;
use crate::storage::{KeyValueStore, MemoryStore};

/// The main entry point for the Agrilume marketplace client
pub struct Agrilume {
    /// The base URL for the marketplace backend
    pub url: String,
    /// HTTP client used for requests; carries the session cookie
    pub http_client: Client,
    /// Auth client for accounts, sessions, and the cached profile
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
    /// Store backing the client-side slots
    storage: Arc<dyn KeyValueStore>,
}

impl Agrilume {
    /// Create a new marketplace client with default options and an
    /// in-memory store
    ///
    /// # Example
    ///
    /// ```
    /// use agrilume_client::Agrilume;
    ///
    /// let client = Agrilume::new("http://127.0.0.1:5000").unwrap();
    /// ```
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new marketplace client with custom options
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Result<Self, Error> {
        Self::new_with_store(base_url, options, Arc::new(MemoryStore::new()))
    }

    /// Create a new marketplace client over an injected key-value store.
    ///
    /// The store holds the cached user profile and the pending-request
    /// slot; tests substitute their own instance to observe both.
    pub fn new_with_store(
        base_url: &str,
        options: ClientOptions,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, Error> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let url = base_url.trim_end_matches('/').to_string();
        let auth = Auth::new(&url, http_client.clone(), store.clone(), options.clone());

        Ok(Self {
            url,
            http_client,
            auth,
            options,
            storage: store,
        })
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Create a new ProductsClient for catalog operations
    pub fn products(&self) -> ProductsClient {
        ProductsClient::new(&self.url, self.http_client.clone())
    }

    /// Create a new RequestsClient for purchase-request operations
    pub fn requests(&self) -> RequestsClient {
        RequestsClient::new(&self.url, self.http_client.clone())
    }

    /// Create a new MessagesClient for messaging operations
    pub fn messages(&self) -> MessagesClient {
        MessagesClient::new(&self.url, self.http_client.clone())
    }

    /// The pending-request slot
    pub fn pending(&self) -> PendingStore {
        PendingStore::new(self.storage.clone(), self.options.pending_key.clone())
    }

    /// Validate a purchase request and park it for replay after login.
    ///
    /// See [`dispatch::request_intent`].
    pub async fn request_intent(
        &self,
        product_id: &str,
        quantity: &str,
    ) -> Result<IntentOutcome, Error> {
        dispatch::request_intent(
            &self.auth,
            &self.products(),
            &self.pending(),
            product_id,
            quantity,
        )
        .await
    }

    /// Decide the next navigation target after a successful login,
    /// replaying any pending purchase request.
    ///
    /// See [`dispatch::after_login`].
    pub async fn after_login(&self, user: &User) -> PostLoginOutcome {
        dispatch::after_login(user, &self.pending(), &self.requests()).await
    }

    /// Render a navigation target as a relative URL using the configured
    /// page map
    pub fn page_url(&self, page: &Page) -> String {
        page.href(&self.options.pages)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{Session, User};
    pub use crate::config::ClientOptions;
    pub use crate::dispatch::{IntentOutcome, Notice, Page, PostLoginOutcome};
    pub use crate::error::Error;
    pub use crate::Agrilume;
}
