//! Authentication, the session probe, and the cached user profile

mod session;
mod types;

use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::{ApiMessage, Fetch};
use crate::storage::KeyValueStore;

pub use session::*;
pub use types::*;

/// Client for marketplace authentication.
///
/// The backend session lives in a cookie held by the shared HTTP client;
/// this struct only mirrors the signed-in user into a client-side slot for
/// display purposes. That cached copy is never authoritative.
pub struct Auth {
    /// The base URL for the marketplace backend
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Store holding the cached user and pending-request slots
    store: Arc<dyn KeyValueStore>,

    /// Client options
    options: ClientOptions,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(
        url: &str,
        client: Client,
        store: Arc<dyn KeyValueStore>,
        options: ClientOptions,
    ) -> Self {
        Self {
            url: url.to_string(),
            client,
            store,
            options,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.url, path)
    }

    /// Register a new account with email and password.
    ///
    /// Registration does not sign the user in; the backend expects a
    /// follow-up [`login`](Auth::login).
    pub async fn register(&self, new_user: &NewUser) -> Result<ApiMessage, Error> {
        let url = self.api_url("/register");

        Fetch::post(&self.client, &url)
            .json(new_user)?
            .execute::<ApiMessage>()
            .await
    }

    /// Log in with email and password.
    ///
    /// On success the returned user is cached in the user slot; failures
    /// leave both the backend session and the cache untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, Error> {
        let url = self.api_url("/login");

        let mut body = HashMap::new();
        body.insert("email".to_string(), email.to_string());
        body.insert("password".to_string(), password.to_string());

        let result = Fetch::post(&self.client, &url)
            .json(&body)?
            .execute::<AuthResponse>()
            .await?;

        self.cache_user(&result.user);

        Ok(result)
    }

    /// Exchange a Google ID token for a backend session.
    ///
    /// First-time Google accounts are created server-side with placeholder
    /// contact details, so the returned user usually
    /// [`needs_completion`](User::needs_completion).
    pub async fn google_login(&self, id_token: &str) -> Result<AuthResponse, Error> {
        let url = self.api_url("/google-login");

        let mut body = HashMap::new();
        body.insert("token".to_string(), id_token.to_string());

        let result = Fetch::post(&self.client, &url)
            .json(&body)?
            .execute::<AuthResponse>()
            .await?;

        self.cache_user(&result.user);

        Ok(result)
    }

    /// Log out and drop both client-side slots.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.api_url("/logout");

        Fetch::post(&self.client, &url)
            .execute::<ApiMessage>()
            .await?;

        self.store.delete(&self.options.user_key);
        self.store.delete(&self.options.pending_key);

        Ok(())
    }

    /// Probe the backend for the current session.
    ///
    /// Infallible by contract: any transport or decode failure reads as an
    /// anonymous session, so callers can always render something.
    pub async fn check_session(&self) -> Session {
        let url = self.api_url("/check_session");

        match Fetch::get(&self.client, &url).execute::<Session>().await {
            Ok(session) => session,
            Err(err) => {
                warn!(%err, "session probe failed, treating as anonymous");
                Session::anonymous()
            }
        }
    }

    /// Update contact details, replacing the backend's placeholders.
    ///
    /// Validates locally first: the phone number must be exactly ten
    /// digits and the address non-empty. On success the returned user is
    /// cached in the user slot.
    pub async fn update_profile(&self, phone_number: &str, address: &str) -> Result<User, Error> {
        let phone_number = phone_number.trim();
        let address = address.trim();

        if phone_number.len() != 10 || !phone_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::validation(
                "phone number must be exactly 10 digits",
            ));
        }
        if address.is_empty() {
            return Err(Error::validation("address must not be empty"));
        }

        let url = self.api_url("/update-profile");

        let result = Fetch::put(&self.client, &url)
            .json(&ProfileUpdate {
                phone_number,
                address,
            })?
            .execute::<ProfileResponse>()
            .await?;

        self.cache_user(&result.user);

        Ok(result.user)
    }

    /// Read the cached copy of the signed-in user.
    ///
    /// Display-only; stale or unreadable content reads as absent.
    pub fn cached_user(&self) -> Option<User> {
        let raw = self.store.get(&self.options.user_key)?;
        serde_json::from_str(&raw).ok()
    }

    fn cache_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(&self.options.user_key, &json),
            Err(err) => warn!(%err, "failed to cache user profile"),
        }
    }
}
