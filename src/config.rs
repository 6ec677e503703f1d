//! Configuration options for the marketplace client

use std::time::Duration;

/// Configuration options for the marketplace client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Storage slot holding the cached user profile
    pub user_key: String,

    /// Storage slot holding the deferred purchase request
    pub pending_key: String,

    /// Page names used to build navigation targets
    pub pages: Pages,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            user_key: "user".to_string(),
            pending_key: "pendingRequest".to_string(),
            pages: Pages::default(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the storage slot for the cached user profile
    pub fn with_user_key(mut self, value: &str) -> Self {
        self.user_key = value.to_string();
        self
    }

    /// Set the storage slot for the deferred purchase request
    pub fn with_pending_key(mut self, value: &str) -> Self {
        self.pending_key = value.to_string();
        self
    }

    /// Set the page map used to build navigation targets
    pub fn with_pages(mut self, value: Pages) -> Self {
        self.pages = value;
        self
    }
}

/// Relative page URLs the client navigates between.
///
/// The backend serves the frontend as plain pages; navigation targets are
/// rendered from this map so embedders can relocate or rename pages.
#[derive(Debug, Clone)]
pub struct Pages {
    /// The product catalog (also the landing page)
    pub catalog: String,

    /// The login page
    pub login: String,

    /// The buyer's own requests list
    pub my_requests: String,

    /// The seller dashboard
    pub seller_dashboard: String,

    /// The profile-completion form
    pub complete_profile: String,

    /// The messaging page
    pub messages: String,
}

impl Default for Pages {
    fn default() -> Self {
        Self {
            catalog: "index.html".to_string(),
            login: "login.html".to_string(),
            my_requests: "my_requests.html".to_string(),
            seller_dashboard: "seller_dashboard.html".to_string(),
            complete_profile: "complete_profile.html".to_string(),
            messages: "messages.html".to_string(),
        }
    }
}
