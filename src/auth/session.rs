//! Session state as asserted by the backend

use serde::{Deserialize, Serialize};

use crate::auth::types::User;

/// Current-session identity, fetched per probe.
///
/// The backend owns the session; this is a point-in-time read used to
/// render navigation state and gate seller-only actions, never an
/// authority the client can extend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Whether a server-side session is active
    pub logged_in: bool,

    /// The signed-in account; absent when anonymous
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Session {
    /// The anonymous session, also the fallback for any probe failure
    pub fn anonymous() -> Self {
        Self {
            logged_in: false,
            user: None,
        }
    }

    /// Whether the session belongs to a signed-in seller
    pub fn is_seller(&self) -> bool {
        self.logged_in && self.user.as_ref().map_or(false, |user| user.is_seller)
    }
}
