//! Types for authentication and user accounts

use serde::{Deserialize, Serialize};

/// Placeholder phone number the backend assigns to accounts created through
/// Google sign-in
pub const PHONE_PLACEHOLDER: &str = "0000000000";

/// Placeholder address the backend assigns to accounts created through
/// Google sign-in
pub const ADDRESS_PLACEHOLDER: &str = "Not Provided";

/// A marketplace account as serialized by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    pub id: i64,

    /// Display name
    pub full_name: String,

    /// The account email address
    pub email: String,

    /// Contact phone number; placeholder-valued for Google-created accounts
    pub phone_number: Option<String>,

    /// Delivery address; placeholder-valued for Google-created accounts
    pub address: Option<String>,

    /// Self-reported gender, if supplied at registration
    #[serde(default)]
    pub gender: Option<String>,

    /// Whether this account can list products and confirm requests
    pub is_seller: bool,
}

impl User {
    /// Whether the account still lacks real contact details.
    ///
    /// The backend seeds Google-created accounts with placeholder phone and
    /// address values; those sentinels and absent fields both count as not
    /// yet supplied.
    pub fn needs_completion(&self) -> bool {
        let phone_missing = matches!(self.phone_number.as_deref(), None | Some(PHONE_PLACEHOLDER));
        let address_missing = matches!(self.address.as_deref(), None | Some(ADDRESS_PLACEHOLDER));
        phone_missing || address_missing
    }
}

/// Response to a successful login or Google credential exchange
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Human-readable outcome
    pub message: String,

    /// The authenticated account
    pub user: User,
}

/// Registration form data
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    /// Display name
    pub full_name: String,

    /// The account email address
    pub email: String,

    /// Contact phone number
    pub phone_number: String,

    /// Delivery address
    pub address: String,

    /// Self-reported gender
    pub gender: String,

    /// Plaintext password; hashed server-side
    pub password: String,
}

/// Body of a profile update
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProfileUpdate<'a> {
    pub phone_number: &'a str,
    pub address: &'a str,
}

/// Response to a profile update
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProfileResponse {
    #[serde(default)]
    #[allow(dead_code)]
    pub message: Option<String>,
    pub user: User,
}
