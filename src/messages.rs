//! Buyer/seller messaging

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::error::Error;
use crate::fetch::{ApiMessage, Fetch};

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    /// The message ID
    pub id: i64,

    /// User ID of the author
    pub sender_id: i64,

    /// Message text
    pub content: String,

    /// Send time, RFC 3339
    pub timestamp: String,
}

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    receiver_id: i64,
    content: &'a str,
}

/// Client for messaging operations
pub struct MessagesClient {
    /// The base URL for the marketplace backend
    url: String,

    /// HTTP client
    client: Client,
}

impl MessagesClient {
    /// Create a new MessagesClient
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.url, path)
    }

    /// Accounts the signed-in user can converse with: buyers see sellers,
    /// sellers see buyers.
    pub async fn conversations(&self) -> Result<Vec<User>, Error> {
        let url = self.api_url("/messages/conversations");

        Fetch::get(&self.client, &url).execute::<Vec<User>>().await
    }

    /// Full history with another user, oldest first
    pub async fn history(&self, other_user_id: i64) -> Result<Vec<Message>, Error> {
        let url = self.api_url(&format!("/messages/history/{}", other_user_id));

        Fetch::get(&self.client, &url)
            .execute::<Vec<Message>>()
            .await
    }

    /// Send a message to another user
    pub async fn send(&self, receiver_id: i64, content: &str) -> Result<ApiMessage, Error> {
        let url = self.api_url("/messages/send");

        Fetch::post(&self.client, &url)
            .json(&OutgoingMessage {
                receiver_id,
                content,
            })?
            .execute::<ApiMessage>()
            .await
    }
}
