//! Purchase-request creation, listing, and status transitions

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::fetch::{ApiMessage, Fetch};

/// Lifecycle state of a purchase request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Awaiting the seller's decision
    Pending,

    /// Accepted by the seller
    Confirmed,

    /// Declined by the seller
    Rejected,

    /// On its way to the buyer
    Shipped,
}

/// A request as the buyer sees it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MyRequest {
    /// Name of the requested product
    pub product_name: String,

    /// Amount requested, as typed at submission
    pub requested_quantity: String,

    /// Current lifecycle state
    pub status: RequestStatus,

    /// Submission time, RFC 3339
    pub requested_at: String,

    /// Image URL of the requested product, when the backend includes one
    #[serde(default)]
    pub product_image_url: Option<String>,
}

/// A request as the seller sees it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IncomingRequest {
    /// The request ID
    pub request_id: i64,

    /// Display name of the requesting buyer
    pub buyer_name: String,

    /// Phone number of the requesting buyer
    pub buyer_contact: String,

    /// Name of the requested product
    pub product_name: String,

    /// Amount requested
    pub requested_quantity: String,

    /// Current lifecycle state
    pub status: RequestStatus,

    /// Submission time, RFC 3339
    pub requested_at: String,

    /// Image URL of the requested product, when the backend includes one
    #[serde(default)]
    pub product_image_url: Option<String>,
}

#[derive(Serialize)]
struct StatusChange {
    status: RequestStatus,
}

#[derive(Serialize)]
struct NewRequest<'a> {
    product_id: &'a str,
    quantity: &'a str,
}

/// Client for purchase-request operations
pub struct RequestsClient {
    /// The base URL for the marketplace backend
    url: String,

    /// HTTP client
    client: Client,
}

impl RequestsClient {
    /// Create a new RequestsClient
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.url, path)
    }

    /// Create a purchase request for the signed-in buyer
    pub async fn add(&self, product_id: &str, quantity: &str) -> Result<ApiMessage, Error> {
        let url = self.api_url("/requests/add");

        Fetch::post(&self.client, &url)
            .json(&NewRequest {
                product_id,
                quantity,
            })?
            .execute::<ApiMessage>()
            .await
    }

    /// The signed-in buyer's own requests, newest first
    pub async fn mine(&self) -> Result<Vec<MyRequest>, Error> {
        let url = self.api_url("/myrequests");

        Fetch::get(&self.client, &url)
            .execute::<Vec<MyRequest>>()
            .await
    }

    /// All incoming requests across buyers, newest first (seller only)
    pub async fn incoming(&self) -> Result<Vec<IncomingRequest>, Error> {
        let url = self.api_url("/requests");

        Fetch::get(&self.client, &url)
            .execute::<Vec<IncomingRequest>>()
            .await
    }

    /// Move a request to a new lifecycle state (seller only)
    pub async fn update_status(
        &self,
        request_id: i64,
        status: RequestStatus,
    ) -> Result<ApiMessage, Error> {
        let url = self.api_url(&format!("/requests/update/{}", request_id));

        Fetch::post(&self.client, &url)
            .json(&StatusChange { status })?
            .execute::<ApiMessage>()
            .await
    }
}
