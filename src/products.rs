//! Product catalog reads and seller-side product management

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::fetch::{decode, ApiMessage, Fetch};

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The product ID
    pub id: i64,

    /// Product name
    pub name: String,

    /// Unit price in rupees
    pub price: f64,

    /// Free-form amount on offer, e.g. "50 kg" or "100 units"
    pub quantity: String,

    /// Absolute URL of the product image, if one was uploaded
    pub image_url: Option<String>,

    /// Last modification time, RFC 3339
    pub updated_at: String,
}

/// A product listing to upload, image included
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Product name
    pub name: String,

    /// Unit price in rupees
    pub price: f64,

    /// Free-form amount on offer
    pub quantity: String,

    /// Raw image bytes
    pub image: Vec<u8>,

    /// File name the image is uploaded under
    pub image_filename: String,
}

/// Changes to an existing product; absent fields are left as they are
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    /// New product name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New unit price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// New amount on offer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

/// Client for catalog and product management operations
pub struct ProductsClient {
    /// The base URL for the marketplace backend
    url: String,

    /// HTTP client
    client: Client,
}

impl ProductsClient {
    /// Create a new ProductsClient
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.url, path)
    }

    /// List all products, newest first
    pub async fn list(&self) -> Result<Vec<Product>, Error> {
        let url = self.api_url("/products");

        Fetch::get(&self.client, &url)
            .execute::<Vec<Product>>()
            .await
    }

    /// Fetch a single product
    pub async fn get(&self, product_id: &str) -> Result<Product, Error> {
        let url = self.api_url(&format!("/product/{}", product_id));

        Fetch::get(&self.client, &url).execute::<Product>().await
    }

    /// Upload a new product listing (seller only).
    ///
    /// The image travels as a multipart part alongside the form fields,
    /// which is why this bypasses the JSON fetch helper.
    pub async fn add(&self, new_product: &NewProduct) -> Result<ApiMessage, Error> {
        let url = self.api_url("/products/add");

        let image = Part::bytes(new_product.image.clone())
            .file_name(new_product.image_filename.clone());
        let form = Form::new()
            .text("name", new_product.name.clone())
            .text("price", new_product.price.to_string())
            .text("quantity", new_product.quantity.clone())
            .part("image", image);

        let response = self.client.post(&url).multipart(form).send().await?;
        decode(response).await
    }

    /// Change a product's name, price, or quantity (seller only)
    pub async fn update(&self, product_id: &str, changes: &ProductUpdate) -> Result<ApiMessage, Error> {
        let url = self.api_url(&format!("/products/update/{}", product_id));

        Fetch::put(&self.client, &url)
            .json(changes)?
            .execute::<ApiMessage>()
            .await
    }

    /// Remove a product listing and its image (seller only)
    pub async fn delete(&self, product_id: &str) -> Result<ApiMessage, Error> {
        let url = self.api_url(&format!("/products/delete/{}", product_id));

        Fetch::delete(&self.client, &url)
            .execute::<ApiMessage>()
            .await
    }
}

/// Lenient numeric read of a quantity string.
///
/// Quantities are free-form text ("50 kg", "100 units"); comparisons keep
/// only digits and the decimal point and fall back to zero when nothing
/// numeric remains.
pub fn parse_quantity(raw: &str) -> f64 {
    let numeric: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse().unwrap_or(0.0)
}
