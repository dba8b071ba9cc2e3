//! Request/response documents for the three lookup operations.
//!
//! Each handler takes the JSON request document as received and always
//! produces a response document with an HTTP-style status, so an outer
//! transport only has to forward `status` and `body`.

use serde::Serialize;
use serde_json::{json, Value};
use storelink_core::error::StoreError;
use storelink_core::resolve;
use storelink_core::types::ProductId;

use crate::client::StoreClient;

/// Message returned when the resolver cannot recognize the input
pub const UNSUPPORTED_INPUT: &str = "Unsupported Microsoft Store link or ID";

/// A response document and its status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    /// HTTP-style status code
    pub status: u16,
    /// JSON body
    pub body: Value,
}

impl ApiResponse {
    /// 200 response with a serializable body
    pub fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(500, &format!("Failed to encode response: {}", e)),
        }
    }

    /// Error response shaped as `{ "error": message }`
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<StoreError> for ApiResponse {
    fn from(error: StoreError) -> Self {
        let status = error.status_code();
        match error {
            StoreError::InvalidInput { .. } => Self::error(status, UNSUPPORTED_INPUT),
            StoreError::MissingField { message, .. } => Self::error(status, &message),
            other => Self::error(status, &other.to_string()),
        }
    }
}

/// `{ url }` → `{ productId }`
pub fn extract(request: &Value) -> ApiResponse {
    match extract_product_id(request) {
        Ok(product_id) => ApiResponse::ok(&json!({ "productId": product_id })),
        Err(e) => e.into(),
    }
}

/// `{ productId }` → `{ total, files }`
pub async fn store(client: &StoreClient, request: &Value) -> ApiResponse {
    let product_id = match requested_product_id(request) {
        Ok(product_id) => product_id,
        Err(e) => return e.into(),
    };

    match client.build_catalog(&product_id).await {
        Ok(catalog) => ApiResponse::ok(&catalog),
        Err(e) => e.into(),
    }
}

/// `{ urls: [...] }` → `{ url: size | null }` for the first ten URLs
pub async fn size(client: &StoreClient, request: &Value) -> ApiResponse {
    let urls = match requested_urls(request) {
        Ok(urls) => urls,
        Err(e) => return e.into(),
    };

    ApiResponse::ok(&client.probe_sizes(&urls).await)
}

fn extract_product_id(request: &Value) -> Result<ProductId, StoreError> {
    let input = non_empty_str(request, "url")
        .ok_or_else(|| StoreError::missing_field("url", "Missing input"))?;
    resolve(input)
}

fn requested_product_id(request: &Value) -> Result<ProductId, StoreError> {
    let missing = || StoreError::missing_field("productId", "Missing or invalid productId");
    let raw = non_empty_str(request, "productId").ok_or_else(missing)?;
    ProductId::parse(raw).map_err(|_| missing())
}

fn requested_urls(request: &Value) -> Result<Vec<String>, StoreError> {
    let urls = request
        .get("urls")
        .and_then(Value::as_array)
        .ok_or_else(|| StoreError::missing_field("urls", "Invalid input"))?;

    Ok(urls
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}

fn non_empty_str<'a>(request: &'a Value, field: &str) -> Option<&'a str> {
    request
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}
