//! `storelink api` command implementation.
//!
//! Feeds a JSON request document to one of the request/response handlers
//! and prints the response document. Non-2xx responses exit with status 1.

use std::process::ExitCode;
use serde_json::Value;
use storelink_client::api::{self, ApiResponse};
use storelink_core::error::{StoreError, StoreResult};

use super::CommandContext;
use crate::ApiOperation;

/// Execute the `storelink api` command
pub async fn execute(operation: ApiOperation, request: &str, ctx: &CommandContext) -> StoreResult<ExitCode> {
    let response = handle(operation, request, ctx).await;

    ctx.print_json(&response.body)?;
    if response.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        ctx.output.warn(&format!("status {}", response.status));
        Ok(ExitCode::FAILURE)
    }
}

/// Parse the request document and run the handler
pub async fn handle(operation: ApiOperation, request: &str, ctx: &CommandContext) -> ApiResponse {
    let request: Value = match serde_json::from_str(request) {
        Ok(value) => value,
        Err(e) => {
            return StoreError::missing_field("body", &format!("Request is not valid JSON: {}", e)).into();
        }
    };

    match operation {
        ApiOperation::Extract => api::extract(&request),
        ApiOperation::Store => api::store(&ctx.client, &request).await,
        ApiOperation::Size => api::size(&ctx.client, &request).await,
    }
}
