//! `storelink resolve` command implementation.
//!
//! Prints the canonical product id behind a store link or raw id.

use serde_json::json;
use storelink_core::error::StoreResult;
use storelink_core::resolve;

use super::CommandContext;

/// Execute the `storelink resolve` command
pub async fn execute(input: &str, ctx: &CommandContext) -> StoreResult<()> {
    let product_id = resolve(input)?;

    if ctx.json {
        ctx.print_json(&json!({ "productId": product_id }))
    } else {
        ctx.output.success(product_id.as_str());
        Ok(())
    }
}
