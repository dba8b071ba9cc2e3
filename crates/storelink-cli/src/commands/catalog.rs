//! `storelink catalog` command implementation.
//!
//! Lists every file the upstream knows for a product id, without sizes.

use storelink_core::error::StoreResult;
use storelink_core::types::ProductId;

use super::CommandContext;

/// Execute the `storelink catalog` command
pub async fn execute(product_id: &str, advanced: bool, ctx: &CommandContext) -> StoreResult<()> {
    let product_id = ProductId::parse(product_id.trim())?;
    let catalog = ctx.client.build_catalog(&product_id).await?;

    if ctx.json {
        return ctx.print_json(&catalog);
    }

    if catalog.is_empty() {
        ctx.output.warn(&format!("No installers available for {}", product_id));
        return Ok(());
    }

    ctx.output.info(&format!("{} file(s) for {}", catalog.total(), product_id));
    ctx.output.block(&ctx.output.render_catalog(&catalog, advanced));
    Ok(())
}
