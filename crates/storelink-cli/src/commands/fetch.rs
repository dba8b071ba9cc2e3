//! `storelink fetch` command implementation.
//!
//! Runs the whole lookup: resolve the input, build the catalog, probe the
//! sizes of the installable files and print them grouped by architecture.

use storelink_client::StoreClient;
use storelink_core::error::StoreResult;
use storelink_core::resolve;
use storelink_core::types::Catalog;
use tracing::debug;

use super::CommandContext;

/// Execute the `storelink fetch` command
pub async fn execute(input: &str, advanced: bool, ctx: &CommandContext) -> StoreResult<()> {
    let catalog = lookup(&ctx.client, input).await?;

    if ctx.json {
        return ctx.print_json(&catalog);
    }

    if catalog.is_empty() {
        ctx.output.warn("No installers available");
        return Ok(());
    }

    ctx.output.block(&ctx.output.render_catalog(&catalog, advanced));
    Ok(())
}

/// Resolve, list and size. Only primary files are probed.
pub async fn lookup(client: &StoreClient, input: &str) -> StoreResult<Catalog> {
    let product_id = resolve(input)?;
    let mut catalog = client.build_catalog(&product_id).await?;

    let primary: Vec<String> = catalog.primary().map(|f| f.url.clone()).collect();
    if !primary.is_empty() {
        let sizes = client.probe_sizes(&primary).await;
        debug!(probed = sizes.len(), primary = primary.len(), "Merging probe results");
        catalog.apply_sizes(&sizes);
    }

    Ok(catalog)
}
