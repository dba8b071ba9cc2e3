//! `storelink sizes` command implementation.

use storelink_core::error::StoreResult;
use storelink_core::types::{SizeDisplay, MAX_PROBE_BATCH};

use super::CommandContext;

/// Execute the `storelink sizes` command
pub async fn execute(urls: &[String], ctx: &CommandContext) -> StoreResult<()> {
    if urls.len() > MAX_PROBE_BATCH && !ctx.json {
        ctx.output.warn(&format!(
            "Only the first {} of {} URLs are probed",
            MAX_PROBE_BATCH,
            urls.len()
        ));
    }

    let sizes = ctx.client.probe_sizes(urls).await;

    if ctx.json {
        return ctx.print_json(&sizes);
    }

    for (url, size) in &sizes {
        ctx.output.info(&format!("{}  {}", SizeDisplay(Some(*size)), url));
    }
    Ok(())
}
