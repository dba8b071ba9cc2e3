//! Size discovery with single-byte range probes.
//!
//! Each URL gets one `GET` with `Range: bytes=0-0`; the total length is read
//! from the `Content-Range` header. Probes run concurrently on a `JoinSet`
//! and every probe fails on its own: a failure becomes `None` for that URL
//! and never cancels or delays its siblings.

use std::time::Duration;

use reqwest::header::{CONTENT_RANGE, RANGE};
use reqwest::Client;
use storelink_core::types::{SizeMap, MAX_PROBE_BATCH};
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

/// Probe the first [`MAX_PROBE_BATCH`] URLs. The result holds exactly those
/// URLs as keys, in input order.
#[instrument(skip(client, urls), fields(requested = urls.len()))]
pub async fn probe_sizes(client: &Client, urls: &[String], timeout: Duration) -> SizeMap {
    let batch = &urls[..urls.len().min(MAX_PROBE_BATCH)];
    if urls.len() > batch.len() {
        debug!(ignored = urls.len() - batch.len(), "Probe batch capped");
    }

    // Every key is present up front so a lost task still leaves `None`
    let mut sizes: SizeMap = batch.iter().map(|url| (url.clone(), None)).collect();
    let mut probes = JoinSet::new();

    for url in batch {
        let client = client.clone();
        let url = url.clone();
        probes.spawn(async move {
            let size = probe_one(&client, &url, timeout).await;
            (url, size)
        });
    }

    while let Some(result) = probes.join_next().await {
        match result {
            Ok((url, size)) => {
                sizes.insert(url, size);
            }
            Err(join_err) => {
                warn!(error = %join_err, "Size probe task panicked");
            }
        }
    }

    debug!(
        probed = sizes.len(),
        resolved = sizes.values().filter(|size| size.is_some()).count(),
        "Size probes complete"
    );

    sizes
}

async fn probe_one(client: &Client, url: &str, timeout: Duration) -> Option<u64> {
    let response = match client
        .get(url)
        .header(RANGE, "bytes=0-0")
        .timeout(timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!(url, error = %e, "Size probe failed");
            return None;
        }
    };

    let Some(header) = response.headers().get(CONTENT_RANGE) else {
        debug!(url, status = %response.status(), "No Content-Range in probe response");
        return None;
    };

    let size = header.to_str().ok().and_then(parse_content_range);
    if size.is_none() {
        debug!(url, ?header, "Unparseable Content-Range");
    }
    size
}

/// Read the total from `<unit> <start>-<end>/<total>`
pub fn parse_content_range(value: &str) -> Option<u64> {
    value.split('/').nth(1)?.trim().parse().ok()
}
