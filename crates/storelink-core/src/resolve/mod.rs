//! Identifier resolution.
//!
//! Turns whatever the user pasted (a bare product id or a storefront link)
//! into a canonical [`ProductId`]. Rules are tried in a fixed order and the
//! first match wins:
//!
//! 1. A bare 12-character alphanumeric token.
//! 2. An `apps.microsoft.com` link whose last path segment is a token.
//! 3. A `microsoft.com` link with a `/productId/<token>` path.
//!
//! Anything else is reported as a single uniform `InvalidInput`.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{StoreError, StoreResult};
use crate::types::ProductId;

/// Host marker for the current storefront
pub const STOREFRONT_HOST: &str = "apps.microsoft.com";

/// Host marker for the legacy storefront
pub const LEGACY_STORE_HOST: &str = "microsoft.com";

/// Path marker that precedes the token on legacy storefront links
pub const LEGACY_PATH_MARKER: &str = "/productId/";

static LEGACY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)productId/([A-Z0-9]{12})").expect("legacy token pattern is valid")
});

/// Resolve raw user input to a canonical product id
pub fn resolve(input: &str) -> StoreResult<ProductId> {
    let trimmed = input.trim();

    if ProductId::is_valid(trimmed) {
        return ProductId::parse(trimmed);
    }

    let parsed = Url::parse(trimmed).map_err(|_| invalid(input))?;

    from_storefront(&parsed)
        .or_else(|| from_legacy_store(&parsed))
        .ok_or_else(|| invalid(input))
}

/// `https://apps.microsoft.com/detail/<token>`, trailing slash tolerated
fn from_storefront(url: &Url) -> Option<ProductId> {
    if !url.host_str()?.contains(STOREFRONT_HOST) {
        return None;
    }

    let last = url.path().split('/').filter(|segment| !segment.is_empty()).last()?;
    ProductId::parse(last).ok()
}

/// `https://www.microsoft.com/store/productId/<token>`
fn from_legacy_store(url: &Url) -> Option<ProductId> {
    if !url.host_str()?.contains(LEGACY_STORE_HOST) || !url.path().contains(LEGACY_PATH_MARKER) {
        return None;
    }

    let captures = LEGACY_TOKEN.captures(url.path())?;
    ProductId::parse(captures.get(1)?.as_str()).ok()
}

fn invalid(input: &str) -> StoreError {
    StoreError::InvalidInput {
        input: input.trim().to_string(),
    }
}
