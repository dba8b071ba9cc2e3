//! Listing document scanning and interpretation.
//!
//! The upstream answers with an HTML page whose body holds zero or more
//! `<a href="URL">NAME</a>` anchors. Parsing happens in two steps:
//!
//! 1. [`ListingDocument::parse`] makes a single pass over the HTML and
//!    records every anchor's raw `href` and text.
//! 2. [`ListingDocument::into_catalog`] drops non-HTTP anchors, decodes the
//!    display names, classifies them and deduplicates by URL.

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use storelink_core::types::{ArtifactEntry, Catalog};
use tracing::debug;

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<a[^>]+href="([^"]+)"[^>]*>([^<]+)</a>"#).expect("anchor pattern is valid")
});

/// One anchor as it appears in the listing, before interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAnchor<'a> {
    /// Raw `href` attribute value
    pub href: &'a str,
    /// Raw inner text, untrimmed
    pub text: &'a str,
}

/// A scanned listing page
#[derive(Debug, Clone, Default)]
pub struct ListingDocument<'a> {
    anchors: Vec<RawAnchor<'a>>,
}

impl<'a> ListingDocument<'a> {
    /// Scan the HTML once, collecting anchors in document order
    pub fn parse(html: &'a str) -> Self {
        let anchors = ANCHOR
            .captures_iter(html)
            .filter_map(|caps| {
                Some(RawAnchor {
                    href: caps.get(1)?.as_str(),
                    text: caps.get(2)?.as_str(),
                })
            })
            .collect();

        Self { anchors }
    }

    pub fn anchors(&self) -> &[RawAnchor<'a>] {
        &self.anchors
    }

    /// Interpret the anchors as artifacts
    pub fn into_catalog(self) -> Catalog {
        let scanned = self.anchors.len();
        let catalog = Catalog::from_entries(self.anchors.into_iter().filter_map(interpret));

        debug!(scanned, unique = catalog.total(), "Interpreted listing anchors");
        catalog
    }
}

/// Scan and interpret a listing page in one call
pub fn parse_listing(html: &str) -> Catalog {
    ListingDocument::parse(html).into_catalog()
}

/// Turn one anchor into an artifact, or `None` for relative and non-HTTP links
pub fn interpret(anchor: RawAnchor<'_>) -> Option<ArtifactEntry> {
    if !is_http_url(anchor.href) {
        return None;
    }

    let filename = decode_filename(anchor.text.trim());
    Some(ArtifactEntry::new(anchor.href.to_string(), filename))
}

fn is_http_url(href: &str) -> bool {
    let lower = href.get(..8).unwrap_or(href).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Percent-decode a display name. Malformed escapes are kept verbatim and
/// invalid UTF-8 is replaced.
pub fn decode_filename(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
