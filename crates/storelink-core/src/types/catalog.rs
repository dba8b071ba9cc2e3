//! Deduplicated artifact catalog and size probe results.

use super::{Architecture, ArtifactEntry};
use indexmap::IndexMap;
use serde::Serialize;

/// Maximum number of URLs considered by a single size probe batch
pub const MAX_PROBE_BATCH: usize = 10;

/// Probe results keyed by URL, in request order. `None` marks a failed probe.
pub type SizeMap = IndexMap<String, Option<u64>>;

/// Catalog of artifacts for one product, unique by URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    total: usize,
    files: Vec<ArtifactEntry>,
}

impl Catalog {
    /// Build a catalog, keeping the first entry seen for each URL
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ArtifactEntry>,
    {
        let mut unique: IndexMap<String, ArtifactEntry> = IndexMap::new();
        for entry in entries {
            unique.entry(entry.url.clone()).or_insert(entry);
        }

        let files: Vec<ArtifactEntry> = unique.into_values().collect();
        Self {
            total: files.len(),
            files,
        }
    }

    /// An empty catalog, i.e. no installers available
    pub fn empty() -> Self {
        Self {
            total: 0,
            files: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn files(&self) -> &[ArtifactEntry] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Installable packages and bundles
    pub fn primary(&self) -> impl Iterator<Item = &ArtifactEntry> {
        self.files.iter().filter(|f| f.kind.is_primary())
    }

    /// Blockmaps, encrypted packages, manifests and unrecognized files
    pub fn advanced(&self) -> impl Iterator<Item = &ArtifactEntry> {
        self.files.iter().filter(|f| !f.kind.is_primary())
    }

    /// Primary files grouped by architecture, empty groups omitted
    pub fn group_by_arch(&self) -> Vec<(Architecture, Vec<&ArtifactEntry>)> {
        Architecture::ALL
            .iter()
            .map(|arch| {
                let items: Vec<&ArtifactEntry> =
                    self.primary().filter(|f| f.architecture == *arch).collect();
                (*arch, items)
            })
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }

    /// Merge probe results. Entries without a probed key keep their size.
    pub fn apply_sizes(&mut self, sizes: &SizeMap) {
        for file in &mut self.files {
            if let Some(size) = sizes.get(&file.url) {
                file.size = Some(*size);
            }
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}
