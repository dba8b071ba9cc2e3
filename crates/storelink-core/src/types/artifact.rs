//! Artifact entry types.
//!
//! Defines one downloadable file from a listing and the rules that classify
//! it by packaging format and target architecture.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Packaging format of an artifact, derived from its file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactKind {
    Package,
    PackageBundle,
    LegacyPackage,
    LegacyBundle,
    Blockmap,
    EncryptedPackage,
    EncryptedBundle,
    Manifest,
    Other,
}

/// Recognized suffixes, checked in order against the lowercased filename.
const KIND_SUFFIXES: &[(&str, ArtifactKind)] = &[
    (".msixbundle", ArtifactKind::PackageBundle),
    (".msix", ArtifactKind::Package),
    (".appxbundle", ArtifactKind::LegacyBundle),
    (".appx", ArtifactKind::LegacyPackage),
    (".blockmap", ArtifactKind::Blockmap),
    (".emsixbundle", ArtifactKind::EncryptedBundle),
    (".eappxbundle", ArtifactKind::EncryptedBundle),
    (".emsix", ArtifactKind::EncryptedPackage),
    (".eappx", ArtifactKind::EncryptedPackage),
    (".xml", ArtifactKind::Manifest),
];

impl ArtifactKind {
    /// Classify a decoded filename by its extension (case-insensitive)
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_ascii_lowercase();
        KIND_SUFFIXES
            .iter()
            .find(|(suffix, _)| lower.ends_with(suffix))
            .map(|(_, kind)| *kind)
            .unwrap_or(ArtifactKind::Other)
    }

    /// Installable package formats, as opposed to blockmaps, manifests and the like
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            ArtifactKind::Package
                | ArtifactKind::PackageBundle
                | ArtifactKind::LegacyPackage
                | ArtifactKind::LegacyBundle
        )
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Package => "package",
            ArtifactKind::PackageBundle => "packageBundle",
            ArtifactKind::LegacyPackage => "legacyPackage",
            ArtifactKind::LegacyBundle => "legacyBundle",
            ArtifactKind::Blockmap => "blockmap",
            ArtifactKind::EncryptedPackage => "encryptedPackage",
            ArtifactKind::EncryptedBundle => "encryptedBundle",
            ArtifactKind::Manifest => "manifest",
            ArtifactKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Target CPU architecture inferred from filename markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X64,
    Arm64,
    X86,
    Neutral,
}

impl Architecture {
    /// Display order used when grouping files by architecture
    pub const ALL: [Architecture; 4] = [
        Architecture::X64,
        Architecture::Arm64,
        Architecture::X86,
        Architecture::Neutral,
    ];

    /// Infer the architecture from underscore-delimited markers.
    ///
    /// `_x64_` wins over `_arm64_`, which wins over `_x86_`.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_ascii_lowercase();
        if lower.contains("_x64_") {
            Architecture::X64
        } else if lower.contains("_arm64_") {
            Architecture::Arm64
        } else if lower.contains("_x86_") {
            Architecture::X86
        } else {
            Architecture::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X64 => "x64",
            Architecture::Arm64 => "arm64",
            Architecture::X86 => "x86",
            Architecture::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One downloadable file from a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// Absolute download URL
    pub url: String,
    /// Percent-decoded display name
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    #[serde(rename = "arch")]
    pub architecture: Architecture,
    /// `None` until probed, `Some(None)` when probing was inconclusive
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_probed"
    )]
    pub size: Option<Option<u64>>,
}

impl ArtifactEntry {
    /// Create an unprobed entry, classifying the filename
    pub fn new(url: String, filename: String) -> Self {
        let kind = ArtifactKind::from_filename(&filename);
        let architecture = Architecture::from_filename(&filename);
        Self {
            url,
            filename,
            kind,
            architecture,
            size: None,
        }
    }

    /// Human-readable size of this entry
    pub fn size_display(&self) -> SizeDisplay {
        SizeDisplay(self.size)
    }
}

// A present `null` means "probed, unknown"; a missing field means "not probed".
fn deserialize_probed<'de, D>(deserializer: D) -> Result<Option<Option<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Some)
}

/// Renders a probe state as `fetching…`, `—` or megabytes with one decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeDisplay(pub Option<Option<u64>>);

impl fmt::Display for SizeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("fetching…"),
            Some(None) => f.write_str("—"),
            Some(Some(bytes)) => {
                let mb = bytes as f64 / (1024.0 * 1024.0);
                write!(f, "{:.1} MB", mb)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(ArtifactKind::from_filename("Contoso_x64_1.0.0.0.msix"), ArtifactKind::Package);
        assert_eq!(
            ArtifactKind::from_filename("Contoso_1.0.0.0_neutral.MsixBundle"),
            ArtifactKind::PackageBundle
        );
        assert_eq!(ArtifactKind::from_filename("Contoso.appx"), ArtifactKind::LegacyPackage);
        assert_eq!(
            ArtifactKind::from_filename("Contoso_arm64_1.0.0.0.appxbundle"),
            ArtifactKind::LegacyBundle
        );
        assert_eq!(ArtifactKind::from_filename("Contoso.BlockMap"), ArtifactKind::Blockmap);
        assert_eq!(ArtifactKind::from_filename("Contoso.eappx"), ArtifactKind::EncryptedPackage);
        assert_eq!(ArtifactKind::from_filename("Contoso.emsix"), ArtifactKind::EncryptedPackage);
        assert_eq!(
            ArtifactKind::from_filename("Contoso.emsixbundle"),
            ArtifactKind::EncryptedBundle
        );
        assert_eq!(ArtifactKind::from_filename("AppxManifest.xml"), ArtifactKind::Manifest);
        assert_eq!(ArtifactKind::from_filename("readme.txt"), ArtifactKind::Other);
        assert_eq!(ArtifactKind::from_filename("msix"), ArtifactKind::Other);
    }

    #[test]
    fn test_primary_kinds() {
        assert!(ArtifactKind::Package.is_primary());
        assert!(ArtifactKind::LegacyBundle.is_primary());
        assert!(!ArtifactKind::Blockmap.is_primary());
        assert!(!ArtifactKind::EncryptedPackage.is_primary());
        assert!(!ArtifactKind::Other.is_primary());
    }

    #[test]
    fn test_architecture_markers() {
        assert_eq!(Architecture::from_filename("Contoso_x64_1.0.0.0.msix"), Architecture::X64);
        assert_eq!(
            Architecture::from_filename("Contoso_arm64_1.0.0.0.appxbundle"),
            Architecture::Arm64
        );
        assert_eq!(Architecture::from_filename("Contoso_X86_1.0.msix"), Architecture::X86);
        assert_eq!(Architecture::from_filename("Contoso.msix"), Architecture::Neutral);
        // Markers must be underscore-delimited
        assert_eq!(Architecture::from_filename("Contosox64.msix"), Architecture::Neutral);
        assert_eq!(Architecture::from_filename("Contoso_x64.msix"), Architecture::Neutral);
    }

    #[test]
    fn test_architecture_priority() {
        // x64 is checked before arm64 and x86
        assert_eq!(Architecture::from_filename("A_x86_B_x64_C.msix"), Architecture::X64);
        assert_eq!(Architecture::from_filename("A_x86_B_arm64_C.msix"), Architecture::Arm64);
    }

    #[test]
    fn test_entry_serialization() {
        let mut entry = ArtifactEntry::new(
            "https://example.com/a.msix".to_string(),
            "Contoso_x64_1.0.0.0.msix".to_string(),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "package");
        assert_eq!(json["arch"], "x64");
        assert!(json.get("size").is_none());

        entry.size = Some(None);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["size"].is_null());

        let back: ArtifactEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back.size, Some(None));
    }

    #[test]
    fn test_size_display() {
        assert_eq!(SizeDisplay(None).to_string(), "fetching…");
        assert_eq!(SizeDisplay(Some(None)).to_string(), "—");
        assert_eq!(SizeDisplay(Some(Some(1024 * 1024))).to_string(), "1.0 MB");
        assert_eq!(SizeDisplay(Some(Some(52_428_800 + 104_858))).to_string(), "50.1 MB");
        assert_eq!(SizeDisplay(Some(Some(0))).to_string(), "0.0 MB");
    }
}
