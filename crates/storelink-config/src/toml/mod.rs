//! storelink.toml configuration parsing and serialization

use serde::{Deserialize, Serialize};
use storelink_core::error::StoreError;
use crate::ConfigResult;

/// Complete storelink.toml configuration. Every field is optional so that
/// files can be layered on top of each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorelinkToml {
    /// Upstream listing service
    #[serde(default)]
    pub upstream: UpstreamSection,

    /// Range probing
    #[serde(default)]
    pub probe: ProbeSection,
}

/// `[upstream]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamSection {
    /// Listing endpoint URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Distribution ring sent with every lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring: Option<String>,

    /// Locale sent with every lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Listing request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// User agent header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// `[probe]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeSection {
    /// Per-URL probe timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Parse storelink.toml content
pub fn parse_storelink_toml(content: &str) -> ConfigResult<StorelinkToml> {
    let config: StorelinkToml = toml::from_str(content).map_err(|e| StoreError::TomlParse {
        message: e.to_string(),
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Serialize configuration back to TOML
pub fn serialize_storelink_toml(config: &StorelinkToml) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| StoreError::TomlParse {
        message: format!("Failed to serialize configuration: {}", e),
    })
}

/// Validate the fields that are present in a single file
pub fn validate_config(config: &StorelinkToml) -> ConfigResult<()> {
    if let Some(endpoint) = &config.upstream.endpoint {
        validate_endpoint("upstream.endpoint", endpoint)?;
    }

    for (field, value) in [
        ("upstream.ring", &config.upstream.ring),
        ("upstream.lang", &config.upstream.lang),
        ("upstream.user_agent", &config.upstream.user_agent),
    ] {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            return Err(StoreError::ConfigValidation {
                field: field.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
    }

    for (field, value) in [
        ("upstream.timeout_secs", config.upstream.timeout_secs),
        ("probe.timeout_secs", config.probe.timeout_secs),
    ] {
        if value == Some(0) {
            return Err(StoreError::ConfigValidation {
                field: field.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
    }

    Ok(())
}

/// Endpoints must be absolute http(s) URLs
pub fn validate_endpoint(field: &str, endpoint: &str) -> ConfigResult<()> {
    let parsed = url::Url::parse(endpoint).map_err(|e| StoreError::ConfigValidation {
        field: field.to_string(),
        reason: format!("'{}' is not a valid URL: {}", endpoint, e),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(StoreError::ConfigValidation {
            field: field.to_string(),
            reason: format!("unsupported scheme '{}', expected http or https", scheme),
        }),
    }
}

/// Load and parse storelink.toml from file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ConfigResult<StorelinkToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::io(format!("Failed to read {}", path), e))?;

    parse_storelink_toml(&content).map_err(|e| match e {
        StoreError::TomlParse { message } => StoreError::TomlParse {
            message: format!("In file {}: {}", path, message),
        },
        StoreError::ConfigValidation { field, reason } => StoreError::ConfigValidation {
            field,
            reason: format!("In file {}: {}", path, reason),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let content = r#"
[upstream]
endpoint = "https://listing.example.com/api/GetFiles"
ring = "RP"
lang = "de-DE"
timeout_secs = 5
user_agent = "custom/1.0"

[probe]
timeout_secs = 3
"#;
        let config = parse_storelink_toml(content).unwrap();
        assert_eq!(
            config.upstream.endpoint.as_deref(),
            Some("https://listing.example.com/api/GetFiles")
        );
        assert_eq!(config.upstream.ring.as_deref(), Some("RP"));
        assert_eq!(config.upstream.lang.as_deref(), Some("de-DE"));
        assert_eq!(config.upstream.timeout_secs, Some(5));
        assert_eq!(config.probe.timeout_secs, Some(3));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_storelink_toml("").unwrap();
        assert_eq!(config, StorelinkToml::default());
    }

    #[test]
    fn test_syntax_error() {
        let result = parse_storelink_toml("[upstream\nendpoint = ");
        assert!(matches!(result, Err(StoreError::TomlParse { .. })));
    }

    #[test]
    fn test_validation_errors() {
        let bad_scheme = "[upstream]\nendpoint = \"ftp://example.com/files\"";
        assert!(matches!(
            parse_storelink_toml(bad_scheme),
            Err(StoreError::ConfigValidation { field, .. }) if field == "upstream.endpoint"
        ));

        let zero_timeout = "[probe]\ntimeout_secs = 0";
        assert!(matches!(
            parse_storelink_toml(zero_timeout),
            Err(StoreError::ConfigValidation { field, .. }) if field == "probe.timeout_secs"
        ));

        let empty_ring = "[upstream]\nring = \"  \"";
        assert!(parse_storelink_toml(empty_ring).is_err());
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let mut config = StorelinkToml::default();
        config.upstream.lang = Some("en-GB".to_string());

        let output = serialize_storelink_toml(&config).unwrap();
        assert!(output.contains("lang = \"en-GB\""));
        assert!(!output.contains("endpoint"));

        let reparsed = parse_storelink_toml(&output).unwrap();
        assert_eq!(reparsed, config);
    }
}
