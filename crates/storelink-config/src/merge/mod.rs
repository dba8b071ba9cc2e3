//! Configuration layering, fallback logic, and environment overrides

use std::collections::HashMap;
use std::time::Duration;
use camino::Utf8PathBuf;
use storelink_core::error::StoreError;
use crate::{ConfigResult, CONFIG_FILE_NAME, toml::{validate_endpoint, StorelinkToml}};

/// Default upstream listing endpoint
pub const DEFAULT_ENDPOINT: &str = "https://store.rg-adguard.net/api/GetFiles";

/// Default distribution ring
pub const DEFAULT_RING: &str = "Retail";

/// Default locale
pub const DEFAULT_LANG: &str = "en-US";

/// Default listing request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default per-URL probe timeout
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// Fully resolved settings used by the client
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Upstream listing endpoint
    pub endpoint: String,
    /// Distribution ring form field
    pub ring: String,
    /// Locale form field
    pub lang: String,
    /// Listing request timeout
    pub timeout: Duration,
    /// Per-URL probe timeout
    pub probe_timeout: Duration,
    /// User agent header
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            ring: DEFAULT_RING.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout: DEFAULT_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            user_agent: format!("storelink/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration layering and merging
pub struct ConfigLayering {
    /// Global configuration
    global_config: Option<StorelinkToml>,
    /// Project configuration
    project_config: Option<StorelinkToml>,
    /// Environment overrides
    env_overrides: HashMap<String, String>,
    /// CLI flag overrides
    cli_overrides: HashMap<String, String>,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Global config file
    Global(Utf8PathBuf),
    /// Project storelink.toml file
    Project(Utf8PathBuf),
    /// Built-in defaults only
    Defaults,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load the nearest storelink.toml, if any
    pub async fn load_project_config(&self) -> ConfigResult<Option<(StorelinkToml, ConfigSource)>> {
        let path = self.resolve_config_path(CONFIG_FILE_NAME)?;
        if path.exists() {
            let config = crate::toml::load_from_file(&path).await?;
            return Ok(Some((config, ConfigSource::Project(path))));
        }

        Ok(None)
    }

    /// Find configuration file in project (walks up directory tree)
    pub fn resolve_config_path(&self, filename: &str) -> ConfigResult<Utf8PathBuf> {
        let mut current = self.cwd.as_path();

        loop {
            let config_path = current.join(filename);
            if config_path.exists() {
                return Ok(config_path);
            }

            // Move up one directory
            if let Some(parent) = current.parent() {
                current = parent;
            } else {
                // Reached filesystem root
                break;
            }
        }

        // Return path in current directory even if it doesn't exist
        Ok(self.cwd.join(filename))
    }

    /// Load global configuration from ~/.storelink/config.toml
    pub async fn load_global_config(&self) -> ConfigResult<Option<(StorelinkToml, ConfigSource)>> {
        let home_dir = dirs::home_dir().ok_or_else(|| StoreError::ConfigValidation {
            field: "home_dir".to_string(),
            reason: "Could not determine home directory".to_string(),
        })?;

        let global_config_path = Utf8PathBuf::try_from(home_dir)
            .map_err(|e| StoreError::ConfigValidation {
                field: "home_dir".to_string(),
                reason: format!("Invalid home directory path: {}", e),
            })?
            .join(".storelink")
            .join("config.toml");

        if global_config_path.exists() {
            let config = crate::toml::load_from_file(&global_config_path).await?;
            Ok(Some((config, ConfigSource::Global(global_config_path))))
        } else {
            Ok(None)
        }
    }

    /// Load every layer and resolve the final settings
    pub async fn load_settings(&self, cli_overrides: HashMap<String, String>) -> ConfigResult<(Settings, ConfigSource)> {
        // A missing home directory only disables the global layer
        let global = match self.load_global_config().await {
            Ok(config) => config,
            Err(StoreError::ConfigValidation { field, .. }) if field == "home_dir" => None,
            Err(e) => return Err(e),
        };
        let project = self.load_project_config().await?;

        // Report the most specific file that contributed
        let source = match (&project, &global) {
            (Some((_, source)), _) | (None, Some((_, source))) => source.clone(),
            (None, None) => ConfigSource::Defaults,
        };

        let layering = ConfigLayering {
            global_config: global.map(|(config, _)| config),
            project_config: project.map(|(config, _)| config),
            env_overrides: ConfigLayering::collect_env_overrides(),
            cli_overrides,
        };

        Ok((layering.resolve()?, source))
    }
}

impl ConfigLayering {
    /// Create a new configuration layering system
    pub fn new() -> Self {
        Self {
            global_config: None,
            project_config: None,
            env_overrides: HashMap::new(),
            cli_overrides: HashMap::new(),
        }
    }

    /// Resolve the layers held by this value
    pub fn resolve(self) -> ConfigResult<Settings> {
        Self::merge_configs(
            self.global_config,
            self.project_config,
            self.env_overrides,
            self.cli_overrides,
        )
    }

    /// Merge multiple configuration layers on top of the defaults
    pub fn merge_configs(
        global_config: Option<StorelinkToml>,
        project_config: Option<StorelinkToml>,
        env_overrides: HashMap<String, String>,
        cli_overrides: HashMap<String, String>,
    ) -> ConfigResult<Settings> {
        let mut settings = Settings::default();

        // Project file overrides the global file
        for file in [global_config, project_config].into_iter().flatten() {
            Self::apply_file(&mut settings, file);
        }

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut settings, &env_overrides)?;

        // Apply CLI flag overrides (highest priority)
        Self::apply_cli_overrides(&mut settings, &cli_overrides)?;

        validate_endpoint("endpoint", &settings.endpoint)?;

        Ok(settings)
    }

    fn apply_file(settings: &mut Settings, file: StorelinkToml) {
        let upstream = file.upstream;
        if let Some(endpoint) = upstream.endpoint {
            settings.endpoint = endpoint;
        }
        if let Some(ring) = upstream.ring {
            settings.ring = ring;
        }
        if let Some(lang) = upstream.lang {
            settings.lang = lang;
        }
        if let Some(secs) = upstream.timeout_secs {
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(user_agent) = upstream.user_agent {
            settings.user_agent = user_agent;
        }
        if let Some(secs) = file.probe.timeout_secs {
            settings.probe_timeout = Duration::from_secs(secs);
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(settings: &mut Settings, overrides: &HashMap<String, String>) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "STORELINK_ENDPOINT" => {
                    settings.endpoint = value.clone();
                }
                "STORELINK_RING" => {
                    settings.ring = non_empty(key, value)?;
                }
                "STORELINK_LANG" => {
                    settings.lang = non_empty(key, value)?;
                }
                "STORELINK_TIMEOUT_SECS" => {
                    settings.timeout = parse_secs(key, value)?;
                }
                "STORELINK_PROBE_TIMEOUT_SECS" => {
                    settings.probe_timeout = parse_secs(key, value)?;
                }
                _ => {
                    // Unknown environment variable, ignore
                }
            }
        }

        Ok(())
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(settings: &mut Settings, overrides: &HashMap<String, String>) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "endpoint" => {
                    settings.endpoint = value.clone();
                }
                "timeout" => {
                    settings.timeout = parse_secs("--timeout", value)?;
                }
                "probe-timeout" => {
                    settings.probe_timeout = parse_secs("--probe-timeout", value)?;
                }
                _ => {
                    // Unknown CLI override, ignore
                }
            }
        }

        Ok(())
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with("STORELINK_"))
            .collect()
    }
}

impl Default for ConfigLayering {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_secs(field: &str, value: &str) -> ConfigResult<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(StoreError::ConfigValidation {
            field: field.to_string(),
            reason: format!("expected a positive number of seconds, got '{}'", value),
        }),
    }
}

fn non_empty(field: &str, value: &str) -> ConfigResult<String> {
    if value.trim().is_empty() {
        return Err(StoreError::ConfigValidation {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml::{ProbeSection, UpstreamSection};
    use tempfile::TempDir;

    fn file_with_lang(lang: &str) -> StorelinkToml {
        StorelinkToml {
            upstream: UpstreamSection {
                lang: Some(lang.to_string()),
                ..Default::default()
            },
            probe: ProbeSection::default(),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = ConfigLayering::new().resolve().unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.ring, "Retail");
        assert_eq!(settings.lang, "en-US");
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert!(settings.user_agent.starts_with("storelink/"));
    }

    #[tokio::test]
    async fn test_resolve_config_path_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let nested = root.join("a").join("b");
        tokio::fs::create_dir_all(&nested).await.unwrap();
        tokio::fs::write(root.join(CONFIG_FILE_NAME), "[upstream]\nring = \"RP\"\n").await.unwrap();

        let loader = ConfigLoader::new(nested);
        let resolved = loader.resolve_config_path(CONFIG_FILE_NAME).unwrap();
        assert_eq!(resolved, root.join(CONFIG_FILE_NAME));

        let (config, source) = loader.load_project_config().await.unwrap().unwrap();
        assert_eq!(config.upstream.ring.as_deref(), Some("RP"));
        assert_eq!(source, ConfigSource::Project(root.join(CONFIG_FILE_NAME)));
    }

    #[tokio::test]
    async fn test_missing_project_config() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        let loader = ConfigLoader::new(root);
        assert!(loader.load_project_config().await.unwrap().is_none());
    }

    #[test]
    fn test_layer_precedence() {
        let global = file_with_lang("fr-FR");
        let mut project = file_with_lang("de-DE");
        project.probe.timeout_secs = Some(4);

        let env = HashMap::from([
            ("STORELINK_RING".to_string(), "WIF".to_string()),
            ("STORELINK_TIMEOUT_SECS".to_string(), "12".to_string()),
        ]);
        let cli = HashMap::from([
            ("timeout".to_string(), "7".to_string()),
            ("endpoint".to_string(), "http://127.0.0.1:9000/api/GetFiles".to_string()),
        ]);

        let settings = ConfigLayering::merge_configs(Some(global), Some(project), env, cli).unwrap();

        assert_eq!(settings.lang, "de-DE");
        assert_eq!(settings.ring, "WIF");
        assert_eq!(settings.timeout, Duration::from_secs(7));
        assert_eq!(settings.probe_timeout, Duration::from_secs(4));
        assert_eq!(settings.endpoint, "http://127.0.0.1:9000/api/GetFiles");
    }

    #[test]
    fn test_invalid_overrides() {
        let env = HashMap::from([("STORELINK_TIMEOUT_SECS".to_string(), "soon".to_string())]);
        let result = ConfigLayering::merge_configs(None, None, env, HashMap::new());
        assert!(matches!(result, Err(StoreError::ConfigValidation { .. })));

        let cli = HashMap::from([("endpoint".to_string(), "not a url".to_string())]);
        let result = ConfigLayering::merge_configs(None, None, HashMap::new(), cli);
        assert!(matches!(result, Err(StoreError::ConfigValidation { .. })));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let env = HashMap::from([("STORELINK_SOMETHING".to_string(), "x".to_string())]);
        let cli = HashMap::from([("verbose".to_string(), "true".to_string())]);
        let settings = ConfigLayering::merge_configs(None, None, env, cli).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
