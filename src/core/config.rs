use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

pub const DEFAULT_FEED_URL: &str = "https://www.amfiindia.com/spages/NAVAll.txt";

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AmfiProviderConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for AmfiProviderConfig {
    fn default() -> Self {
        AmfiProviderConfig {
            url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("amfinav/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl AmfiProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub amfi: AmfiProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "amfinav", "amfinav")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  amfi:
    url: "http://example.com/NAVAll.txt"
    timeout_secs: 5
    user_agent: "test-agent"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.amfi.url, "http://example.com/NAVAll.txt");
        assert_eq!(config.providers.amfi.timeout_secs, 5);
        assert_eq!(config.providers.amfi.timeout(), Duration::from_secs(5));
        assert_eq!(config.providers.amfi.user_agent, "test-agent");
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.providers.amfi.url, DEFAULT_FEED_URL);
        assert_eq!(config.providers.amfi.timeout_secs, 30);
        assert!(config.providers.amfi.user_agent.starts_with("amfinav/"));

        let partial = r#"
providers:
  amfi:
    timeout_secs: 10
"#;
        let config: AppConfig = serde_yaml::from_str(partial).unwrap();
        assert_eq!(config.providers.amfi.url, DEFAULT_FEED_URL);
        assert_eq!(config.providers.amfi.timeout_secs, 10);
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), "providers:\n  amfi:\n    url: \"http://localhost/feed\"\n")?;

        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.providers.amfi.url, "http://localhost/feed");
        Ok(())
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/nonexistent/amfinav/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
