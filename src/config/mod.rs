use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable prefix, e.g. `SITEDATA_RELOAD_SECS=60`.
pub const ENV_PREFIX: &str = "SITEDATA";

/// Errors that can occur while assembling configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Source(#[from] ::config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Site data engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Path to the site data settings YAML file
    pub settings_path: PathBuf,

    /// Settings file reload check interval in seconds
    pub reload_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Config {
    /// Layer defaults, an optional config file and `SITEDATA_*` environment
    /// variables, in increasing priority.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let mut builder = ::config::Config::builder()
            .set_default(
                "settings_path",
                defaults.settings_path.to_string_lossy().into_owned(),
            )?
            .set_default("reload_secs", defaults.reload_secs)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?;

        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        let config: Config = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.reload_secs == 0 {
            return Err(ConfigError::Validation(
                "reload_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get settings reload interval as Duration.
    pub fn reload_interval(&self) -> Duration {
        Duration::from_secs(self.reload_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            settings_path: PathBuf::from("site-data.yaml"),
            reload_secs: 30,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.settings_path, PathBuf::from("site-data.yaml"));
        assert_eq!(config.reload_secs, 30);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn test_duration_helper() {
        let config = Config {
            reload_secs: 60,
            ..Default::default()
        };

        assert_eq!(config.reload_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
settings_path: "/etc/browser/site-data.yaml"
reload_secs: 5
log_json: true
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(
            config.settings_path,
            PathBuf::from("/etc/browser/site-data.yaml")
        );
        assert_eq!(config.reload_secs, 5);
        assert_eq!(config.log_level, "info");
        assert!(config.log_json);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("absent.yaml").as_path())).unwrap();

        assert_eq!(config.reload_secs, 30);
    }

    #[test]
    fn test_zero_reload_interval_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        writeln!(file, "reload_secs: 0").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("reload_secs"));
    }
}
