use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SiteDataPolicy;
use crate::rules::RuleSet;

/// Errors that can occur while loading the site data settings file.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

fn default_fallback() -> SiteDataPolicy {
    SiteDataPolicy::Accept
}

/// On-disk site data settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDataFile {
    /// Comma-separated rule string, e.g. `-google.com,!bugzilla.gnome.org`
    #[serde(default)]
    pub site_data_rules: String,

    /// Verdict applied when no rule matches
    #[serde(default = "default_fallback")]
    pub default_policy: SiteDataPolicy,
}

impl Default for SiteDataFile {
    fn default() -> Self {
        SiteDataFile {
            site_data_rules: String::new(),
            default_policy: default_fallback(),
        }
    }
}

/// Load site data settings from a YAML file.
///
/// The rule string is never validated here; malformed tokens are
/// dropped when the ruleset is built.
pub fn load_settings(path: impl AsRef<Path>) -> Result<SiteDataFile, PolicyError> {
    let content = fs::read_to_string(path)?;

    // An empty document deserializes to unit, not to a mapping
    if content.trim().is_empty() {
        return Ok(SiteDataFile::default());
    }

    let settings: SiteDataFile = serde_yaml::from_str(&content)?;
    validate_settings(&settings)?;

    Ok(settings)
}

fn validate_settings(settings: &SiteDataFile) -> Result<(), PolicyError> {
    if settings.default_policy.is_default() {
        return Err(PolicyError::Validation(
            "default_policy must be ACCEPT, BLOCK or PRESERVE".to_string(),
        ));
    }
    Ok(())
}

/// Loads the settings file and builds rulesets from it.
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    path: PathBuf,
}

impl PolicyLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PolicyLoader { path: path.into() }
    }

    /// Load settings and build the ruleset they describe.
    pub fn load(&self) -> Result<(SiteDataFile, RuleSet), PolicyError> {
        let settings = self.load_settings()?;
        let ruleset = RuleSet::parse(&settings.site_data_rules);

        Ok((settings, ruleset))
    }

    /// Load only the settings file.
    pub fn load_settings(&self) -> Result<SiteDataFile, PolicyError> {
        load_settings(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
