mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            jira: JiraConfig::default(),
            cache: CacheConfig::default(),
            templates: default_templates(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jira.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("jira.base_url"));
        }
        if self.jira.project.trim().is_empty() {
            return Err(ConfigError::MissingField("jira.project"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.jira.base_url.trim_end_matches('/')
    }
}

impl Templates {
    /// Load the planning texts; a missing file is fatal
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::TemplatesMissing {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadTemplates {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(serde_yaml::from_str(&content)?)
    }
}
