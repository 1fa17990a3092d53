use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub jira: JiraConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// Path to the YAML file holding the planning report texts
    #[serde(default = "default_templates")]
    pub templates: PathBuf,

    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct JiraConfig {
    /// Instance root, e.g. https://example.atlassian.net
    #[serde(default)]
    pub base_url: String,

    /// Project key used by the retro search
    #[serde(default)]
    pub project: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            project: String::new(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_cache_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

/// Section texts for the planning report
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Templates {
    pub intro: String,
    pub in_review: String,
    pub in_progress: String,
    pub triaged: String,
}
