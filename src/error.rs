use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Config file '{path}' not found. Create it with at least jira.base_url and jira.project set (see `pulse schema`)"
    )]
    Missing { path: PathBuf },

    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Missing required config value '{0}'. Set it in the config file")]
    MissingField(&'static str),

    #[error(
        "Templates file '{path}' not found. Create it with the keys intro, in_review, in_progress and triaged"
    )]
    TemplatesMissing { path: PathBuf },

    #[error("Failed to read templates file '{path}': {source}")]
    ReadTemplates {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Jira returned HTTP {status} for {url}: {body}")]
    Status { status: u16, url: String, body: String },

    #[error("Failed to decode Jira response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid timestamp '{value}' on {key}: expected YYYY-MM-DDTHH:MM:SS.sss+HHMM")]
    Timestamp { key: String, value: String },

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl SourceError {
    /// Network failures, throttling and server-side errors are worth another attempt
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Http { .. } => true,
            SourceError::Status { status, .. } => *status == 429 || *status >= 500,
            SourceError::Decode { .. } | SourceError::Timestamp { .. } | SourceError::Cache(_) => {
                false
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to read cache file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cache file '{path}' is corrupt ({source}). Delete it or run with --no-cache")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Cached entry '{key}' has an unexpected shape: {source}")]
    Entry {
        key: String,
        source: serde_json::Error,
    },

    #[error("Failed to write cache file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unsupported issue type '{issue_type}' on {key}")]
    UnsupportedIssueType { key: String, issue_type: String },

    #[error("Issue source error: {0}")]
    Source(#[from] SourceError),
}
