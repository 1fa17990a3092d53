use super::retry::retry_with_backoff;
use super::{Issue, IssueSource};
use crate::config::{Config, RetryConfig};
use crate::error::SourceError;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::debug;

const FIELDS: &str = "summary,status,issuetype,assignee,parent,resolutiondate";

/// Basic-auth pair for the Jira REST API
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub token: String,
}

/// Jira REST v2 client
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
    page_size: u32,
    retry: RetryConfig,
}

#[derive(Deserialize)]
struct SearchPage {
    #[serde(rename = "startAt", default)]
    start_at: u64,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    issues: Vec<WireIssue>,
}

#[derive(Deserialize)]
struct WireIssue {
    key: String,
    fields: WireFields,
}

#[derive(Deserialize)]
struct WireFields {
    summary: String,
    status: Named,
    issuetype: Named,
    #[serde(default)]
    assignee: Option<WireUser>,
    #[serde(default)]
    parent: Option<WireParent>,
    #[serde(default)]
    resolutiondate: Option<String>,
}

#[derive(Deserialize)]
struct Named {
    name: String,
}

#[derive(Deserialize)]
struct WireUser {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Deserialize)]
struct WireParent {
    key: String,
}

impl SearchPage {
    /// Offset of the page after this one, counted from the offset we asked
    /// for. The echoed `startAt` is not trusted.
    fn next_from(&self, requested: u64) -> Option<u64> {
        if self.start_at != requested {
            debug!(
                "Server answered startAt={} for a request at {}",
                self.start_at, requested
            );
        }
        next_start(requested, self.issues.len() as u64, self.total)
    }
}

impl WireIssue {
    fn into_issue(self) -> Result<Issue, SourceError> {
        let resolved = match self.fields.resolutiondate {
            Some(value) => Some(parse_timestamp(&self.key, &value)?),
            None => None,
        };

        Ok(Issue {
            key: self.key,
            issue_type: self.fields.issuetype.name,
            status: self.fields.status.name,
            assignee: self.fields.assignee.map(|u| u.display_name),
            summary: self.fields.summary,
            parent: self.fields.parent.map(|p| p.key),
            resolved,
        })
    }
}

/// Parse a Jira timestamp such as `2026-10-01T09:15:00.000+0200`.
/// Any other shape is rejected.
pub fn parse_timestamp(key: &str, value: &str) -> Result<DateTime<FixedOffset>, SourceError> {
    let invalid = || SourceError::Timestamp {
        key: key.to_string(),
        value: value.to_string(),
    };

    static SHAPE: OnceLock<Regex> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}[+-]\d{4}$")
            .expect("timestamp regex compiles")
    });
    if !shape.is_match(value) {
        return Err(invalid());
    }

    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z").map_err(|_| invalid())
}

/// Offset of the next page, or None once every result has been read
fn next_start(start_at: u64, fetched: u64, total: u64) -> Option<u64> {
    let next = start_at + fetched;
    if fetched == 0 || next >= total {
        None
    } else {
        Some(next)
    }
}

impl JiraClient {
    pub fn new(config: &Config, credentials: Option<Credentials>) -> Result<Self, SourceError> {
        let base_url = config.base_url().to_string();
        let http = reqwest::Client::builder()
            .user_agent(concat!("pulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Http {
                url: base_url.clone(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url,
            credentials,
            page_size: config.jira.page_size.max(1),
            retry: config.retry.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, SourceError> {
        retry_with_backoff(&self.retry, || self.get_json_once(url, params)).await
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let mut request = self.http.get(url).query(params);
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.user, Some(&creds.token));
        }

        let http_err = |e| SourceError::Http {
            url: url.to_string(),
            source: e,
        };

        let response = request.send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        let text = response.text().await.map_err(http_err)?;
        serde_json::from_str(&text).map_err(|e| SourceError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl IssueSource for JiraClient {
    async fn search(&mut self, query: &str) -> Result<Vec<Issue>, SourceError> {
        let url = format!("{}/rest/api/2/search", self.base_url);
        let mut issues = Vec::new();
        let mut start_at: u64 = 0;

        loop {
            let params = [
                ("jql", query.to_string()),
                ("startAt", start_at.to_string()),
                ("maxResults", self.page_size.to_string()),
                ("fields", FIELDS.to_string()),
            ];
            let page: SearchPage = self.get_json(&url, &params).await?;
            let next = page.next_from(start_at);
            debug!(
                "Search page at {} returned {} of {} issues for {}",
                start_at,
                page.issues.len(),
                page.total,
                query
            );

            for wire in page.issues {
                issues.push(wire.into_issue()?);
            }

            match next {
                Some(next) => start_at = next,
                None => break,
            }
        }

        Ok(issues)
    }

    async fn get_issue(&mut self, key: &str) -> Result<Issue, SourceError> {
        let url = format!("{}/rest/api/2/issue/{}", self.base_url, key);
        let wire: WireIssue = self
            .get_json(&url, &[("fields", FIELDS.to_string())])
            .await?;
        wire.into_issue()
    }
}
