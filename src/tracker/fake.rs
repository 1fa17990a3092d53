use super::{Issue, IssueSource};
use crate::error::SourceError;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use std::collections::{HashMap, HashSet};

/// In-memory tracker for tests
#[derive(Default)]
pub struct FakeSource {
    issues: HashMap<String, Issue>,
    searches: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    pub calls: Vec<String>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.insert(issue.key.clone(), issue);
    }

    /// Register the keys a query returns, in order
    pub fn on_search(&mut self, query: impl Into<String>, keys: &[&str]) {
        self.searches
            .insert(query.into(), keys.iter().map(|k| k.to_string()).collect());
    }

    /// Make a query fail as if the tracker were unavailable
    pub fn fail_search(&mut self, query: impl Into<String>) {
        self.failing.insert(query.into());
    }
}

#[async_trait]
impl IssueSource for FakeSource {
    async fn search(&mut self, query: &str) -> Result<Vec<Issue>, SourceError> {
        self.calls.push(format!("search:{}", query));
        if self.failing.contains(query) {
            return Err(SourceError::Status {
                status: 503,
                url: query.to_string(),
                body: "unavailable".to_string(),
            });
        }
        let keys = self.searches.get(query).cloned().unwrap_or_default();
        keys.iter()
            .map(|key| {
                self.issues.get(key).cloned().ok_or_else(|| SourceError::Status {
                    status: 404,
                    url: key.clone(),
                    body: "not registered".to_string(),
                })
            })
            .collect()
    }

    async fn get_issue(&mut self, key: &str) -> Result<Issue, SourceError> {
        self.calls.push(format!("get:{}", key));
        self.issues
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::Status {
                status: 404,
                url: key.to_string(),
                body: "not registered".to_string(),
            })
    }
}

pub fn issue(key: &str, issue_type: &str, status: &str, summary: &str) -> Issue {
    Issue {
        key: key.to_string(),
        issue_type: issue_type.to_string(),
        status: status.to_string(),
        assignee: None,
        summary: summary.to_string(),
        parent: None,
        resolved: None,
    }
}

pub fn resolved_at(mut issue: Issue, rfc3339: &str) -> Issue {
    issue.resolved = Some(DateTime::<FixedOffset>::parse_from_rfc3339(rfc3339).unwrap());
    issue
}
