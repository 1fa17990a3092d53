mod issue;
mod jira;
pub mod jql;
mod retry;

#[cfg(test)]
pub mod fake;

pub use issue::{Issue, IssueType};
pub use jira::{Credentials, JiraClient};

use crate::error::SourceError;
use async_trait::async_trait;

/// Where issues come from. Calls are awaited one at a time and results keep
/// the tracker's ordering.
#[async_trait]
pub trait IssueSource: Send {
    async fn search(&mut self, query: &str) -> Result<Vec<Issue>, SourceError>;

    async fn get_issue(&mut self, key: &str) -> Result<Issue, SourceError>;
}
