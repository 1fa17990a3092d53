use crate::error::ReportError;
use crate::tracker::{Issue, IssueType};

const UNASSIGNED: &str = "not assigned yet";

/// Renders issue titles as markdown: icon, link, summary and assignee
#[derive(Debug, Clone)]
pub struct TitleRenderer {
    base_url: String,
}

impl TitleRenderer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fails on issue types outside the project schema rather than guessing an icon
    pub fn render(&self, issue: &Issue) -> Result<String, ReportError> {
        let issue_type: IssueType =
            issue
                .issue_type
                .parse()
                .map_err(|_| ReportError::UnsupportedIssueType {
                    key: issue.key.clone(),
                    issue_type: issue.issue_type.clone(),
                })?;

        let mut title = format!(
            "{} [{}]({}/browse/{}) {}",
            icon(issue_type),
            issue.key,
            self.base_url,
            issue.key,
            issue.summary
        );

        if !issue_type.is_grouping() {
            let assignee = issue.assignee.as_deref().unwrap_or(UNASSIGNED);
            title.push_str(&format!(" (_{}_)", assignee));
        }

        Ok(title)
    }
}

fn icon(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::Objective => "🎯",
        IssueType::Epic => "⚡",
        IssueType::Story => "📗",
        IssueType::Task => "☑️",
        IssueType::Spike => "🔬",
        IssueType::Bug => "🐞",
        IssueType::SubTask => "🔹",
    }
}
