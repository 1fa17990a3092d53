use super::{Aggregate, TitleRenderer};
use crate::error::ReportError;
use crate::tracker::{jql, Issue, IssueSource};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Epics in these states are skipped along with all their issues
const SKIPPED_EPIC_STATUSES: &[&str] = &["Done", "Untriaged", "Rejected"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBucket {
    InReview,
    InProgress,
    Triaged,
    Done,
    Excluded,
}

impl StatusBucket {
    /// Map a workflow status, ignoring case. Returns None for statuses outside
    /// the project's vocabulary.
    pub fn from_status(status: &str) -> Option<Self> {
        match status.to_lowercase().as_str() {
            "in review" | "to be deployed" => Some(StatusBucket::InReview),
            "in progress" => Some(StatusBucket::InProgress),
            "triaged" => Some(StatusBucket::Triaged),
            "done" => Some(StatusBucket::Done),
            "rejected" | "untriaged" => Some(StatusBucket::Excluded),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Classification {
    pub in_review: Aggregate,
    pub in_progress: Aggregate,
    pub triaged: Aggregate,
    pub done: Aggregate,
    /// Every issue looked at under a live epic, whatever its bucket
    pub visited: Vec<Issue>,
    pub diagnostics: Vec<String>,
}

impl Classification {
    fn bucket_mut(&mut self, bucket: StatusBucket) -> Option<&mut Aggregate> {
        match bucket {
            StatusBucket::InReview => Some(&mut self.in_review),
            StatusBucket::InProgress => Some(&mut self.in_progress),
            StatusBucket::Triaged => Some(&mut self.triaged),
            StatusBucket::Done => Some(&mut self.done),
            StatusBucket::Excluded => None,
        }
    }
}

/// Walk objective → epic → issue and sort issues into status buckets.
///
/// Done issues only count when `done_since` is set and they were resolved
/// at or after it.
pub async fn classify<S>(
    source: &mut S,
    titles: &TitleRenderer,
    objectives_query: &str,
    done_since: Option<DateTime<Utc>>,
) -> Result<Classification, ReportError>
where
    S: IssueSource + ?Sized,
{
    let mut result = Classification::default();

    let objectives = source.search(objectives_query).await?;
    debug!("Found {} active objectives", objectives.len());

    for objective_ref in &objectives {
        let objective = source.get_issue(&objective_ref.key).await?;
        let objective_title = titles.render(&objective)?;

        let epics = source.search(&jql::children_of(&objective.key)).await?;
        for epic in &epics {
            if SKIPPED_EPIC_STATUSES.contains(&epic.status.as_str()) {
                debug!("Skipping epic {} ({})", epic.key, epic.status);
                continue;
            }
            let epic_title = titles.render(epic)?;

            let issues = source.search(&jql::in_epic(&epic.key)).await?;
            for issue in issues {
                // Every visited issue needs a supported type, bucketed or not
                let issue_title = titles.render(&issue)?;

                let bucket = match StatusBucket::from_status(&issue.status) {
                    Some(StatusBucket::Done) if !resolved_on_or_after(&issue, done_since) => {
                        StatusBucket::Excluded
                    }
                    Some(bucket) => bucket,
                    None => {
                        let message =
                            format!("Unknown status '{}' on {}", issue.status, issue.key);
                        warn!("{}", message);
                        result.diagnostics.push(message);
                        StatusBucket::Excluded
                    }
                };

                if let Some(aggregate) = result.bucket_mut(bucket) {
                    aggregate.insert(&objective_title, &epic_title, issue_title);
                }

                result.visited.push(issue);
            }
        }
    }

    if !result.diagnostics.is_empty() {
        warn!(
            "{} issues left out because of unknown statuses",
            result.diagnostics.len()
        );
    }

    Ok(result)
}

/// Whether the issue was resolved at or after `done_since`; false when either is missing
pub(super) fn resolved_on_or_after(issue: &Issue, done_since: Option<DateTime<Utc>>) -> bool {
    match (done_since, issue.resolved) {
        (Some(since), Some(resolved)) => resolved.with_timezone(&Utc) >= since,
        _ => false,
    }
}
