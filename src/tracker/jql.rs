//! JQL expressions used by the report pipeline

use chrono::NaiveDate;

/// Objectives currently being worked on
pub fn active_objectives() -> String {
    r#"type = Objective AND status = "In Progress""#.to_string()
}

/// Direct children of an objective (its epics)
pub fn children_of(key: &str) -> String {
    format!("parent = {}", key)
}

/// Issues linked to an epic
pub fn in_epic(key: &str) -> String {
    format!(r#""Epic Link" = {}"#, key)
}

/// Every project issue resolved as Done on or after `since`
pub fn resolved_since(project: &str, since: NaiveDate) -> String {
    format!(
        r#"project = {} AND resolution = Done AND resolved >= "{}""#,
        project,
        since.format("%Y-%m-%d")
    )
}
