use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// An issue as fetched from the tracker. Never mutated after a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Issue {
    pub key: String,

    /// Raw tracker type name; see [`IssueType`] for the supported set
    #[serde(rename = "type")]
    pub issue_type: String,

    pub status: String,

    #[serde(default)]
    pub assignee: Option<String>,

    pub summary: String,

    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default)]
    pub resolved: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueType {
    Objective,
    Epic,
    Story,
    Task,
    Spike,
    Bug,
    SubTask,
}

impl IssueType {
    /// Objectives and epics are grouping levels and carry no assignee in titles
    pub fn is_grouping(self) -> bool {
        matches!(self, IssueType::Objective | IssueType::Epic)
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::Objective => write!(f, "Objective"),
            IssueType::Epic => write!(f, "Epic"),
            IssueType::Story => write!(f, "Story"),
            IssueType::Task => write!(f, "Task"),
            IssueType::Spike => write!(f, "Spike"),
            IssueType::Bug => write!(f, "Bug"),
            IssueType::SubTask => write!(f, "Sub-task"),
        }
    }
}

impl std::str::FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Objective" => Ok(IssueType::Objective),
            "Epic" => Ok(IssueType::Epic),
            "Story" => Ok(IssueType::Story),
            "Task" => Ok(IssueType::Task),
            "Spike" => Ok(IssueType::Spike),
            "Bug" => Ok(IssueType::Bug),
            "Sub-task" => Ok(IssueType::SubTask),
            _ => Err(format!("Unknown issue type: {}", s)),
        }
    }
}
