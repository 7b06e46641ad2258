use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    #[default]
    Backlog,
    InProgress,
    Blocked,
    Done,
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkStatus::Backlog => write!(f, "backlog"),
            WorkStatus::InProgress => write!(f, "in_progress"),
            WorkStatus::Blocked => write!(f, "blocked"),
            WorkStatus::Done => write!(f, "done"),
        }
    }
}

impl FromStr for WorkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(WorkStatus::Backlog),
            "in_progress" => Ok(WorkStatus::InProgress),
            "blocked" => Ok(WorkStatus::Blocked),
            "done" => Ok(WorkStatus::Done),
            _ => Err(format!("Invalid work status: {}", s)),
        }
    }
}

/// Stored as its lowercase name. Sorting on this field is lexical, so
/// `urgent > medium > low > high`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl fmt::Display for WorkPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkPriority::Low => write!(f, "low"),
            WorkPriority::Medium => write!(f, "medium"),
            WorkPriority::High => write!(f, "high"),
            WorkPriority::Urgent => write!(f, "urgent"),
        }
    }
}

impl FromStr for WorkPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(WorkPriority::Low),
            "medium" => Ok(WorkPriority::Medium),
            "high" => Ok(WorkPriority::High),
            "urgent" => Ok(WorkPriority::Urgent),
            _ => Err(format!("Invalid work priority: {}", s)),
        }
    }
}

/// A task attached to one profile. `profile_key` is not checked against
/// the profiles collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub profile_key: String,
    pub title: String,
    #[serde(default)]
    pub status: WorkStatus,
    #[serde(default)]
    pub priority: WorkPriority,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkItem {
    pub fn new(
        profile_key: String,
        title: String,
        status: WorkStatus,
        priority: WorkPriority,
        assignee: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            profile_key,
            title,
            status,
            priority,
            assignee,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_backlog_and_medium() {
        assert_eq!(WorkStatus::default(), WorkStatus::Backlog);
        assert_eq!(WorkPriority::default(), WorkPriority::Medium);
    }

    #[test]
    fn test_new_generates_distinct_ids() {
        let a = WorkItem::new(
            "hr".to_string(),
            "Onboard".to_string(),
            WorkStatus::Backlog,
            WorkPriority::Medium,
            None,
            None,
        );
        let b = WorkItem::new(
            "hr".to_string(),
            "Onboard".to_string(),
            WorkStatus::Backlog,
            WorkPriority::Medium,
            None,
            None,
        );
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&WorkStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!("blocked".parse::<WorkStatus>().unwrap(), WorkStatus::Blocked);
        assert!("In Progress".parse::<WorkStatus>().is_err());
    }

    #[test]
    fn test_priority_display_matches_serde() {
        for priority in [
            WorkPriority::Low,
            WorkPriority::Medium,
            WorkPriority::High,
            WorkPriority::Urgent,
        ] {
            let json = serde_json::to_string(&priority).unwrap();
            assert_eq!(json, format!("\"{}\"", priority));
            assert_eq!(priority.to_string().parse::<WorkPriority>().unwrap(), priority);
        }
    }

    #[test]
    fn test_seed_record_accepts_plain_id_field() {
        let item: WorkItem = serde_json::from_str(
            r#"{"id":"wi-1","profile_key":"parts","title":"Count stock","status":"done","priority":"high"}"#,
        )
        .unwrap();
        assert_eq!(item.id, "wi-1");
        assert_eq!(item.status, WorkStatus::Done);
        assert_eq!(item.priority, WorkPriority::High);
        assert_eq!(item.assignee, None);
    }
}
