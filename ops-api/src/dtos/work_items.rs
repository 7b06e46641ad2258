use crate::models::{WorkItem, WorkPriority, WorkStatus};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkItemResponse {
    pub id: String,
    pub profile_key: String,
    pub title: String,
    pub status: WorkStatus,
    pub priority: WorkPriority,
    pub assignee: Option<String>,
    pub notes: Option<String>,
}

impl From<WorkItem> for WorkItemResponse {
    fn from(item: WorkItem) -> Self {
        Self {
            id: item.id,
            profile_key: item.profile_key,
            title: item.title,
            status: item.status,
            priority: item.priority,
            assignee: item.assignee,
            notes: item.notes,
        }
    }
}

/// Body of `POST /work-items`. The server assigns the id.
#[derive(Debug, Deserialize, Validate)]
pub struct WorkItemCreate {
    #[validate(length(min = 1, message = "profile_key cannot be empty"))]
    pub profile_key: String,
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    #[serde(default)]
    pub status: WorkStatus,
    #[serde(default)]
    pub priority: WorkPriority,
    pub assignee: Option<String>,
    pub notes: Option<String>,
}

impl From<WorkItemCreate> for WorkItem {
    fn from(req: WorkItemCreate) -> Self {
        WorkItem::new(
            req.profile_key,
            req.title,
            req.status,
            req.priority,
            req.assignee,
            req.notes,
        )
    }
}

/// Raw query string of `GET /work-items`.
#[derive(Debug, Default, Deserialize)]
pub struct WorkItemListParams {
    pub profile_key: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkItemFilter {
    pub profile_key: Option<String>,
    pub status: Option<WorkStatus>,
    pub priority: Option<WorkPriority>,
}

impl TryFrom<WorkItemListParams> for WorkItemFilter {
    type Error = AppError;

    fn try_from(params: WorkItemListParams) -> Result<Self, Self::Error> {
        let status = params
            .status
            .map(|s| s.parse::<WorkStatus>())
            .transpose()
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))?;
        let priority = params
            .priority
            .map(|p| p.parse::<WorkPriority>())
            .transpose()
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))?;

        Ok(Self {
            profile_key: params.profile_key.filter(|k| !k.is_empty()),
            status,
            priority,
        })
    }
}
