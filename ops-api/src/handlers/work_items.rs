use crate::dtos::{WorkItemCreate, WorkItemFilter, WorkItemListParams, WorkItemResponse};
use crate::models::WorkItem;
use crate::services::record_work_item_created;
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

pub const WORK_ITEM_LIST_LIMIT: i64 = 200;

/// Ordering is the store's descending sort on the priority name, which is
/// not severity order.
#[tracing::instrument(skip(state))]
pub async fn list_work_items(
    State(state): State<AppState>,
    Query(params): Query<WorkItemListParams>,
) -> Result<Json<Vec<WorkItemResponse>>, AppError> {
    let filter = WorkItemFilter::try_from(params)?;
    let items = state
        .db
        .list_work_items(&filter, WORK_ITEM_LIST_LIMIT)
        .await?;
    Ok(Json(items.into_iter().map(WorkItemResponse::from).collect()))
}

#[tracing::instrument(skip(state, request))]
pub async fn create_work_item(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<WorkItemCreate>,
) -> Result<(StatusCode, Json<WorkItemResponse>), AppError> {
    let item = WorkItem::from(request);

    state.db.insert_work_item(&item).await?;
    record_work_item_created(&item);

    tracing::info!(
        work_item_id = %item.id,
        profile_key = %item.profile_key,
        "Work item created"
    );

    Ok((StatusCode::CREATED, Json(WorkItemResponse::from(item))))
}
