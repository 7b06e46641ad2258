use crate::dtos::ProfileResponse;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

pub const PROFILE_LIST_LIMIT: i64 = 50;

#[tracing::instrument(skip(state))]
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let profiles = state.db.list_profiles(PROFILE_LIST_LIMIT).await?;
    Ok(Json(
        profiles.into_iter().map(ProfileResponse::from).collect(),
    ))
}
