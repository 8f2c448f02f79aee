use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::recommendation::models::RecommendationResponse;
use crate::recommendation::orchestrator::recommend;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

/// GET /api/v1/recommendations
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let user_id = params.user_id.as_deref().map(str::trim).unwrap_or_default();
    if user_id.is_empty() {
        return Err(AppError::Validation("user_id is required".to_string()));
    }

    let response = recommend(
        state.users.as_ref(),
        state.jobs.as_ref(),
        &state.scoring,
        state.resumes.as_ref(),
        &state.config.upload_root,
        user_id,
    )
    .await?;
    Ok(Json(response))
}
