use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::dto::{
    project::ProjectResponse,
    vote::{CastVoteRequest, VoteResponse},
};
use storage::models::Vote;
use uuid::Uuid;
use validator::Validate;

use crate::auth::RequireApiKey;
use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/votes",
    request_body = CastVoteRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Vote recorded, changed or removed; project returned with fresh scores", body = VoteResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    tag = "votes"
)]
pub async fn cast_vote(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Json(req): Json<CastVoteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (outcome, project) = services::cast_vote(state.db.pool(), &state.scoring, &req).await?;

    let response = VoteResponse {
        outcome,
        project: ProjectResponse::from(project),
    };

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/votes/user/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User's votes", body = Vec<Vote>)
    ),
    tag = "votes"
)]
pub async fn list_user_votes(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let votes = services::list_user_votes(state.db.pool(), user_id).await?;

    Ok(Json(votes).into_response())
}
