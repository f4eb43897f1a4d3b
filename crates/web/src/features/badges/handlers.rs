use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storage::dto::{
    badge::{AwardBadgeRequest, UpdateBadgeRequest},
    project::ProjectResponse,
};
use storage::models::Badge;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::RequireApiKey;
use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[derive(Debug, Serialize, ToSchema)]
pub struct BadgeResponse {
    pub badge: Badge,
    pub project: ProjectResponse,
}

#[utoipa::path(
    post,
    path = "/api/badges",
    request_body = AwardBadgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Badge awarded and validation score updated", body = BadgeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    tag = "badges"
)]
pub async fn award_badge(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Json(req): Json<AwardBadgeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (badge, project) = services::award_badge(state.db.pool(), &state.scoring, &req).await?;

    let response = BadgeResponse {
        badge,
        project: ProjectResponse::from(project),
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/badges/{id}",
    params(
        ("id" = Uuid, Path, description = "Badge id")
    ),
    request_body = UpdateBadgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Badge tier changed and scores recomputed", body = BadgeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Badge not found")
    ),
    tag = "badges"
)]
pub async fn update_badge(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBadgeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (badge, project) = services::update_badge(state.db.pool(), &state.scoring, id, &req).await?;

    let response = BadgeResponse {
        badge,
        project: ProjectResponse::from(project),
    };

    Ok(Json(response).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/badges/{id}",
    params(
        ("id" = Uuid, Path, description = "Badge id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Badge revoked; project returned with fresh scores", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Badge not found")
    ),
    tag = "badges"
)]
pub async fn revoke_badge(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let project = services::revoke_badge(state.db.pool(), &state.scoring, id).await?;

    Ok(Json(ProjectResponse::from(project)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/badges/project/{project_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Badges attached to the project", body = Vec<Badge>)
    ),
    tag = "badges"
)]
pub async fn list_project_badges(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let badges = services::list_project_badges(state.db.pool(), project_id).await?;

    Ok(Json(badges).into_response())
}
