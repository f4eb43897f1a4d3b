use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    common::PaginatedResponse,
    project::{CreateProjectRequest, FeedFilter, ProjectResponse, UpdateProjectRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::RequireApiKey;
use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/projects",
    params(FeedFilter),
    responses(
        (status = 200, description = "Project feed retrieved successfully", body = PaginatedResponse<ProjectResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<FeedFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (projects, total_items) = services::feed(state.db.pool(), &filter).await?;

    let entries: Vec<ProjectResponse> = projects.into_iter().map(ProjectResponse::from).collect();

    let response = PaginatedResponse::new(
        entries,
        filter.pagination.page,
        filter.pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectResponse),
        (status = 404, description = "Project not found")
    ),
    tag = "projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let project = services::get_project(state.db.pool(), id).await?;

    Ok(Json(ProjectResponse::from(project)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Project created with initial scores", body = ProjectResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "projects"
)]
pub async fn create_project(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let project = services::create_project(state.db.pool(), &state.scoring, &req).await?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project id")
    ),
    request_body = UpdateProjectRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Project updated and scores recomputed", body = ProjectResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    tag = "projects"
)]
pub async fn update_project(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let project = services::update_project(state.db.pool(), &state.scoring, id, &req).await?;

    Ok(Json(ProjectResponse::from(project)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    tag = "projects"
)]
pub async fn delete_project(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_project(state.db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
