use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storage::dto::user::{UpdateVerificationRequest, UserResponse};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::RequireApiKey;
use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[derive(Debug, Serialize, ToSchema)]
pub struct VerificationResponse {
    pub user: UserResponse,
    pub projects_recomputed: u64,
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let user = services::get_user(state.db.pool(), id).await?;

    Ok(Json(UserResponse::from(user)).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/verification",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    request_body = UpdateVerificationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Flags updated; all of the creator's projects rescored", body = VerificationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn update_verification(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateVerificationRequest>,
) -> Result<Response, WebError> {
    let (user, projects_recomputed) =
        services::update_verification(state.db.pool(), &state.scoring, id, &req).await?;

    let response = VerificationResponse {
        user: UserResponse::from(user),
        projects_recomputed,
    };

    Ok(Json(response).into_response())
}
