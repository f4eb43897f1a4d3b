use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    pub has_verified_credential: bool,
    pub code_repository_connected: bool,
    pub created_at: chrono::NaiveDateTime,
}
