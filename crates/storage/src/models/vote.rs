use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One vote per (user, project), enforced by a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vote {
    pub vote_id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub vote_type: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}
