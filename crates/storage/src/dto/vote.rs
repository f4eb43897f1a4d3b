use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::VoteType;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CastVoteRequest {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub vote_type: VoteType,
}

/// What the cast operation did with an existing vote, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    Recorded,
    Changed,
    Removed,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VoteResponse {
    pub outcome: VoteOutcome,
    pub project: super::project::ProjectResponse,
}
