use sqlx::PgPool;
use storage::{
    dto::vote::{CastVoteRequest, VoteOutcome},
    error::Result,
    models::{Project, Vote},
    services::{engagement, scoring::ScoringConfig},
};
use uuid::Uuid;

/// Cast, change or toggle off a vote; scores are recomputed in the same
/// transaction before the updated project is returned.
pub async fn cast_vote(
    pool: &PgPool,
    config: &ScoringConfig,
    request: &CastVoteRequest,
) -> Result<(VoteOutcome, Project)> {
    engagement::cast_vote(pool, config, request).await
}

pub async fn list_user_votes(pool: &PgPool, user_id: Uuid) -> Result<Vec<Vote>> {
    engagement::list_user_votes(pool, user_id).await
}
