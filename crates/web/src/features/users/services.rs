use sqlx::PgPool;
use storage::{
    dto::user::UpdateVerificationRequest,
    error::Result,
    models::User,
    repository::user::UserRepository,
    services::scoring::{self, ScoringConfig},
};
use uuid::Uuid;

pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.get(user_id).await
}

/// Update a creator's verification flags, then recompute scores for every
/// project they own so verification changes show up in the feed.
pub async fn update_verification(
    pool: &PgPool,
    config: &ScoringConfig,
    user_id: Uuid,
    request: &UpdateVerificationRequest,
) -> Result<(User, u64)> {
    let repo = UserRepository::new(pool);
    let user = repo.update_verification(user_id, request).await?;

    let recomputed = scoring::recompute_for_creator(pool, config, user_id).await?;
    tracing::info!(
        user_id = %user_id,
        recomputed,
        "Recomputed project scores after verification change"
    );

    Ok((user, recomputed))
}
