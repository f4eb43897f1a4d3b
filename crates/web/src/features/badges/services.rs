use sqlx::PgPool;
use storage::{
    dto::badge::{AwardBadgeRequest, UpdateBadgeRequest},
    error::Result,
    models::{Badge, Project},
    services::{scoring::ScoringConfig, validation},
};
use uuid::Uuid;

pub async fn award_badge(
    pool: &PgPool,
    config: &ScoringConfig,
    request: &AwardBadgeRequest,
) -> Result<(Badge, Project)> {
    validation::award_badge(pool, config, request).await
}

pub async fn update_badge(
    pool: &PgPool,
    config: &ScoringConfig,
    badge_id: Uuid,
    request: &UpdateBadgeRequest,
) -> Result<(Badge, Project)> {
    validation::update_badge(pool, config, badge_id, request).await
}

pub async fn revoke_badge(pool: &PgPool, config: &ScoringConfig, badge_id: Uuid) -> Result<Project> {
    validation::revoke_badge(pool, config, badge_id).await
}

pub async fn list_project_badges(pool: &PgPool, project_id: Uuid) -> Result<Vec<Badge>> {
    validation::list_project_badges(pool, project_id).await
}
