use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::badge::{AwardBadgeRequest, UpdateBadgeRequest};
use crate::error::{Result, StorageError};
use crate::models::{Badge, Project};
use crate::services::scoring::{self, ScoringConfig};

/// Award a badge and fold its points into the project's validation score.
/// Points are fixed by the tier at award time.
pub async fn award_badge(
    pool: &PgPool,
    config: &ScoringConfig,
    request: &AwardBadgeRequest,
) -> Result<(Badge, Project)> {
    let mut tx = pool.begin().await?;

    // Lock first so the badge insert and the recompute see the same project.
    scoring::lock_project(&mut tx, request.project_id).await?;

    let badge = sqlx::query_as::<_, Badge>(
        r#"
        INSERT INTO badges (project_id, validator_id, tier, points, rationale)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(request.project_id)
    .bind(request.validator_id)
    .bind(request.tier.as_str())
    .bind(request.tier.points())
    .bind(&request.rationale)
    .fetch_one(&mut *tx)
    .await?;

    let project = scoring::recompute_in_tx(&mut tx, config, request.project_id).await?;

    tx.commit().await?;

    Ok((badge, project))
}

/// Change a badge's tier (and points), then recompute.
pub async fn update_badge(
    pool: &PgPool,
    config: &ScoringConfig,
    badge_id: Uuid,
    request: &UpdateBadgeRequest,
) -> Result<(Badge, Project)> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, Badge>("SELECT * FROM badges WHERE badge_id = $1")
        .bind(badge_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

    scoring::lock_project(&mut tx, existing.project_id).await?;

    let badge = sqlx::query_as::<_, Badge>(
        r#"
        UPDATE badges
        SET tier = $1, points = $2, rationale = COALESCE($3, rationale)
        WHERE badge_id = $4
        RETURNING *
        "#,
    )
    .bind(request.tier.as_str())
    .bind(request.tier.points())
    .bind(&request.rationale)
    .bind(badge_id)
    .fetch_one(&mut *tx)
    .await?;

    let project = scoring::recompute_in_tx(&mut tx, config, existing.project_id).await?;

    tx.commit().await?;

    Ok((badge, project))
}

/// Revoke a badge; the project's validation score loses its points.
pub async fn revoke_badge(
    pool: &PgPool,
    config: &ScoringConfig,
    badge_id: Uuid,
) -> Result<Project> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, Badge>("SELECT * FROM badges WHERE badge_id = $1")
        .bind(badge_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

    scoring::lock_project(&mut tx, existing.project_id).await?;

    sqlx::query("DELETE FROM badges WHERE badge_id = $1")
        .bind(badge_id)
        .execute(&mut *tx)
        .await?;

    let project = scoring::recompute_in_tx(&mut tx, config, existing.project_id).await?;

    tx.commit().await?;

    Ok(project)
}

pub async fn list_project_badges(pool: &PgPool, project_id: Uuid) -> Result<Vec<Badge>> {
    let badges = sqlx::query_as::<_, Badge>(
        "SELECT * FROM badges WHERE project_id = $1 ORDER BY created_at",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;
    Ok(badges)
}
