use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::vote::{CastVoteRequest, VoteOutcome};
use crate::error::Result;
use crate::models::{Project, Vote, VoteType};
use crate::services::scoring::{self, ScoringConfig};

/// Cast, change or remove a vote, then recompute the project's scores.
///
/// Semantics: a first vote is recorded; voting the opposite type changes the
/// existing vote; repeating the same type removes it. Counts, the vote row
/// and the recomputed score set are committed together, with the project row
/// locked for the whole read-modify-write cycle.
pub async fn cast_vote(
    pool: &PgPool,
    config: &ScoringConfig,
    request: &CastVoteRequest,
) -> Result<(VoteOutcome, Project)> {
    let mut tx = pool.begin().await?;

    let mut project = scoring::lock_project(&mut tx, request.project_id).await?;

    let existing = sqlx::query_as::<_, Vote>(
        "SELECT * FROM votes WHERE user_id = $1 AND project_id = $2",
    )
    .bind(request.user_id)
    .bind(request.project_id)
    .fetch_optional(&mut *tx)
    .await?;

    let outcome = match existing {
        Some(vote) if vote.vote_type == request.vote_type.as_str() => {
            decrement_count(&mut project, request.vote_type);
            sqlx::query("DELETE FROM votes WHERE vote_id = $1")
                .bind(vote.vote_id)
                .execute(&mut *tx)
                .await?;
            VoteOutcome::Removed
        }
        Some(vote) => {
            let previous = match vote.vote_type.as_str() {
                "up" => VoteType::Up,
                _ => VoteType::Down,
            };
            decrement_count(&mut project, previous);
            increment_count(&mut project, request.vote_type);
            sqlx::query(
                "UPDATE votes SET vote_type = $1, updated_at = CURRENT_TIMESTAMP WHERE vote_id = $2",
            )
            .bind(request.vote_type.as_str())
            .bind(vote.vote_id)
            .execute(&mut *tx)
            .await?;
            VoteOutcome::Changed
        }
        None => {
            increment_count(&mut project, request.vote_type);
            sqlx::query(
                "INSERT INTO votes (user_id, project_id, vote_type) VALUES ($1, $2, $3)",
            )
            .bind(request.user_id)
            .bind(request.project_id)
            .bind(request.vote_type.as_str())
            .execute(&mut *tx)
            .await?;
            VoteOutcome::Recorded
        }
    };

    persist_counts(&mut tx, &project).await?;

    let creator = scoring::load_creator(&mut tx, project.user_id).await?;
    let badges = scoring::load_badges(&mut tx, project.project_id).await?;
    scoring::update_project_scores(config, &mut project, &creator, &badges);
    scoring::persist_scores(&mut tx, &project).await?;

    tx.commit().await?;

    Ok((outcome, project))
}

pub async fn list_user_votes(pool: &PgPool, user_id: Uuid) -> Result<Vec<Vote>> {
    let votes = sqlx::query_as::<_, Vote>(
        "SELECT * FROM votes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(votes)
}

fn increment_count(project: &mut Project, vote_type: VoteType) {
    match vote_type {
        VoteType::Up => project.upvotes += 1,
        VoteType::Down => project.downvotes += 1,
    }
}

fn decrement_count(project: &mut Project, vote_type: VoteType) {
    match vote_type {
        VoteType::Up => project.upvotes = (project.upvotes - 1).max(0),
        VoteType::Down => project.downvotes = (project.downvotes - 1).max(0),
    }
}

async fn persist_counts(conn: &mut PgConnection, project: &Project) -> Result<()> {
    sqlx::query("UPDATE projects SET upvotes = $1, downvotes = $2 WHERE project_id = $3")
        .bind(project.upvotes)
        .bind(project.downvotes)
        .bind(project.project_id)
        .execute(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn counted_project(upvotes: i32, downvotes: i32) -> Project {
        let epoch = NaiveDate::from_ymd_opt(2024, 1, 1)
            .expect("valid date")
            .and_hms_opt(0, 0, 0)
            .expect("valid time");
        Project {
            project_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: String::new(),
            tagline: None,
            description: String::new(),
            demo_url: None,
            repository_url: None,
            tech_stack: vec![],
            screenshot_urls: vec![],
            upvotes,
            downvotes,
            comment_count: 0,
            verification_score: 0,
            community_score: 0,
            validation_score: 0,
            quality_score: 0,
            proof_score: 0,
            trending_score: 0.0,
            is_deleted: false,
            created_at: epoch,
            updated_at: epoch,
        }
    }

    #[test]
    fn decrement_floors_counts_at_zero() {
        let mut project = counted_project(0, 0);
        decrement_count(&mut project, VoteType::Up);
        decrement_count(&mut project, VoteType::Down);
        assert_eq!(project.upvotes, 0);
        assert_eq!(project.downvotes, 0);
    }

    #[test]
    fn change_vote_moves_one_count_to_the_other() {
        let mut project = counted_project(3, 1);
        decrement_count(&mut project, VoteType::Up);
        increment_count(&mut project, VoteType::Down);
        assert_eq!(project.upvotes, 2);
        assert_eq!(project.downvotes, 2);
    }
}
