use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Badge, Project, User};

/// Scoring weights, ceilings and the trending-rank constants.
///
/// Every literal the formulas depend on lives here so the engine stays a pure
/// function of its inputs plus one config value.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Creator verification points: email, strong credential, linked repo.
    pub email_verified_points: i32,
    pub credential_points: i32,
    pub repo_connected_points: i32,
    pub verification_max: i32,

    /// Community signal: upvote-ratio component and comment engagement.
    pub upvote_ratio_max: f64,
    pub comment_multiplier: f64,
    pub comment_max: f64,
    pub community_max: i32,

    /// Expert validation ceiling. Badge points are summed raw, so demerit
    /// badges can push the sub-score below zero; only the upper bound clamps.
    pub validation_max: i32,

    /// Project quality: each present signal is worth the same flat amount.
    pub quality_signal_points: i32,
    pub quality_description_min_len: usize,
    pub quality_max: i32,

    pub proof_max: i32,

    /// Fixed reference instant for the trending rank. Anchoring to a constant
    /// epoch instead of "now" keeps trending scores stable across reads.
    pub platform_epoch: NaiveDateTime,
    /// Seconds per unit of the trending time component (~12.5 hours).
    pub trending_divisor: f64,
    /// Maximum multiplier contribution from the proof score (0.5 = +50%).
    pub proof_boost_max: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            email_verified_points: 5,
            credential_points: 10,
            repo_connected_points: 5,
            verification_max: 20,

            upvote_ratio_max: 20.0,
            comment_multiplier: 0.5,
            comment_max: 10.0,
            community_max: 30,

            validation_max: 30,

            quality_signal_points: 5,
            quality_description_min_len: 200,
            quality_max: 20,

            proof_max: 100,

            platform_epoch: NaiveDate::from_ymd_opt(2024, 1, 1)
                .expect("valid epoch date")
                .and_hms_opt(0, 0, 0)
                .expect("valid epoch time"),
            trending_divisor: 45_000.0,
            proof_boost_max: 0.5,
        }
    }
}

/// All six engine outputs, computed together from one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSet {
    pub verification: i32,
    pub community: i32,
    pub validation: i32,
    pub quality: i32,
    pub proof: i32,
    pub trending: f64,
}

pub fn verification_score(config: &ScoringConfig, creator: &User) -> i32 {
    let mut score = 0;
    if creator.email_verified {
        score += config.email_verified_points;
    }
    if creator.has_verified_credential {
        score += config.credential_points;
    }
    if creator.code_repository_connected {
        score += config.repo_connected_points;
    }
    score.min(config.verification_max)
}

pub fn community_score(config: &ScoringConfig, project: &Project) -> i32 {
    let mut score = 0.0;

    let total_votes = project.upvotes + project.downvotes;
    if total_votes > 0 {
        let ratio = f64::from(project.upvotes) / f64::from(total_votes);
        score += (ratio * config.upvote_ratio_max).min(config.upvote_ratio_max);
    }

    let comment_score = f64::from(project.comment_count) * config.comment_multiplier;
    score += comment_score.min(config.comment_max);

    score.min(f64::from(config.community_max)).round() as i32
}

pub fn validation_score(config: &ScoringConfig, badges: &[Badge]) -> i32 {
    let total: i32 = badges.iter().map(|b| b.points).sum();
    // One-sided clamp: demerit-heavy projects keep their negative sum.
    total.min(config.validation_max)
}

pub fn quality_score(config: &ScoringConfig, project: &Project) -> i32 {
    let mut score = 0;
    if project.demo_url.as_deref().is_some_and(|u| !u.is_empty()) {
        score += config.quality_signal_points;
    }
    if project
        .repository_url
        .as_deref()
        .is_some_and(|u| !u.is_empty())
    {
        score += config.quality_signal_points;
    }
    if project.screenshot_count() > 0 {
        score += config.quality_signal_points;
    }
    if project.description.len() > config.quality_description_min_len {
        score += config.quality_signal_points;
    }
    score.min(config.quality_max)
}

/// Reddit-style hot rank: logarithmic vote margin plus a linear recency term
/// anchored at the platform epoch, amplified by up to 50% for a high proof
/// score. Unbounded, two-decimal precision.
pub fn trending_score(
    config: &ScoringConfig,
    created_at: NaiveDateTime,
    upvotes: i32,
    downvotes: i32,
    proof_score: i32,
) -> f64 {
    let vote_score = upvotes - downvotes;
    let magnitude = f64::from(vote_score.abs().max(1)).log10();
    let sign = match vote_score {
        v if v > 0 => 1.0,
        v if v < 0 => -1.0,
        _ => 0.0,
    };

    let time_component =
        (created_at - config.platform_epoch).num_seconds() as f64 / config.trending_divisor;

    let proof_boost = f64::from(proof_score) / 100.0 * config.proof_boost_max;

    let trending = (sign * magnitude + time_component) * (1.0 + proof_boost);
    (trending * 100.0).round() / 100.0
}

/// Compute all six scores from one consistent snapshot of project, creator
/// and badges. Sub-scores are clamped individually before the proof score
/// sums and clamps them again, so a badge-heavy project can never leak past
/// the 100-point ceiling.
pub fn compute_scores(
    config: &ScoringConfig,
    project: &Project,
    creator: &User,
    badges: &[Badge],
) -> ScoreSet {
    let verification = verification_score(config, creator);
    let community = community_score(config, project);
    let validation = validation_score(config, badges);
    let quality = quality_score(config, project);

    let proof = (verification + community + validation + quality).clamp(0, config.proof_max);

    let trending = trending_score(
        config,
        project.created_at,
        project.upvotes,
        project.downvotes,
        proof,
    );

    ScoreSet {
        verification,
        community,
        validation,
        quality,
        proof,
        trending,
    }
}

/// Recompute every score field and assign the set back onto the project.
/// Pure; the caller persists.
pub fn update_project_scores(
    config: &ScoringConfig,
    project: &mut Project,
    creator: &User,
    badges: &[Badge],
) -> ScoreSet {
    let scores = compute_scores(config, project, creator, badges);
    project.verification_score = scores.verification;
    project.community_score = scores.community;
    project.validation_score = scores.validation;
    project.quality_score = scores.quality;
    project.proof_score = scores.proof;
    project.trending_score = scores.trending;
    scores
}

pub(crate) async fn lock_project(conn: &mut PgConnection, project_id: Uuid) -> Result<Project> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE project_id = $1 AND is_deleted = FALSE FOR UPDATE",
    )
    .bind(project_id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)
}

pub(crate) async fn load_creator(conn: &mut PgConnection, user_id: Uuid) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(conn)
        .await?
        .ok_or(StorageError::NotFound)
}

pub(crate) async fn load_badges(conn: &mut PgConnection, project_id: Uuid) -> Result<Vec<Badge>> {
    let badges = sqlx::query_as::<_, Badge>(
        "SELECT * FROM badges WHERE project_id = $1 ORDER BY created_at",
    )
    .bind(project_id)
    .fetch_all(conn)
    .await?;
    Ok(badges)
}

pub(crate) async fn persist_scores(conn: &mut PgConnection, project: &Project) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE projects
        SET verification_score = $1,
            community_score = $2,
            validation_score = $3,
            quality_score = $4,
            proof_score = $5,
            trending_score = $6,
            updated_at = CURRENT_TIMESTAMP
        WHERE project_id = $7
        "#,
    )
    .bind(project.verification_score)
    .bind(project.community_score)
    .bind(project.validation_score)
    .bind(project.quality_score)
    .bind(project.proof_score)
    .bind(project.trending_score)
    .bind(project.project_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Recompute and persist one project's scores inside an already open
/// transaction, with the project row locked for the duration.
pub(crate) async fn recompute_in_tx(
    conn: &mut PgConnection,
    config: &ScoringConfig,
    project_id: Uuid,
) -> Result<Project> {
    let mut project = lock_project(conn, project_id).await?;
    let creator = load_creator(conn, project.user_id).await?;
    let badges = load_badges(conn, project_id).await?;

    update_project_scores(config, &mut project, &creator, &badges);
    persist_scores(conn, &project).await?;

    Ok(project)
}

/// Recompute all score fields for a project and persist them in one
/// transaction. The row lock serializes concurrent recomputes so the feed
/// never observes a half-updated score set.
pub async fn recompute_and_store(
    pool: &PgPool,
    config: &ScoringConfig,
    project_id: Uuid,
) -> Result<Project> {
    let mut tx = pool.begin().await?;
    let project = recompute_in_tx(&mut tx, config, project_id).await?;
    tx.commit().await?;

    Ok(project)
}

/// Recompute scores for every project owned by a creator, typically after a
/// verification flag changed. Returns the number of projects touched.
pub async fn recompute_for_creator(
    pool: &PgPool,
    config: &ScoringConfig,
    user_id: Uuid,
) -> Result<u64> {
    let project_ids: Vec<Uuid> = sqlx::query_scalar(
        "SELECT project_id FROM projects WHERE user_id = $1 AND is_deleted = FALSE",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut count = 0u64;

    for project_id in project_ids {
        recompute_and_store(pool, config, project_id).await?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_user() -> User {
        User {
            user_id: Uuid::new_v4(),
            username: "builder".to_string(),
            email: "builder@example.com".to_string(),
            email_verified: false,
            has_verified_credential: false,
            code_repository_connected: false,
            created_at: ScoringConfig::default().platform_epoch,
        }
    }

    fn test_project(creator: &User) -> Project {
        let epoch = ScoringConfig::default().platform_epoch;
        Project {
            project_id: Uuid::new_v4(),
            user_id: creator.user_id,
            title: "Test Project".to_string(),
            tagline: None,
            description: "short".to_string(),
            demo_url: None,
            repository_url: None,
            tech_stack: vec![],
            screenshot_urls: vec![],
            upvotes: 0,
            downvotes: 0,
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

    fn badge_worth(points: i32) -> Badge {
        Badge {
            badge_id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            validator_id: Uuid::new_v4(),
            tier: "gold".to_string(),
            points,
            rationale: None,
            created_at: ScoringConfig::default().platform_epoch,
        }
    }

    #[test]
    fn bare_project_scores_zero() {
        let config = ScoringConfig::default();
        let creator = test_user();
        let project = test_project(&creator);

        let scores = compute_scores(&config, &project, &creator, &[]);

        assert_eq!(scores.verification, 0);
        assert_eq!(scores.community, 0);
        assert_eq!(scores.validation, 0);
        assert_eq!(scores.quality, 0);
        assert_eq!(scores.proof, 0);
    }

    #[test]
    fn fully_verified_creator_hits_verification_ceiling() {
        let config = ScoringConfig::default();
        let mut creator = test_user();
        creator.email_verified = true;
        creator.has_verified_credential = true;
        creator.code_repository_connected = true;

        assert_eq!(verification_score(&config, &creator), 20);

        creator.has_verified_credential = false;
        assert_eq!(verification_score(&config, &creator), 10);
    }

    #[test]
    fn strong_project_sums_to_81() {
        let config = ScoringConfig::default();
        let mut creator = test_user();
        creator.email_verified = true;
        creator.has_verified_credential = true;
        creator.code_repository_connected = true;

        let mut project = test_project(&creator);
        project.demo_url = Some("https://demo.example.com".to_string());
        project.repository_url = Some("https://github.com/x/y".to_string());
        project.screenshot_urls = vec!["a.png".to_string(), "b.png".to_string()];
        project.description = "d".repeat(300);
        project.upvotes = 80;
        project.downvotes = 20;
        project.comment_count = 20;

        let badges = [badge_worth(15)];
        let scores = compute_scores(&config, &project, &creator, &badges);

        assert_eq!(scores.verification, 20);
        assert_eq!(scores.community, 26); // ratio 0.8 -> 16, 20 comments saturate at 10
        assert_eq!(scores.validation, 15);
        assert_eq!(scores.quality, 20);
        assert_eq!(scores.proof, 81);
    }

    #[test]
    fn zero_votes_contribute_nothing() {
        let config = ScoringConfig::default();
        let creator = test_user();
        let mut project = test_project(&creator);
        project.upvotes = 0;
        project.downvotes = 0;

        assert_eq!(community_score(&config, &project), 0);
    }

    #[test]
    fn split_votes_and_no_comments_score_zero_sign() {
        let config = ScoringConfig::default();
        let creator = test_user();
        let mut project = test_project(&creator);
        project.upvotes = 5;
        project.downvotes = 5;

        // 50/50 split earns half the ratio component, no comment points.
        assert_eq!(community_score(&config, &project), 10);

        // Equal votes zero out the sign term; only recency remains.
        let t = trending_score(&config, project.created_at, 5, 5, 0);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn comment_component_scales_then_saturates() {
        let config = ScoringConfig::default();
        let creator = test_user();
        let mut project = test_project(&creator);

        project.comment_count = 12;
        assert_eq!(community_score(&config, &project), 6);

        project.comment_count = 20;
        assert_eq!(community_score(&config, &project), 10);

        project.comment_count = 500;
        assert_eq!(community_score(&config, &project), 10);
    }

    #[test]
    fn community_score_monotonic_in_upvotes() {
        let config = ScoringConfig::default();
        let creator = test_user();
        let mut project = test_project(&creator);
        project.downvotes = 10;

        let mut last = community_score(&config, &project);
        for upvotes in 1..200 {
            project.upvotes = upvotes;
            let score = community_score(&config, &project);
            assert!(score >= last, "dropped at {upvotes} upvotes");
            last = score;
        }
    }

    #[test]
    fn validation_sum_is_raw_below_ceiling() {
        let config = ScoringConfig::default();

        let badges = [badge_worth(10), badge_worth(15)];
        assert_eq!(validation_score(&config, &badges), 25);

        assert_eq!(validation_score(&config, &[]), 0);
    }

    #[test]
    fn validation_clamps_up_but_not_down() {
        let config = ScoringConfig::default();

        let heavy = [badge_worth(20), badge_worth(20), badge_worth(15)];
        assert_eq!(validation_score(&config, &heavy), 30);

        let demerits = [badge_worth(-10), badge_worth(-10)];
        assert_eq!(validation_score(&config, &demerits), -20);
    }

    #[test]
    fn negative_validation_cannot_drag_proof_below_zero() {
        let config = ScoringConfig::default();
        let creator = test_user();
        let project = test_project(&creator);

        let demerits = [badge_worth(-10), badge_worth(-10)];
        let scores = compute_scores(&config, &project, &creator, &demerits);

        assert_eq!(scores.validation, -20);
        assert_eq!(scores.proof, 0);
    }

    #[test]
    fn proof_is_sum_of_clamped_components() {
        let config = ScoringConfig::default();
        let mut creator = test_user();
        creator.email_verified = true;

        let mut project = test_project(&creator);
        project.upvotes = 10;
        project.comment_count = 4;
        project.demo_url = Some("https://demo.example.com".to_string());

        // Badge points past the ceiling must be clamped before summing.
        let badges = [badge_worth(20), badge_worth(20), badge_worth(20)];
        let scores = compute_scores(&config, &project, &creator, &badges);

        assert_eq!(scores.validation, 30);
        assert_eq!(
            scores.proof,
            scores.verification + scores.community + scores.validation + scores.quality
        );
        assert!(scores.proof <= 100);
    }

    #[test]
    fn quality_description_threshold_is_strict() {
        let config = ScoringConfig::default();
        let creator = test_user();
        let mut project = test_project(&creator);

        project.description = "d".repeat(200);
        assert_eq!(quality_score(&config, &project), 0);

        project.description = "d".repeat(201);
        assert_eq!(quality_score(&config, &project), 5);
    }

    #[test]
    fn empty_url_earns_no_quality_points() {
        let config = ScoringConfig::default();
        let creator = test_user();
        let mut project = test_project(&creator);

        project.demo_url = Some(String::new());
        assert_eq!(quality_score(&config, &project), 0);
    }

    #[test]
    fn trending_matches_worked_example() {
        let config = ScoringConfig::default();
        let created_at = config.platform_epoch + Duration::seconds(90_000);

        // magnitude = log10(100) = 2, time = 2.0, boost = 0.25
        let t = trending_score(&config, created_at, 100, 0, 50);
        assert_eq!(t, 5.0);
    }

    #[test]
    fn trending_sign_follows_vote_margin() {
        let config = ScoringConfig::default();
        let created_at = config.platform_epoch;

        assert!(trending_score(&config, created_at, 50, 10, 0) > 0.0);
        assert!(trending_score(&config, created_at, 10, 50, 0) < 0.0);
        assert_eq!(trending_score(&config, created_at, 7, 7, 0), 0.0);
    }

    #[test]
    fn trending_rewards_later_creation() {
        let config = ScoringConfig::default();
        let early = config.platform_epoch + Duration::seconds(10_000);
        let late = config.platform_epoch + Duration::seconds(500_000);

        let t_early = trending_score(&config, early, 10, 0, 40);
        let t_late = trending_score(&config, late, 10, 0, 40);
        assert!(t_late > t_early);
    }

    #[test]
    fn recompute_is_deterministic() {
        let config = ScoringConfig::default();
        let mut creator = test_user();
        creator.email_verified = true;

        let mut project = test_project(&creator);
        project.upvotes = 33;
        project.downvotes = 7;
        project.comment_count = 9;

        let badges = [badge_worth(10), badge_worth(-10)];

        let first = compute_scores(&config, &project, &creator, &badges);
        let second = compute_scores(&config, &project, &creator, &badges);
        assert_eq!(first, second);
    }

    #[test]
    fn removing_only_badge_drops_proof_by_its_points() {
        let config = ScoringConfig::default();
        let creator = test_user();
        let mut project = test_project(&creator);
        project.upvotes = 4;

        let badges = [badge_worth(20)];
        let with_badge = update_project_scores(&config, &mut project, &creator, &badges);
        assert_eq!(with_badge.validation, 20);

        let without_badge = update_project_scores(&config, &mut project, &creator, &[]);
        assert_eq!(without_badge.validation, 0);
        assert_eq!(without_badge.proof, with_badge.proof - 20);
        assert_eq!(project.proof_score, without_badge.proof);
    }

    #[test]
    fn update_assigns_all_fields_back() {
        let config = ScoringConfig::default();
        let mut creator = test_user();
        creator.code_repository_connected = true;

        let mut project = test_project(&creator);
        project.upvotes = 9;
        project.comment_count = 2;

        let scores = update_project_scores(&config, &mut project, &creator, &[]);

        assert_eq!(project.verification_score, scores.verification);
        assert_eq!(project.community_score, scores.community);
        assert_eq!(project.validation_score, scores.validation);
        assert_eq!(project.quality_score, scores.quality);
        assert_eq!(project.proof_score, scores.proof);
        assert_eq!(project.trending_score, scores.trending);
    }
}
