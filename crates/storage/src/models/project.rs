use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A published hackathon project.
///
/// The six score fields are owned by the scoring engine and overwritten as a
/// set on every recompute; nothing else writes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub project_id: Uuid,
    pub user_id: Uuid,

    pub title: String,
    pub tagline: Option<String>,
    pub description: String,

    pub demo_url: Option<String>,
    pub repository_url: Option<String>,
    pub tech_stack: Vec<String>,
    pub screenshot_urls: Vec<String>,

    pub upvotes: i32,
    pub downvotes: i32,
    pub comment_count: i32,

    pub verification_score: i32,
    pub community_score: i32,
    pub validation_score: i32,
    pub quality_score: i32,
    pub proof_score: i32,
    pub trending_score: f64,

    pub is_deleted: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl Project {
    pub fn screenshot_count(&self) -> usize {
        self.screenshot_urls.len()
    }

    pub fn vote_score(&self) -> i32 {
        self.upvotes - self.downvotes
    }
}
