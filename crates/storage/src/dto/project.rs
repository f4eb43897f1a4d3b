use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::Project;

/// Feed ordering. Trending and top read the score columns written by the
/// scoring engine; newest falls back to creation time.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    #[default]
    Trending,
    Newest,
    Top,
}

impl FeedSort {
    pub fn as_order_by(&self) -> &'static str {
        match self {
            Self::Trending => "trending_score DESC, created_at DESC",
            Self::Newest => "created_at DESC",
            Self::Top => "proof_score DESC, created_at DESC",
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FeedFilter {
    #[serde(flatten)]
    pub pagination: super::common::PaginationParams,
    #[serde(default)]
    pub sort: FeedSort,
    pub creator: Option<Uuid>,
}

impl FeedFilter {
    pub fn validate(&self) -> Result<(), String> {
        self.pagination.validate()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 300))]
    pub tagline: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(url)]
    pub demo_url: Option<String>,
    #[validate(url)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub screenshot_urls: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 300))]
    pub tagline: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(url)]
    pub demo_url: Option<String>,
    #[validate(url)]
    pub repository_url: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub screenshot_urls: Option<Vec<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
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
    pub vote_score: i32,
    pub comment_count: i32,
    pub verification_score: i32,
    pub community_score: i32,
    pub validation_score: i32,
    pub quality_score: i32,
    pub proof_score: i32,
    pub trending_score: f64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        let vote_score = p.vote_score();
        Self {
            project_id: p.project_id,
            user_id: p.user_id,
            title: p.title,
            tagline: p.tagline,
            description: p.description,
            demo_url: p.demo_url,
            repository_url: p.repository_url,
            tech_stack: p.tech_stack,
            screenshot_urls: p.screenshot_urls,
            upvotes: p.upvotes,
            downvotes: p.downvotes,
            vote_score,
            comment_count: p.comment_count,
            verification_score: p.verification_score,
            community_score: p.community_score,
            validation_score: p.validation_score,
            quality_score: p.quality_score,
            proof_score: p.proof_score,
            trending_score: p.trending_score,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
