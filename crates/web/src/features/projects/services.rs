use sqlx::PgPool;
use storage::{
    dto::project::{CreateProjectRequest, FeedFilter, UpdateProjectRequest},
    error::Result,
    models::Project,
    repository::project::ProjectRepository,
    services::scoring::{self, ScoringConfig},
};
use uuid::Uuid;

/// Paginated project feed, ordered by the requested sort.
pub async fn feed(pool: &PgPool, filter: &FeedFilter) -> Result<(Vec<Project>, i64)> {
    let repo = ProjectRepository::new(pool);
    repo.feed(filter).await
}

pub async fn get_project(pool: &PgPool, project_id: Uuid) -> Result<Project> {
    let repo = ProjectRepository::new(pool);
    repo.get(project_id).await
}

/// Publish a new project and compute its initial scores from the creator's
/// verification state and the submitted quality fields.
pub async fn create_project(
    pool: &PgPool,
    config: &ScoringConfig,
    request: &CreateProjectRequest,
) -> Result<Project> {
    let repo = ProjectRepository::new(pool);
    let created = repo.create(request).await?;

    scoring::recompute_and_store(pool, config, created.project_id).await
}

/// Update quality-relevant fields, then recompute scores so the feed
/// reflects the edit immediately.
pub async fn update_project(
    pool: &PgPool,
    config: &ScoringConfig,
    project_id: Uuid,
    request: &UpdateProjectRequest,
) -> Result<Project> {
    let repo = ProjectRepository::new(pool);
    repo.update(project_id, request).await?;

    scoring::recompute_and_store(pool, config, project_id).await
}

pub async fn delete_project(pool: &PgPool, project_id: Uuid) -> Result<()> {
    let repo = ProjectRepository::new(pool);
    repo.soft_delete(project_id).await
}
