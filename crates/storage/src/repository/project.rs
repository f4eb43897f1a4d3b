use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::project::{CreateProjectRequest, FeedFilter, UpdateProjectRequest};
use crate::error::{Result, StorageError};
use crate::models::Project;

pub struct ProjectRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProjectRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Paginated feed. Ordering comes from the stored score columns, so
    /// listing never recomputes anything.
    pub async fn feed(&self, filter: &FeedFilter) -> Result<(Vec<Project>, i64)> {
        let total_items = self.count(filter).await?;

        let mut query = QueryBuilder::new("SELECT * FROM projects WHERE is_deleted = FALSE");

        if let Some(creator) = filter.creator {
            query.push(" AND user_id = ");
            query.push_bind(creator);
        }

        // Trusted enum mapping, not user input.
        query.push(" ORDER BY ");
        query.push(filter.sort.as_order_by());

        query.push(" LIMIT ");
        query.push_bind(filter.pagination.limit() as i64);
        query.push(" OFFSET ");
        query.push_bind(filter.pagination.offset() as i64);

        let projects = query
            .build_query_as::<Project>()
            .fetch_all(self.pool)
            .await?;

        Ok((projects, total_items))
    }

    async fn count(&self, filter: &FeedFilter) -> Result<i64> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM projects WHERE is_deleted = FALSE");

        if let Some(creator) = filter.creator {
            query.push(" AND user_id = ");
            query.push_bind(creator);
        }

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn get(&self, project_id: Uuid) -> Result<Project> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE project_id = $1 AND is_deleted = FALSE",
        )
        .bind(project_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Insert a new project. Score fields start at their column defaults;
    /// the caller runs the scoring recompute right after.
    pub async fn create(&self, request: &CreateProjectRequest) -> Result<Project> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects
                (user_id, title, tagline, description, demo_url, repository_url,
                 tech_stack, screenshot_urls)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(&request.title)
        .bind(&request.tagline)
        .bind(&request.description)
        .bind(&request.demo_url)
        .bind(&request.repository_url)
        .bind(&request.tech_stack)
        .bind(&request.screenshot_urls)
        .fetch_one(self.pool)
        .await?;

        Ok(project)
    }

    /// Update the quality-relevant fields. Omitted fields keep their value.
    pub async fn update(
        &self,
        project_id: Uuid,
        request: &UpdateProjectRequest,
    ) -> Result<Project> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = COALESCE($1, title),
                tagline = COALESCE($2, tagline),
                description = COALESCE($3, description),
                demo_url = COALESCE($4, demo_url),
                repository_url = COALESCE($5, repository_url),
                tech_stack = COALESCE($6, tech_stack),
                screenshot_urls = COALESCE($7, screenshot_urls),
                updated_at = CURRENT_TIMESTAMP
            WHERE project_id = $8 AND is_deleted = FALSE
            RETURNING *
            "#,
        )
        .bind(&request.title)
        .bind(&request.tagline)
        .bind(&request.description)
        .bind(&request.demo_url)
        .bind(&request.repository_url)
        .bind(&request.tech_stack)
        .bind(&request.screenshot_urls)
        .bind(project_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(project)
    }

    pub async fn soft_delete(&self, project_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE projects SET is_deleted = TRUE, updated_at = CURRENT_TIMESTAMP WHERE project_id = $1 AND is_deleted = FALSE",
        )
        .bind(project_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
