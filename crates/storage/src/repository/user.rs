use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user::UpdateVerificationRequest;
use crate::error::{Result, StorageError};
use crate::models::User;

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn update_verification(
        &self,
        user_id: Uuid,
        request: &UpdateVerificationRequest,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email_verified = COALESCE($1, email_verified),
                has_verified_credential = COALESCE($2, has_verified_credential),
                code_repository_connected = COALESCE($3, code_repository_connected)
            WHERE user_id = $4
            RETURNING *
            "#,
        )
        .bind(request.email_verified)
        .bind(request.has_verified_credential)
        .bind(request.code_repository_connected)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }
}
