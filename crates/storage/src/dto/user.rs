use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::User;

/// Partial update of a creator's verification flags. Omitted fields are left
/// as they are.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVerificationRequest {
    pub email_verified: Option<bool>,
    pub has_verified_credential: Option<bool>,
    pub code_repository_connected: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email_verified: bool,
    pub has_verified_credential: bool,
    pub code_repository_connected: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            username: u.username,
            email_verified: u.email_verified,
            has_verified_credential: u.has_verified_credential,
            code_repository_connected: u.code_repository_connected,
            created_at: u.created_at,
        }
    }
}
