use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::BadgeTier;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AwardBadgeRequest {
    pub project_id: Uuid,
    pub validator_id: Uuid,
    pub tier: BadgeTier,
    #[validate(length(max = 2000))]
    pub rationale: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBadgeRequest {
    pub tier: BadgeTier,
    #[validate(length(max = 2000))]
    pub rationale: Option<String>,
}
