use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::StorageError;

/// Validation badge awarded to a project by a validator.
///
/// `points` is denormalized from the tier at award time so historical badges
/// keep their value if tier weights ever change.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Badge {
    pub badge_id: Uuid,
    pub project_id: Uuid,
    pub validator_id: Uuid,
    pub tier: String,
    pub points: i32,
    pub rationale: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Stone,
    Silver,
    Gold,
    Platinum,
    Demerit,
}

impl BadgeTier {
    pub fn points(&self) -> i32 {
        match self {
            Self::Stone => 5,
            Self::Silver => 10,
            Self::Gold => 15,
            Self::Platinum => 20,
            Self::Demerit => -10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stone => "stone",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
            Self::Demerit => "demerit",
        }
    }
}

impl std::str::FromStr for BadgeTier {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stone" => Ok(Self::Stone),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            "demerit" => Ok(Self::Demerit),
            other => Err(StorageError::InvalidInput(format!(
                "unknown badge tier: {other}"
            ))),
        }
    }
}
