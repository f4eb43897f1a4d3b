use std::sync::Arc;

use storage::Database;
use storage::services::scoring::ScoringConfig;

use crate::auth::ApiKeys;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub scoring: Arc<ScoringConfig>,
    pub api_keys: ApiKeys,
}

impl AppState {
    pub fn new(db: Database, scoring: ScoringConfig, api_keys: ApiKeys) -> Self {
        Self {
            db,
            scoring: Arc::new(scoring),
            api_keys,
        }
    }
}
