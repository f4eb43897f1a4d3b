use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::handlers::{award_badge, list_project_badges, revoke_badge, update_badge};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(award_badge))
        .route("/:id", put(update_badge).delete(revoke_badge))
        .route("/project/:project_id", get(list_project_badges))
}
