use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::{
    create_project, delete_project, get_project, list_projects, update_project,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}
