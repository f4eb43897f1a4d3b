use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::handlers::{get_user, update_verification};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_user))
        .route("/:id/verification", patch(update_verification))
}
