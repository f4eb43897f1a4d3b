use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::handlers::{cast_vote, list_user_votes};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cast_vote))
        .route("/user/:user_id", get(list_user_votes))
}
