//! Route definition for the update-result write path.

use axum::routing::post;
use axum::Router;

use crate::handlers::results;
use crate::state::AppState;

/// Device routes mounted at `/results`.
///
/// ```text
/// POST /  -> post_result
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(results::post_result))
}
