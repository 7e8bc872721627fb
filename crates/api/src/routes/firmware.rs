//! Route definitions for the device-facing firmware fetch endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::firmware;
use crate::state::AppState;

/// Device routes mounted at `/firmware`.
///
/// ```text
/// GET /latest           -> latest_version
/// GET /latest/download  -> download_latest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/latest", get(firmware::latest_version))
        .route("/latest/download", get(firmware::download_latest))
}
