pub mod admin;
pub mod firmware;
pub mod health;
pub mod results;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /firmware/latest                    latest firmware version (GET)
/// /firmware/latest/download           latest firmware binary (GET)
///
/// /results                            post an update result (POST)
///
/// /admin/firmware                     list, upload
/// /admin/firmware/{id}                delete
/// /admin/devices                      list devices
/// /admin/devices/{serial}/history     per-device update history
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/firmware", firmware::router())
        .nest("/results", results::router())
        .nest("/admin", admin::router())
}
