//! Route definitions for the administrative endpoints.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// GET    /firmware                   -> list_firmware
/// POST   /firmware                   -> upload_firmware
/// PUT    /firmware/{id}              -> replace_firmware_payload
/// DELETE /firmware/{id}              -> delete_firmware
/// GET    /devices                    -> list_devices
/// GET    /devices/{serial}/history   -> device_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/firmware",
            get(admin::list_firmware).post(admin::upload_firmware),
        )
        .route(
            "/firmware/{id}",
            delete(admin::delete_firmware).put(admin::replace_firmware_payload),
        )
        .route("/devices", get(admin::list_devices))
        .route("/devices/{serial}/history", get(admin::device_history))
}
