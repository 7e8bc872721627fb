//! Handler for the update-result write path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fota_db::reconcile::{UpdateReconciler, UpdateReport};

use crate::auth::DeviceAuth;
use crate::error::AppResult;
use crate::state::AppState;

/// POST /results
///
/// Reconcile a device's update-result report: resolve or create the
/// device, resolve the flashed firmware (possibly unknown), append a
/// history row, and move device state forward on success. Responds 201
/// with no body, or 400 with the fixed "missing attributes" message
/// when the report is incomplete.
pub async fn post_result(
    State(state): State<AppState>,
    _device: DeviceAuth,
    Json(report): Json<UpdateReport>,
) -> AppResult<StatusCode> {
    UpdateReconciler::process(&state.pool, report).await?;
    Ok(StatusCode::CREATED)
}
