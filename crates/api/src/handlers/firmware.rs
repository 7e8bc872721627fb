//! Handlers for the device-facing firmware fetch endpoints.
//!
//! Devices present a bearer token whose `hw_rev` claim selects which
//! firmware line they follow. Everything that prevents resolution (no
//! claim, unknown revision, empty catalog, missing payload) answers
//! 204 No Content so a device updater can treat "nothing to do" as one
//! case.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fota_db::repositories::FirmwareRepo;
use serde::Serialize;

use crate::auth::DeviceAuth;
use crate::error::AppResult;
use crate::state::AppState;

/// Response payload for the latest-firmware metadata endpoint.
#[derive(Debug, Serialize)]
pub struct FirmwareVersion {
    pub fw_version: String,
}

/// GET /firmware/latest
///
/// Version of the latest firmware for the caller's hardware revision,
/// or 204 when none resolves.
pub async fn latest_version(
    State(state): State<AppState>,
    device: DeviceAuth,
) -> AppResult<Response> {
    let latest = FirmwareRepo::latest_for(&state.pool, device.hw_rev.as_deref()).await?;

    match latest {
        Some(fw) => Ok(Json(FirmwareVersion {
            fw_version: fw.fw_version,
        })
        .into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// GET /firmware/latest/download
///
/// Binary payload of the latest firmware for the caller's hardware
/// revision. The attachment is named `<fw_version><original extension>`
/// (e.g. `2.1.0.cyacd2`) so devices can cache by version. 204 when no
/// firmware resolves or the release carries no payload.
pub async fn download_latest(
    State(state): State<AppState>,
    device: DeviceAuth,
) -> AppResult<Response> {
    let Some(meta) = FirmwareRepo::latest_for(&state.pool, device.hw_rev.as_deref()).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    // Re-fetch by id: the resolution pass deliberately avoids loading
    // payload bytes for the whole catalog.
    let firmware = FirmwareRepo::get_by_id(&state.pool, meta.id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    let Some(contents) = firmware.file else {
        tracing::warn!(
            fw_version = %firmware.fw_version,
            hw_compatibility = %firmware.hw_compatibility,
            "latest firmware has no stored payload"
        );
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let file_name = format!(
        "{}{}",
        firmware.fw_version,
        file_extension(&firmware.file_name)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={file_name}"),
            ),
        ],
        contents,
    )
        .into_response())
}

/// The extension of `file_name` including the dot, or `""` when the
/// name has none.
fn file_extension(file_name: &str) -> &str {
    file_name
        .rfind('.')
        .map(|idx| &file_name[idx..])
        .unwrap_or("")
}
