//! Handlers for the administrative surface: firmware uploads and
//! catalog/device/history listings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use fota_core::error::CoreError;
use fota_core::types::DbId;
use fota_db::models::device::Device;
use fota_db::models::firmware::{CreateFirmware, Firmware, FirmwareMeta};
use fota_db::models::history::History;
use fota_db::repositories::{DeviceRepo, FirmwareRepo, HistoryRepo};
use serde::Deserialize;

use crate::auth::DeviceAuth;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum accepted firmware payload size after decoding.
const MAX_FILE_SIZE: usize = 2 * 1024 * 1024;

/// Request body for a firmware upload. The payload travels as base64;
/// it may be omitted to register a version without bytes.
#[derive(Debug, Deserialize)]
pub struct UploadFirmwareRequest {
    pub fw_version: String,
    pub hw_compatibility: String,
    pub file_name: String,
    pub file: Option<String>,
}

/// POST /admin/firmware
///
/// Register a firmware release. The (fw_version, hw_compatibility) pair
/// is unique; duplicates answer 409.
pub async fn upload_firmware(
    State(state): State<AppState>,
    _auth: DeviceAuth,
    Json(input): Json<UploadFirmwareRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<FirmwareMeta>>)> {
    if input.fw_version.is_empty() || input.hw_compatibility.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "fw_version and hw_compatibility are required".to_string(),
        )));
    }

    let file = decode_payload(input.file.as_deref())?;

    let firmware = FirmwareRepo::insert(
        &state.pool,
        &CreateFirmware {
            fw_version: input.fw_version,
            hw_compatibility: input.hw_compatibility,
            file_name: input.file_name,
            file,
        },
    )
    .await?;

    tracing::info!(
        fw_version = %firmware.fw_version,
        hw_compatibility = %firmware.hw_compatibility,
        "registered firmware release"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: meta_of(firmware),
        }),
    ))
}

/// Request body for replacing the payload of an existing release.
#[derive(Debug, Deserialize)]
pub struct ReplacePayloadRequest {
    pub file_name: String,
    pub file: Option<String>,
}

/// PUT /admin/firmware/{id}
///
/// Replace the stored binary (and its file name) of an existing
/// release. The (fw_version, hw_compatibility) identity never changes;
/// shipping different code under a new version means uploading a new
/// release instead.
pub async fn replace_firmware_payload(
    State(state): State<AppState>,
    _auth: DeviceAuth,
    Path(id): Path<DbId>,
    Json(input): Json<ReplacePayloadRequest>,
) -> AppResult<Json<DataResponse<FirmwareMeta>>> {
    let file = decode_payload(input.file.as_deref())?;

    let firmware = FirmwareRepo::replace_payload(&state.pool, id, &input.file_name, file.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "firmware",
            key: id.to_string(),
        }))?;

    tracing::info!(
        fw_version = %firmware.fw_version,
        hw_compatibility = %firmware.hw_compatibility,
        "replaced firmware payload"
    );

    Ok(Json(DataResponse {
        data: meta_of(firmware),
    }))
}

/// Decode a base64 payload field and enforce the size cap.
fn decode_payload(encoded: Option<&str>) -> Result<Option<Vec<u8>>, AppError> {
    let Some(encoded) = encoded else {
        return Ok(None);
    };
    let bytes = BASE64_STANDARD
        .decode(encoded)
        .map_err(|_| AppError::BadRequest("file must be valid base64".to_string()))?;
    if bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::Core(CoreError::Validation(
            "Firmware file size can not be bigger than 2 MB!".to_string(),
        )));
    }
    Ok(Some(bytes))
}

fn meta_of(firmware: Firmware) -> FirmwareMeta {
    FirmwareMeta {
        id: firmware.id,
        fw_version: firmware.fw_version,
        hw_compatibility: firmware.hw_compatibility,
        date_added: firmware.date_added,
        file_name: firmware.file_name,
    }
}

/// GET /admin/firmware
///
/// List the catalog without payload bytes.
pub async fn list_firmware(
    State(state): State<AppState>,
    _auth: DeviceAuth,
) -> AppResult<Json<DataResponse<Vec<FirmwareMeta>>>> {
    let catalog = FirmwareRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: catalog }))
}

/// DELETE /admin/firmware/{id}
///
/// Remove a release. Devices and history rows that referenced it keep
/// existing with their reference nulled.
pub async fn delete_firmware(
    State(state): State<AppState>,
    _auth: DeviceAuth,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FirmwareRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "firmware",
            key: id.to_string(),
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /admin/devices
///
/// List registered devices, newest first.
pub async fn list_devices(
    State(state): State<AppState>,
    _auth: DeviceAuth,
) -> AppResult<Json<DataResponse<Vec<Device>>>> {
    let devices = DeviceRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: devices }))
}

/// GET /admin/devices/{serial}/history
///
/// Update attempts for one device, newest start-timestamp first.
pub async fn device_history(
    State(state): State<AppState>,
    _auth: DeviceAuth,
    Path(serial): Path<String>,
) -> AppResult<Json<DataResponse<Vec<History>>>> {
    let device = DeviceRepo::find_by_serial(&state.pool, &serial)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "device",
                key: serial.clone(),
            })
        })?;

    let rows = HistoryRepo::list_for_device(&state.pool, device.id).await?;
    Ok(Json(DataResponse { data: rows }))
}
