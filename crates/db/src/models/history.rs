//! Update history entity models and DTOs.

use fota_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One recorded update attempt. Append-only; never mutated.
///
/// Both references are nullable so the log survives deletion of the
/// device or firmware it mentions. `device_firmware` is deliberately a
/// plain string, not a reference: devices report whatever version they
/// believe they run, including builds the catalog has never seen.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct History {
    pub id: DbId,
    pub device_id: Option<DbId>,
    pub fw_update_started: Timestamp,
    pub fw_update_success: bool,
    pub firmware_id: Option<DbId>,
    pub device_firmware: Option<String>,
    pub reason: Option<String>,
    pub manufacturer_name: Option<String>,
    pub model_number: Option<String>,
    pub hardware_revision: Option<String>,
    pub software_revision: Option<String>,
}

/// DTO for appending a history row.
#[derive(Debug, Clone)]
pub struct NewHistory {
    pub device_id: Option<DbId>,
    pub fw_update_started: Timestamp,
    pub fw_update_success: bool,
    pub firmware_id: Option<DbId>,
    pub device_firmware: Option<String>,
    pub reason: Option<String>,
    pub manufacturer_name: Option<String>,
    pub model_number: Option<String>,
    pub hardware_revision: Option<String>,
    pub software_revision: Option<String>,
}
