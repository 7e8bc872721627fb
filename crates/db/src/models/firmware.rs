//! Firmware catalog entity models and DTOs.

use fota_core::types::{DbId, Timestamp};
use fota_core::version::Release;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A firmware release stored in the catalog, including its binary
/// payload. Identity is the unique (fw_version, hw_compatibility) pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Firmware {
    pub id: DbId,
    pub fw_version: String,
    pub hw_compatibility: String,
    pub date_added: Timestamp,
    pub file_name: String,
    /// Opaque firmware image; NULL when the release was registered
    /// without a payload.
    #[serde(skip_serializing)]
    pub file: Option<Vec<u8>>,
}

/// Catalog row without the payload bytes.
///
/// Used for listings and version resolution so the whole catalog can be
/// loaded without dragging firmware images through memory.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FirmwareMeta {
    pub id: DbId,
    pub fw_version: String,
    pub hw_compatibility: String,
    pub date_added: Timestamp,
    pub file_name: String,
}

/// DTO for registering a new firmware release.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFirmware {
    pub fw_version: String,
    pub hw_compatibility: String,
    pub file_name: String,
    pub file: Option<Vec<u8>>,
}

impl Release for Firmware {
    fn fw_version(&self) -> &str {
        &self.fw_version
    }
    fn hw_compatibility(&self) -> &str {
        &self.hw_compatibility
    }
}

impl Release for FirmwareMeta {
    fn fw_version(&self) -> &str {
        &self.fw_version
    }
    fn hw_compatibility(&self) -> &str {
        &self.hw_compatibility
    }
}
