//! Device registry entity models and DTOs.

use fota_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A device known to the backend, keyed by its unique serial number.
///
/// Devices are created lazily the first time an update result mentions
/// an unknown serial; they are only mutated by successful updates.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Device {
    pub id: DbId,
    pub serial_number: String,
    pub created: Timestamp,
    /// The firmware the device is currently believed to run. Nulled
    /// out when that firmware is deleted from the catalog.
    pub firmware_id: Option<DbId>,
    /// NULL means the device has never completed an update.
    pub last_update: Option<Timestamp>,
    pub manufacturer_name: Option<String>,
    pub model_number: Option<String>,
    pub hardware_revision: Option<String>,
    pub software_revision: Option<String>,
}

/// Descriptive fields a device reports about itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceProfile {
    pub manufacturer_name: String,
    pub model_number: String,
    pub hardware_revision: String,
    pub software_revision: String,
}

/// DTO for lazily creating a device from its first report.
#[derive(Debug, Clone)]
pub struct NewDevice {
    pub serial_number: String,
    /// Catalog row matching the firmware the device reported running,
    /// if that version is known. A brand-new device is seeded with it.
    pub firmware_id: Option<DbId>,
    pub profile: DeviceProfile,
}
