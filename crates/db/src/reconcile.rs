//! Update-result reconciliation.
//!
//! When a device reports the outcome of a firmware update, the backend
//! resolves the device (creating it on first contact), resolves the
//! firmware that was flashed (or records it as unknown), appends one
//! history row, and (for successful updates only) moves the device's
//! recorded state forward. All of that happens in a single transaction
//! so a history row is never committed without its matching device
//! mutation.

use chrono::Utc;
use fota_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::device::{DeviceProfile, NewDevice};
use crate::models::history::{History, NewHistory};
use crate::repositories::{DeviceRepo, FirmwareRepo, HistoryRepo};
use crate::DbPool;

/// The wire schema of an update-result report.
///
/// Everything is optional at the type level; [`UpdateReconciler`]
/// enforces which fields must actually be present before anything is
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReport {
    /// Device serial number.
    pub device: Option<String>,
    /// When the update attempt started. Defaults to now when omitted.
    pub fw_update_started: Option<Timestamp>,
    /// Whether the update succeeded. Defaults to false when omitted.
    pub fw_update_success: Option<bool>,
    /// Version string of the firmware that was flashed (the target).
    pub firmware: Option<String>,
    /// Version string the device reported running before the attempt.
    /// Stored verbatim; may name a build the catalog has never seen.
    pub device_firmware: Option<String>,
    /// Free-text success/failure reason.
    pub reason: Option<String>,
    pub manufacturer_name: Option<String>,
    pub model_number: Option<String>,
    pub hardware_revision: Option<String>,
    pub software_revision: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// The report is missing required attributes. Nothing was persisted.
    #[error("You need to provide all attributes!")]
    MissingAttributes,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Required fields extracted from a report after the validation gate.
struct ValidReport {
    serial_number: String,
    started: Timestamp,
    success: bool,
    target_version: Option<String>,
    device_firmware: String,
    reason: Option<String>,
    profile: DeviceProfile,
}

impl UpdateReport {
    /// The validation gate: every field the device must supply.
    ///
    /// The target firmware version, reason, and success flag may be
    /// absent; a missing target simply resolves to no catalog row.
    fn validate(self) -> Result<ValidReport, ReconcileError> {
        let (
            Some(serial_number),
            Some(device_firmware),
            Some(manufacturer_name),
            Some(model_number),
            Some(hardware_revision),
            Some(software_revision),
        ) = (
            self.device,
            self.device_firmware,
            self.manufacturer_name,
            self.model_number,
            self.hardware_revision,
            self.software_revision,
        )
        else {
            return Err(ReconcileError::MissingAttributes);
        };

        Ok(ValidReport {
            serial_number,
            started: self.fw_update_started.unwrap_or_else(Utc::now),
            success: self.fw_update_success.unwrap_or(false),
            target_version: self.firmware,
            device_firmware,
            reason: self.reason,
            profile: DeviceProfile {
                manufacturer_name,
                model_number,
                hardware_revision,
                software_revision,
            },
        })
    }
}

/// Processes update-result reports.
pub struct UpdateReconciler;

impl UpdateReconciler {
    /// Reconcile one report and return the history row it produced.
    ///
    /// Ordering matters: the device identity must exist before the
    /// history append can reference it. Catalog misses (unknown target
    /// firmware, unknown device-reported firmware) are absorbed as NULL
    /// references and never fail the report; the only caller-visible
    /// error besides storage failures is the validation gate.
    pub async fn process(pool: &DbPool, report: UpdateReport) -> Result<History, ReconcileError> {
        let report = report.validate()?;

        let mut tx = pool.begin().await?;

        // Step 1: device resolution. A brand-new device is seeded with
        // whatever firmware it reported running, if the catalog knows
        // that (version, hardware revision) pair.
        let seed_firmware = FirmwareRepo::find_exact(
            &mut *tx,
            &report.device_firmware,
            &report.profile.hardware_revision,
        )
        .await?;

        let (device, created) = DeviceRepo::get_or_create(
            &mut tx,
            &NewDevice {
                serial_number: report.serial_number.clone(),
                firmware_id: seed_firmware.map(|fw| fw.id),
                profile: report.profile.clone(),
            },
        )
        .await?;

        // Step 2: target firmware resolution. Devices may report
        // versions unknown to the catalog (beta builds, in-progress
        // rollouts); that resolves to NULL rather than an error.
        let target_firmware = match &report.target_version {
            Some(version) => {
                FirmwareRepo::find_exact(&mut *tx, version, &report.profile.hardware_revision)
                    .await?
            }
            None => None,
        };
        let target_firmware_id = target_firmware.map(|fw| fw.id);

        // Step 3: unconditional history append.
        let history = HistoryRepo::insert(
            &mut *tx,
            &NewHistory {
                device_id: Some(device.id),
                fw_update_started: report.started,
                fw_update_success: report.success,
                firmware_id: target_firmware_id,
                device_firmware: Some(report.device_firmware.clone()),
                reason: report.reason.clone(),
                manufacturer_name: Some(report.profile.manufacturer_name.clone()),
                model_number: Some(report.profile.model_number.clone()),
                hardware_revision: Some(report.profile.hardware_revision.clone()),
                software_revision: Some(report.profile.software_revision.clone()),
            },
        )
        .await?;

        // Step 4: only a successful attempt moves device state forward.
        // Failures leave the device exactly as it was.
        if report.success {
            DeviceRepo::apply_successful_update(
                &mut *tx,
                device.id,
                target_firmware_id,
                report.started,
                &report.profile,
            )
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            serial_number = %report.serial_number,
            success = report.success,
            device_created = created,
            target_resolved = target_firmware_id.is_some(),
            "reconciled update report"
        );

        Ok(history)
    }
}
