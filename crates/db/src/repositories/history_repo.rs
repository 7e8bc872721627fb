//! Repository for the `history` table (append-only update log).

use fota_core::types::DbId;

use crate::models::history::{History, NewHistory};

/// Column list for `history` SELECT queries.
const COLUMNS: &str = "\
    id, device_id, fw_update_started, fw_update_success, firmware_id, \
    device_firmware, reason, \
    manufacturer_name, model_number, hardware_revision, software_revision";

/// Provides query operations for the update history log.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Append one history row. Rows are never updated or deleted here.
    pub async fn insert(
        executor: impl sqlx::PgExecutor<'_>,
        input: &NewHistory,
    ) -> Result<History, sqlx::Error> {
        let query = format!(
            "INSERT INTO history \
             (device_id, fw_update_started, fw_update_success, firmware_id, \
              device_firmware, reason, \
              manufacturer_name, model_number, hardware_revision, software_revision) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, History>(&query)
            .bind(input.device_id)
            .bind(input.fw_update_started)
            .bind(input.fw_update_success)
            .bind(input.firmware_id)
            .bind(&input.device_firmware)
            .bind(&input.reason)
            .bind(&input.manufacturer_name)
            .bind(&input.model_number)
            .bind(&input.hardware_revision)
            .bind(&input.software_revision)
            .fetch_one(executor)
            .await
    }

    /// List attempts for one device, newest start-timestamp first.
    /// Ties on the timestamp fall back to insertion order.
    pub async fn list_for_device(
        executor: impl sqlx::PgExecutor<'_>,
        device_id: DbId,
    ) -> Result<Vec<History>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM history WHERE device_id = $1 \
             ORDER BY fw_update_started DESC, id DESC"
        );
        sqlx::query_as::<_, History>(&query)
            .bind(device_id)
            .fetch_all(executor)
            .await
    }
}
