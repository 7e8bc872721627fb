//! Repository for the `devices` table (the device registry).

use fota_core::types::{DbId, Timestamp};

use crate::models::device::{Device, DeviceProfile, NewDevice};

/// Column list for `devices` SELECT queries.
const COLUMNS: &str = "\
    id, serial_number, created, firmware_id, last_update, \
    manufacturer_name, model_number, hardware_revision, software_revision";

/// Provides query operations for the device registry.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Look up a device by its unique serial number.
    pub async fn find_by_serial(
        executor: impl sqlx::PgExecutor<'_>,
        serial_number: &str,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE serial_number = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(serial_number)
            .fetch_optional(executor)
            .await
    }

    /// Fetch the device for `input.serial_number`, creating it when
    /// absent. Returns the device and whether this call created it.
    ///
    /// An existing device is returned untouched; the creation defaults
    /// in `input` only apply to a brand-new row. The insert uses
    /// `ON CONFLICT DO NOTHING` against the unique serial constraint so
    /// concurrent reports for the same serial cannot produce duplicate
    /// rows; the loser of the race falls through to the lookup.
    pub async fn get_or_create(
        conn: &mut sqlx::PgConnection,
        input: &NewDevice,
    ) -> Result<(Device, bool), sqlx::Error> {
        let insert = format!(
            "INSERT INTO devices \
             (serial_number, created, firmware_id, last_update, \
              manufacturer_name, model_number, hardware_revision, software_revision) \
             VALUES ($1, NOW(), $2, NULL, $3, $4, $5, $6) \
             ON CONFLICT (serial_number) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Device>(&insert)
            .bind(&input.serial_number)
            .bind(input.firmware_id)
            .bind(&input.profile.manufacturer_name)
            .bind(&input.profile.model_number)
            .bind(&input.profile.hardware_revision)
            .bind(&input.profile.software_revision)
            .fetch_optional(&mut *conn)
            .await?;

        if let Some(device) = created {
            tracing::debug!(serial_number = %device.serial_number, "created device on first report");
            return Ok((device, true));
        }

        // The serial already exists (or a concurrent insert won the
        // race); fetch the authoritative row.
        let existing = Self::find_by_serial(&mut *conn, &input.serial_number)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok((existing, false))
    }

    /// Record a successful update: overwrite the firmware reference,
    /// the last-update timestamp, and all four profile fields.
    ///
    /// Only ever called for reports with a true success flag; failed
    /// reports must leave the device untouched.
    pub async fn apply_successful_update(
        executor: impl sqlx::PgExecutor<'_>,
        device_id: DbId,
        firmware_id: Option<DbId>,
        at: Timestamp,
        profile: &DeviceProfile,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE devices SET \
             firmware_id = $2, last_update = $3, \
             manufacturer_name = $4, model_number = $5, \
             hardware_revision = $6, software_revision = $7 \
             WHERE id = $1",
        )
        .bind(device_id)
        .bind(firmware_id)
        .bind(at)
        .bind(&profile.manufacturer_name)
        .bind(&profile.model_number)
        .bind(&profile.hardware_revision)
        .bind(&profile.software_revision)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// List all devices, newest first.
    pub async fn list_all(
        executor: impl sqlx::PgExecutor<'_>,
    ) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices ORDER BY created DESC");
        sqlx::query_as::<_, Device>(&query).fetch_all(executor).await
    }
}
