//! Repository for the `firmware` table (the firmware catalog).
//!
//! Read paths return `Option` on misses: devices routinely report
//! versions the catalog does not carry, so a missing row is not an
//! error at this layer.

use fota_core::types::DbId;
use fota_core::version;

use crate::models::firmware::{CreateFirmware, Firmware, FirmwareMeta};

/// Column list for full `firmware` SELECT queries (includes the payload).
const COLUMNS: &str = "id, fw_version, hw_compatibility, date_added, file_name, file";

/// Column list for payload-free catalog queries.
const META_COLUMNS: &str = "id, fw_version, hw_compatibility, date_added, file_name";

/// Provides query operations for the firmware catalog.
pub struct FirmwareRepo;

impl FirmwareRepo {
    /// Register a new firmware release.
    ///
    /// The unique (fw_version, hw_compatibility) constraint makes a
    /// duplicate upload fail with a database error the caller maps to a
    /// conflict.
    pub async fn insert(
        executor: impl sqlx::PgExecutor<'_>,
        input: &CreateFirmware,
    ) -> Result<Firmware, sqlx::Error> {
        let query = format!(
            "INSERT INTO firmware (fw_version, hw_compatibility, date_added, file_name, file) \
             VALUES ($1, $2, NOW(), $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Firmware>(&query)
            .bind(&input.fw_version)
            .bind(&input.hw_compatibility)
            .bind(&input.file_name)
            .bind(&input.file)
            .fetch_one(executor)
            .await
    }

    /// Point lookup on the unique (fw_version, hw_compatibility) pair.
    ///
    /// Returns `None` when the catalog has no such release.
    pub async fn find_exact(
        executor: impl sqlx::PgExecutor<'_>,
        fw_version: &str,
        hw_rev: &str,
    ) -> Result<Option<Firmware>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM firmware WHERE fw_version = $1 AND hw_compatibility = $2");
        sqlx::query_as::<_, Firmware>(&query)
            .bind(fw_version)
            .bind(hw_rev)
            .fetch_optional(executor)
            .await
    }

    /// Fetch a release by id, including its payload.
    pub async fn get_by_id(
        executor: impl sqlx::PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Firmware>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM firmware WHERE id = $1");
        sqlx::query_as::<_, Firmware>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List the whole catalog without payloads, newest version string
    /// first (display ordering only; resolution uses semver precedence).
    pub async fn list_all(
        executor: impl sqlx::PgExecutor<'_>,
    ) -> Result<Vec<FirmwareMeta>, sqlx::Error> {
        let query = format!("SELECT {META_COLUMNS} FROM firmware ORDER BY fw_version DESC");
        sqlx::query_as::<_, FirmwareMeta>(&query)
            .fetch_all(executor)
            .await
    }

    /// The semantically latest release compatible with `hw_rev`, or
    /// `None` when the revision is absent, empty, or has no releases.
    pub async fn latest_for(
        executor: impl sqlx::PgExecutor<'_>,
        hw_rev: Option<&str>,
    ) -> Result<Option<FirmwareMeta>, sqlx::Error> {
        let catalog = Self::list_all(executor).await?;
        Ok(version::resolve_latest(&catalog, hw_rev).cloned())
    }

    /// Replace the stored payload and file name of an existing release.
    ///
    /// The (fw_version, hw_compatibility) identity is immutable; only
    /// the binary and its name move. Returns `None` for an unknown id.
    pub async fn replace_payload(
        executor: impl sqlx::PgExecutor<'_>,
        id: DbId,
        file_name: &str,
        file: Option<&[u8]>,
    ) -> Result<Option<Firmware>, sqlx::Error> {
        let query = format!(
            "UPDATE firmware SET file_name = $2, file = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Firmware>(&query)
            .bind(id)
            .bind(file_name)
            .bind(file)
            .fetch_optional(executor)
            .await
    }

    /// Delete a release. Dependent device and history rows survive with
    /// their firmware reference nulled by the schema's SET NULL rules.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(
        executor: impl sqlx::PgExecutor<'_>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM firmware WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
