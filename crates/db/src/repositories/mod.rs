//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept a `PgExecutor` (pool, connection, or open transaction)
//! as the first argument.

pub mod device_repo;
pub mod firmware_repo;
pub mod history_repo;

pub use device_repo::DeviceRepo;
pub use firmware_repo::FirmwareRepo;
pub use history_repo::HistoryRepo;
