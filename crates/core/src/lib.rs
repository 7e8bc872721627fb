//! Pure domain logic for the FOTA backend.
//!
//! No I/O lives here: shared id/timestamp types, the domain error enum,
//! and the semantic-version resolution used to pick the latest firmware
//! for a hardware revision.

pub mod error;
pub mod types;
pub mod version;
