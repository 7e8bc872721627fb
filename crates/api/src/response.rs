//! Shared response envelope types for API handlers.
//!
//! Admin listing responses use a `{ "data": ... }` envelope. The device
//! fetch endpoints deliberately do not: they mirror the firmware
//! updater protocol the devices already speak.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
