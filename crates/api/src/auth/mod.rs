//! Device credential handling.

pub mod jwt;

mod extract;

pub use extract::DeviceAuth;
