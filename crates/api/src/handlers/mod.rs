//! Request handlers.
//!
//! Handlers delegate to the repositories and the reconciler in
//! `fota-db` and map errors via [`crate::error::AppError`].

pub mod admin;
pub mod firmware;
pub mod results;
