#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Lookup of an entity by an identifying key (database id or a
    /// natural key such as a device serial) found nothing.
    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
