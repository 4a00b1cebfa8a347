use thiserror::Error;

/// Internal issues indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Hashing a password or parsing a stored hash failed.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// A row that was just written could not be read back.
    #[error("{entity} {id} missing after write")]
    MissingAfterWrite {
        /// Entity kind, e.g. "Activity"
        entity: &'static str,
        /// Primary key that was written
        id: i32,
    },
}
