//! Storage error types.
//!
//! Every variant carries enough context to diagnose the problem without a
//! debugger. Messages never include password hashes or token material.

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated (duplicate email or slug).
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// A record expected to exist was not found.
    ///
    /// Lookups return `Ok(None)` for missing rows; this variant is for
    /// mutations that target a specific record.
    #[error("record not found: {what}")]
    NotFound { what: String },

    /// The underlying backend failed (connection loss, query error).
    #[error("storage backend error: {reason}")]
    Backend { reason: String },
}

#[cfg(feature = "postgres-backend")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                // PostgreSQL unique violation
                if db_err.code().as_deref() == Some("23505") {
                    Self::Conflict {
                        reason: "record already exists".to_owned(),
                    }
                } else {
                    Self::Backend {
                        reason: format!("database error: {db_err}"),
                    }
                }
            }
            _ => Self::Backend {
                reason: format!("database error: {err}"),
            },
        }
    }
}
