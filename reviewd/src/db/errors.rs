use thiserror::Error;

/// Unified error type for database operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// Unique constraint violation
    #[error("Unique constraint violation")]
    UniqueViolation {
        /// The `table.column` list the engine names in its message, when extractable
        constraint: Option<String>,
        message: String,
    },

    /// Foreign key constraint violation
    #[error("Foreign key constraint violation")]
    ForeignKeyViolation { message: String },

    /// Check constraint violation
    #[error("Check constraint violation")]
    CheckViolation { message: String },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convert from sqlx::Error using proper sqlx error categorization
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    let message = db_err.message().to_string();
                    DbError::UniqueViolation {
                        constraint: extract_constraint_columns(&message),
                        message,
                    }
                } else if db_err.is_foreign_key_violation() {
                    DbError::ForeignKeyViolation {
                        message: db_err.message().to_string(),
                    }
                } else if db_err.is_check_violation() {
                    DbError::CheckViolation {
                        message: db_err.message().to_string(),
                    }
                } else {
                    // All other database errors are non-recoverable - convert to anyhow
                    DbError::Other(anyhow::Error::from(err))
                }
            }
            // All other sqlx errors are non-recoverable - convert to anyhow with context
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

/// Extract the violated column list from a SQLite constraint message.
///
/// SQLite unique violations look like
/// `UNIQUE constraint failed: users.email` (or a comma-separated list for
/// composite constraints), so the part after the colon identifies the
/// constraint well enough for user-facing mapping.
fn extract_constraint_columns(message: &str) -> Option<String> {
    message
        .split_once("constraint failed:")
        .map(|(_, cols)| cols.trim().to_string())
        .filter(|cols| !cols.is_empty())
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_constraint_columns() {
        assert_eq!(
            extract_constraint_columns("UNIQUE constraint failed: users.email"),
            Some("users.email".to_string())
        );
        assert_eq!(
            extract_constraint_columns("UNIQUE constraint failed: reviews.title_id, reviews.author_id"),
            Some("reviews.title_id, reviews.author_id".to_string())
        );
        assert_eq!(extract_constraint_columns("some other failure"), None);
    }
}
