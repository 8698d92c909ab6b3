//! Error types for the shared database layer
//!
//! Startup distinguishes configuration problems (missing `DATABASE_URL`)
//! from connection, query, and migration failures so the service can
//! report which phase failed before it begins serving requests.

use sqlx::Error as SqlxError;
use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Failures raised by the database layer
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Could not establish a connection to PostgreSQL
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A query failed after the pool was established
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Schema migrations could not be applied
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Required environment configuration is missing or malformed
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl From<MigrateError> for DatabaseError {
    fn from(err: MigrateError) -> Self {
        DatabaseError::Migration(err.to_string())
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_error_converts_to_migration_variant() {
        let source = MigrateError::from(SqlxError::PoolClosed);
        let err = DatabaseError::from(source);
        assert!(matches!(err, DatabaseError::Migration(_)));
        assert!(err.to_string().starts_with("Database migration error"));
    }

    #[test]
    fn test_configuration_error_names_the_problem() {
        let err = DatabaseError::Configuration("DATABASE_URL environment variable not set".into());
        assert!(err.to_string().contains("DATABASE_URL"));
    }
}
