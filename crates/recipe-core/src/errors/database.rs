// ABOUTME: Structured error types for database operations with sqlx classification
// ABOUTME: Maps SQLite result codes to not-found, conflict, constraint, and busy categories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Primary SQLite result code for `SQLITE_BUSY`
const SQLITE_BUSY: i32 = 5;
/// Primary SQLite result code for `SQLITE_LOCKED`
const SQLITE_LOCKED: i32 = 6;

/// Database operation failure with the operation that was attempted
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The query expected a row and found none
    #[error("{operation}: no matching row")]
    NotFound {
        /// Operation being performed
        operation: String,
    },

    /// A unique constraint rejected the write
    #[error("{operation}: {message}")]
    AlreadyExists {
        /// Operation being performed
        operation: String,
        /// Driver message naming the constraint
        message: String,
    },

    /// A foreign key, check, or not-null constraint rejected the write
    #[error("{operation}: {message}")]
    ConstraintViolation {
        /// Operation being performed
        operation: String,
        /// Driver message naming the constraint
        message: String,
    },

    /// Another connection holds the lock and the busy timeout expired
    #[error("{operation}: {message}")]
    Busy {
        /// Operation being performed
        operation: String,
        /// Driver message
        message: String,
    },

    /// Any other driver failure
    #[error("{operation}: {source}")]
    Query {
        /// Operation being performed
        operation: String,
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },
}

impl DatabaseError {
    /// Classify a driver error raised while performing `operation`
    pub fn from_sqlx(operation: impl Into<String>, error: sqlx::Error) -> Self {
        let operation = operation.into();

        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound { operation };
        }

        if let sqlx::Error::Database(db_error) = &error {
            let message = db_error.message().to_owned();

            if db_error.is_unique_violation() {
                return Self::AlreadyExists { operation, message };
            }
            if db_error.is_foreign_key_violation() || db_error.is_check_violation() {
                return Self::ConstraintViolation { operation, message };
            }

            let primary_code = db_error
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| code & 0xff);
            if matches!(primary_code, Some(SQLITE_BUSY | SQLITE_LOCKED)) {
                return Self::Busy { operation, message };
            }
        }

        Self::Query {
            operation,
            source: error,
        }
    }

    /// Whether retrying the whole operation may succeed
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        let code = match &error {
            DatabaseError::NotFound { .. } => ErrorCode::ResourceNotFound,
            DatabaseError::AlreadyExists { .. } => ErrorCode::ResourceAlreadyExists,
            DatabaseError::ConstraintViolation { .. } => ErrorCode::InvalidInput,
            DatabaseError::Busy { .. } => ErrorCode::ResourceLocked,
            DatabaseError::Query { .. } => ErrorCode::DatabaseError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error = DatabaseError::from_sqlx("get recipe", sqlx::Error::RowNotFound);
        assert!(matches!(error, DatabaseError::NotFound { .. }));

        let app: AppError = error.into();
        assert_eq!(app.code, ErrorCode::ResourceNotFound);
        assert_eq!(app.message, "get recipe: no matching row");
    }

    #[test]
    fn test_pool_timeout_is_a_plain_query_error() {
        let error = DatabaseError::from_sqlx("list units", sqlx::Error::PoolTimedOut);
        assert!(!error.is_busy());

        let app: AppError = error.into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert!(!app.is_retryable());
    }
}
