//! Shared mapping from pool and Diesel failures onto [`PersistenceError`].

use tracing::debug;

use crate::domain::ports::PersistenceError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> PersistenceError {
    debug!(%error, "connection pool failure");
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PersistenceError::connection(message)
        }
    }
}

/// Map a Diesel error raised while running `operation`.
///
/// Closed connections become [`PersistenceError::Connection`]; everything
/// else is a query failure. Database messages are logged, not returned.
pub(crate) fn map_diesel_error(error: diesel::result::Error, operation: &str) -> PersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        other => debug!(error = %other, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection(format!("{operation}: database connection closed"))
        }
        DieselError::NotFound => PersistenceError::query(format!("{operation}: record not found")),
        _ => PersistenceError::query(format!("{operation}: database error")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, PersistenceError::connection("timed out"));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound, "load status");
        assert_eq!(mapped, PersistenceError::query("load status: record not found"));
    }

    #[rstest]
    fn other_errors_hide_details() {
        let mapped = map_diesel_error(diesel::result::Error::RollbackTransaction, "insert status");
        assert_eq!(mapped, PersistenceError::query("insert status: database error"));
    }
}
