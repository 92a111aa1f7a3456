//! Error shared by every repository port.

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Failures raised by repository adapters.
    pub enum PersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
    }
}

impl From<PersistenceError> for Error {
    fn from(error: PersistenceError) -> Self {
        match error {
            PersistenceError::Connection { message } => {
                Error::service_unavailable(format!("status store unavailable: {message}"))
            }
            PersistenceError::Query { message } => {
                Error::internal(format!("status store error: {message}"))
            }
        }
    }
}
