//! Errors raised by a dictionary session.
use std::io;

use thiserror::Error;

use crate::protocol::Status;

pub type Result<T> = std::result::Result<T, DictError>;

/// Failures surfaced by [`DictionaryConnection`](crate::DictionaryConnection).
///
/// Only [`DictError::NoMatch`] and [`DictError::UnknownDatabase`] leave the
/// session at a command boundary with nothing left unread. After a
/// `Connection` or `InvalidResponse` error the session should be closed.
#[derive(Debug, Error)]
pub enum DictError {
    #[error("connection error: {reason}")]
    Connection {
        reason: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("invalid response, expected status {expected} but got {status}")]
    InvalidResponse { expected: u16, status: Status },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no match")]
    NoMatch,

    #[error("unknown database '{0}'")]
    UnknownDatabase(String),

    #[error("session already closed")]
    Closed,
}

impl DictError {
    pub(crate) fn connection(reason: impl Into<String>) -> Self {
        DictError::Connection {
            reason: reason.into(),
            source: None,
        }
    }

    /// True when the failure came from the transport rather than the server's reply.
    pub fn is_connection(&self) -> bool {
        matches!(self, DictError::Connection { .. } | DictError::Closed)
    }
}

impl From<io::Error> for DictError {
    fn from(value: io::Error) -> Self {
        DictError::Connection {
            reason: value.to_string(),
            source: Some(value),
        }
    }
}
