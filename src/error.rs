//! Error types for the RTC client library
//!
//! Errors fall into three classes. Invalid lifecycle transitions are rejected
//! locally before any engine call is issued. Engine-reported failures carry
//! whatever diagnostic code the engine supplied, passed through unchanged.
//! Boundary decode failures are never surfaced as errors at all; they are
//! logged and the affected event is delivered with an empty payload (see
//! [`crate::client::ListenerRegistry`]).

use thiserror::Error;

use crate::engine::EngineError;
use crate::session::SessionState;

/// Result type for RTC client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the RTC client
#[derive(Debug, Error)]
pub enum ClientError {
    /// A lifecycle operation was issued from a state in which it is not legal.
    ///
    /// Rejected synchronously, before the engine is contacted, so the session
    /// state is guaranteed unchanged.
    #[error("invalid state for {operation}: session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// The engine rejected a call or reported a failure.
    ///
    /// `code` is the engine-defined integer when one was supplied; the core
    /// does not reinterpret it.
    #[error("engine call failed: {message}")]
    Engine {
        code: Option<i32>,
        message: String,
    },

    /// Configuration error
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Failed to serialize an outbound payload.
    ///
    /// Encoding well-formed structured input is infallible; hitting this
    /// variant means the payload itself was not serializable, which is a
    /// programming error rather than a runtime condition to recover from.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Internal error
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ClientError {
    /// Create an invalid-state error for a lifecycle operation
    pub fn invalid_state(operation: &'static str, state: SessionState) -> Self {
        Self::InvalidState { operation, state }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The engine-reported error code, if this error carries one
    pub fn engine_code(&self) -> Option<i32> {
        match self {
            Self::Engine { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<EngineError> for ClientError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Rejected { code, message } => Self::Engine {
                code: Some(code),
                message,
            },
            EngineError::Transport { message } => Self::Engine {
                code: None,
                message,
            },
        }
    }
}
