//! Engine binding boundary
//!
//! The engine is the external native component that performs actual
//! audio/video capture, transport, and mixing. This module defines the seam
//! the core talks through: a process-wide [`EngineBinding`] with explicit
//! verbs for the lifecycle operations the state machine depends on, a single
//! untyped [`EngineBinding::command`] entry point for every stateless
//! forward, and one shared notification channel delivering
//! [`EventEnvelope`]s back to the client.
//!
//! All calls are non-blocking and complete asynchronously. The core never
//! manages engine resources directly; it only issues calls and observes
//! completions and events. Callers may not assume FIFO completion across
//! unrelated command kinds.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │       RtcClient         │
//! │  lifecycle │ commands   │
//! └──────┬─────────┬────────┘
//!        │ verbs   │ WireCall
//! ┌──────▼─────────▼────────┐
//! │     EngineBinding       │ ◄── This Module (trait only)
//! └──────┬──────────────────┘
//!        │ EventEnvelope stream
//! ┌──────▼──────────────────┐
//! │    ListenerRegistry     │
//! └─────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::client::types::Scene;
use crate::events::EventKind;

/// Result type for engine boundary calls
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure reported from the engine boundary
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The engine processed the call and rejected it with one of its own
    /// error codes. The code is engine-defined and passed through unchanged.
    #[error("engine rejected call with code {code}: {message}")]
    Rejected { code: i32, message: String },

    /// The call never reached the engine, or its completion was lost
    #[error("engine transport failure: {message}")]
    Transport { message: String },
}

impl EngineError {
    /// Engine-reported rejection with the given code
    pub fn rejected(code: i32, message: impl Into<String>) -> Self {
        Self::Rejected {
            code,
            message: message.into(),
        }
    }

    /// Transport-level failure
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// One call crossing the untyped command boundary
///
/// `method` names the engine verb; `args` is the already-normalized payload
/// produced by [`crate::codec::ParameterCodec`]. This is the only shape the
/// stateless command surface crosses the boundary in.
#[derive(Debug, Clone)]
pub struct WireCall {
    /// Engine verb name, e.g. `"muteLocalAudio"`
    pub method: &'static str,
    /// Normalized argument object
    pub args: serde_json::Value,
}

impl WireCall {
    pub fn new(method: &'static str, args: serde_json::Value) -> Self {
        Self { method, args }
    }
}

/// Payload of a notification as it crosses the boundary
///
/// One platform variant of the binding delivers already-structured values,
/// the other delivers encoded text that must be parsed before applications
/// see it. The codec hides the difference from the rest of the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPayload {
    /// Encoded text, decoded by the codec
    Text(String),
    /// Already-structured value, passed through unchanged
    Structured(serde_json::Value),
}

/// Boundary-crossing representation of one notification
///
/// Transient; exists only for the duration of one dispatch through the
/// listener registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event kind discriminator
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Opaque payload, structured or encoded text
    #[serde(rename = "params")]
    pub payload: RawPayload,
}

impl EventEnvelope {
    /// Envelope carrying an already-structured payload
    pub fn structured(kind: EventKind, value: serde_json::Value) -> Self {
        Self {
            kind,
            payload: RawPayload::Structured(value),
        }
    }

    /// Envelope carrying an encoded-text payload
    pub fn text(kind: EventKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            payload: RawPayload::Text(text.into()),
        }
    }
}

/// The external engine the client bridges to
///
/// Implementations wrap a concrete platform binding. The trait carries the
/// lifecycle verbs explicitly because the session state machine is driven by
/// their completion signals; everything else crosses through [`Self::command`].
///
/// `enter_room` is the one deliberately sign-overloaded completion: a
/// positive return is the elapsed entry time in milliseconds, a negative
/// return is a room-entry error code. A negative value is not a transport
/// failure and must not be mapped to [`EngineError`].
#[async_trait]
pub trait EngineBinding: Send + Sync {
    /// Acquire the process-wide shared engine instance
    async fn acquire(&self) -> EngineResult<()>;

    /// Release the shared engine instance
    async fn release(&self) -> EngineResult<()>;

    /// Enter a room. `args` is codec-normalized; positive result = elapsed
    /// milliseconds, negative result = room-entry error code.
    async fn enter_room(&self, args: serde_json::Value, scene: Scene) -> EngineResult<i64>;

    /// Leave the current room, releasing device and codec resources
    async fn exit_room(&self) -> EngineResult<()>;

    /// Move to another room without releasing local capture
    async fn switch_room(&self, args: serde_json::Value) -> EngineResult<()>;

    /// Change the local user's role in a live scene
    async fn switch_role(&self, args: serde_json::Value) -> EngineResult<()>;

    /// Start a cross-room relay with an anchor in another room
    async fn connect_other_room(&self, args: serde_json::Value) -> EngineResult<()>;

    /// Tear down the cross-room relay
    async fn disconnect_other_room(&self) -> EngineResult<()>;

    /// Forward a stateless command. Returns whatever value the engine
    /// produced, `null` for commands with no result.
    async fn command(&self, call: WireCall) -> EngineResult<serde_json::Value>;

    /// Take the engine's shared notification stream.
    ///
    /// A single multiplexed channel; the listener registry is the only
    /// consumer and de-multiplexes to registered callbacks.
    fn notifications(&self) -> mpsc::UnboundedReceiver<EventEnvelope>;
}
