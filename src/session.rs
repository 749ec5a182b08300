//! Session data model and lifecycle states
//!
//! The session is the single process-wide handle onto the engine, created
//! when a client acquires the shared engine instance and destroyed only on
//! explicit teardown. Its state moves through a cyclic lifecycle:
//!
//! ```text
//! Idle ──► Entering ──► InRoom ──► Exiting ──► Idle
//! ```
//!
//! Only the lifecycle operations on [`crate::client::RtcClient`] mutate a
//! session; everything else reads it. The state machine is the sole
//! synchronization discipline for lifecycle calls: a new lifecycle call
//! while one is outstanding is rejected, never queued.
//!
//! # Usage Examples
//!
//! ```rust
//! use rtc_client_core::session::{Session, SessionState};
//!
//! let session = Session::new();
//! assert_eq!(session.state, SessionState::Idle);
//! assert!(session.room.is_none());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::types::{Role, RoomIdentifier, Scene};

/// Lifecycle state of the session
///
/// Initial state is [`SessionState::Idle`]; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Not in a room; `enter_room` is the only legal lifecycle operation
    Idle,
    /// An `enter_room` call is in flight
    Entering,
    /// Entered; `exit_room`, `switch_room`, and `switch_role` are legal
    InRoom,
    /// An `exit_room` call is in flight
    Exiting,
}

impl SessionState {
    /// Whether `exit_room` may be issued from this state
    pub fn can_exit(&self) -> bool {
        matches!(self, Self::Entering | Self::InRoom)
    }

    /// Whether the session is settled in a room
    pub fn is_in_room(&self) -> bool {
        matches!(self, Self::InRoom)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Entering => "entering",
            Self::InRoom => "in-room",
            Self::Exiting => "exiting",
        };
        write!(f, "{}", s)
    }
}

/// Snapshot of the session handle
///
/// `room`, `role`, and `scene` are populated while the session is
/// [`SessionState::InRoom`] and cleared when it returns to idle.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Current lifecycle state
    pub state: SessionState,
    /// Identifier of the room currently entered, if any
    pub room: Option<RoomIdentifier>,
    /// Role the local user holds in the current room, if any
    pub role: Option<Role>,
    /// Scene the current room was entered with, if any
    pub scene: Option<Scene>,
    /// When the current room was entered
    pub entered_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a fresh idle session
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            room: None,
            role: None,
            scene: None,
            entered_at: None,
        }
    }

    /// Clear room bindings on return to idle
    pub(crate) fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.room = None;
        self.role = None;
        self.scene = None;
        self.entered_at = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
