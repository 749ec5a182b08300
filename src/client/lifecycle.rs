//! Session lifecycle operations
//!
//! This module is the session controller: the only code that mutates
//! [`crate::session::Session`]. The state machine serializes every
//! lifecycle-affecting operation; a lifecycle call issued while another is
//! outstanding is rejected with an invalid-state error before the engine is
//! contacted, never queued.
//!
//! ```text
//!           enter_room            completion (result >= 0)
//!   Idle ──────────────► Entering ───────────────────────► InRoom
//!    ▲                      │                                │
//!    │                      │ completion (result < 0)        │ exit_room
//!    │                      ▼                                ▼
//!    └◄──────────────────  Idle ◄──────────────────────── Exiting
//! ```
//!
//! Engine completions re-check the state before committing their final
//! transition, so an `exit_room` racing an in-flight entry wins: the entry's
//! late positive completion does not resurrect the session.

use chrono::Utc;
use serde_json::json;

use crate::client::types::{Role, RoomEntryParams, Scene, SwitchRoomConfig};
use crate::error::{ClientError, ClientResult};
use crate::session::SessionState;

impl super::manager::RtcClient {
    /// Enter a room.
    ///
    /// Legal only from [`SessionState::Idle`]; calling while entering or
    /// already in a room fails with an invalid-state error instead of being
    /// forwarded, preserving the hard pairing contract between enter and
    /// exit.
    ///
    /// The returned value preserves the engine's sign-overloaded completion
    /// exactly: a non-negative value is the elapsed entry time in
    /// milliseconds and the session is in the room; a negative value is the
    /// engine's room-entry error code, surfaced as the `Ok` value rather
    /// than an error, with the session back to idle. Only transport-level
    /// failures reject.
    pub async fn enter_room(&self, params: RoomEntryParams, scene: Scene) -> ClientResult<i64> {
        {
            let mut session = self.session.write().await;
            if session.state != SessionState::Idle {
                return Err(ClientError::invalid_state("enter_room", session.state));
            }
            session.state = SessionState::Entering;
        }

        let args = match self.codec.encode_enter_room(&params, scene) {
            Ok(args) => args,
            Err(err) => {
                self.rollback_entering().await;
                return Err(err);
            }
        };

        tracing::info!(room = %params.room, scene = ?scene, "entering room");
        match self.engine.enter_room(args, scene).await {
            Ok(result) if result >= 0 => {
                let mut session = self.session.write().await;
                if session.state == SessionState::Entering {
                    session.state = SessionState::InRoom;
                    session.room = Some(params.room.clone());
                    session.role = params.role;
                    session.scene = Some(scene);
                    session.entered_at = Some(Utc::now());
                    tracing::info!(room = %params.room, elapsed_ms = result, "entered room");
                } else {
                    tracing::debug!(
                        state = %session.state,
                        "room entry completed after the session moved on; not committing"
                    );
                }
                Ok(result)
            }
            Ok(code) => {
                // Negative completion: a room-entry error code, not a
                // transport failure. Surface it as a value.
                tracing::warn!(room = %params.room, code, "room entry refused by engine");
                self.rollback_entering().await;
                Ok(code)
            }
            Err(err) => {
                self.rollback_entering().await;
                Err(err.into())
            }
        }
    }

    /// Leave the current room.
    ///
    /// Legal from [`SessionState::Entering`] or [`SessionState::InRoom`].
    /// Called while idle it is an idempotent no-op that succeeds without
    /// contacting the engine. On return to idle all room bindings are
    /// cleared; per the engine's contract, mute-all flags do not persist
    /// across a room boundary either.
    pub async fn exit_room(&self) -> ClientResult<()> {
        {
            let mut session = self.session.write().await;
            match session.state {
                SessionState::Idle => return Ok(()),
                SessionState::Exiting => {
                    return Err(ClientError::invalid_state("exit_room", session.state))
                }
                SessionState::Entering | SessionState::InRoom => {
                    session.state = SessionState::Exiting;
                }
            }
        }

        tracing::info!("exiting room");
        let result = self.engine.exit_room().await;

        // The session returns to idle whether or not the engine call
        // succeeded; exit releases local resources best-effort.
        self.session.write().await.reset();
        result.map_err(Into::into)
    }

    /// Move to another room without releasing local capture devices.
    ///
    /// Legal only from [`SessionState::InRoom`]; the state machine thereby
    /// serializes the switch against any concurrent enter or exit. On engine
    /// failure the session stays in the original room.
    pub async fn switch_room(&self, config: SwitchRoomConfig) -> ClientResult<()> {
        {
            let mut session = self.session.write().await;
            if session.state != SessionState::InRoom {
                return Err(ClientError::invalid_state("switch_room", session.state));
            }
            // Re-entering: the engine exits and enters internally.
            session.state = SessionState::Entering;
        }

        let args = match self.codec.encode_config(&config) {
            Ok(args) => args,
            Err(err) => {
                self.restore_in_room(None).await;
                return Err(err);
            }
        };

        tracing::info!(room = %config.room, "switching room");
        match self.engine.switch_room(args).await {
            Ok(()) => {
                self.restore_in_room(Some(config)).await;
                Ok(())
            }
            Err(err) => {
                self.restore_in_room(None).await;
                Err(err.into())
            }
        }
    }

    /// Change the local user's role, for live-broadcast scenes.
    ///
    /// Legal only from [`SessionState::InRoom`]; a pure forward that never
    /// changes the lifecycle state.
    pub async fn switch_role(&self, role: Role) -> ClientResult<()> {
        {
            let session = self.session.read().await;
            if session.state != SessionState::InRoom {
                return Err(ClientError::invalid_state("switch_role", session.state));
            }
        }

        self.engine
            .switch_role(json!({ "role": role.as_i32() }))
            .await?;

        let mut session = self.session.write().await;
        if session.state == SessionState::InRoom {
            session.role = Some(role);
        }
        Ok(())
    }

    /// Start a cross-room relay with an anchor in another room.
    ///
    /// Independent of the primary lifecycle machine, but only meaningful
    /// while in a room; rejected otherwise. `param` is the engine's JSON
    /// relay descriptor (room and user of the peer anchor), forwarded
    /// verbatim. The result arrives as an
    /// [`crate::events::EventKind::OtherRoomConnected`] notification.
    pub async fn connect_other_room(&self, param: impl Into<String>) -> ClientResult<()> {
        {
            let session = self.session.read().await;
            if session.state != SessionState::InRoom {
                return Err(ClientError::invalid_state("connect_other_room", session.state));
            }
        }
        self.engine
            .connect_other_room(json!({ "param": param.into() }))
            .await
            .map_err(Into::into)
    }

    /// Tear down the cross-room relay.
    pub async fn disconnect_other_room(&self) -> ClientResult<()> {
        {
            let session = self.session.read().await;
            if session.state != SessionState::InRoom {
                return Err(ClientError::invalid_state(
                    "disconnect_other_room",
                    session.state,
                ));
            }
        }
        self.engine.disconnect_other_room().await.map_err(Into::into)
    }

    async fn rollback_entering(&self) {
        let mut session = self.session.write().await;
        if session.state == SessionState::Entering {
            session.reset();
        }
    }

    /// Commit the end of a switch: back in a room, in the new room on
    /// success (`Some`) or the original one on failure (`None`).
    async fn restore_in_room(&self, switched_to: Option<SwitchRoomConfig>) {
        let mut session = self.session.write().await;
        if session.state == SessionState::Entering {
            session.state = SessionState::InRoom;
            if let Some(config) = switched_to {
                session.room = Some(config.room);
                session.entered_at = Some(Utc::now());
            }
        }
    }
}
