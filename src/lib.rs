//! # RTC Client Core
//!
//! Control-plane bridge between application code and a real-time
//! audio/video engine. The engine performs capture, transport, and mixing;
//! this crate supplies the typed client surface in front of it: a room
//! session state machine, normalized parameter marshalling, stateless
//! command forwarding, and decoded event fan-out to registered listeners.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │          Application Layer            │
//! └──────────────────┬────────────────────┘
//! ┌──────────────────▼────────────────────┐
//! │             RtcClient                 │
//! │ ┌───────────┐ ┌──────────┐ ┌────────┐ │
//! │ │ lifecycle │ │ commands │ │registry│ │
//! │ └─────┬─────┘ └────┬─────┘ └───▲────┘ │
//! │       │     ParameterCodec     │      │
//! └───────┼────────────┼───────────┼──────┘
//!         │ verbs      │ WireCall  │ EventEnvelope
//! ┌───────▼────────────▼───────────┴──────┐
//! │            EngineBinding              │
//! │         (external engine)             │
//! └───────────────────────────────────────┘
//! ```
//!
//! Room membership is modeled as a four-state cycle
//! (idle → entering → in-room → exiting → idle). Lifecycle operations are
//! serialized by rejection: a second entry attempt while one is in flight
//! fails immediately instead of queueing. Everything that does not touch
//! membership is a stateless forward accepted in any state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rtc_client_core::{
//!     ClientBuilder, PlatformVariant, RoomEntryParams, RoomIdentifier, Scene,
//! };
//! # use rtc_client_core::engine::EngineBinding;
//! # async fn example(engine: Arc<dyn EngineBinding>) -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new()
//!     .engine(engine)
//!     .platform_variant(PlatformVariant::Structured)
//!     .build()
//!     .await?;
//!
//! let params = RoomEntryParams::new(1400000001, "alice", "sig-token", RoomIdentifier::Numeric(100));
//! let result = client.enter_room(params, Scene::VideoCall).await?;
//! if result >= 0 {
//!     println!("entered in {} ms", result);
//! }
//!
//! client.exit_room().await?;
//! client.destroy().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`client`] - the [`RtcClient`] handle, builder, listener registry, and
//!   typed parameter surface
//! - [`codec`] - parameter normalization for the two engine wire dialects
//! - [`engine`] - the [`engine::EngineBinding`] seam a platform binding implements
//! - [`events`] - event kinds, typed payloads, and the handler trait
//! - [`session`] - the room session state machine
//! - [`error`] - crate-wide error type

pub mod client;
pub mod codec;
pub mod engine;
pub mod error;
pub mod events;
pub mod session;

pub use client::{
    AudioEffectManager, AudioQuality, AudioRecordingParams, BeautyManager, ClientBuilder,
    ClientConfig, DeviceManager, GSensorMode, ListenerHandle, LogLevel, MixUser,
    NetworkQosParams, PublishCdnParams, Role, RoomEntryParams, RoomIdentifier, RtcClient, Scene,
    SwitchRoomConfig, TranscodingConfig, VideoEncoderParams, VideoRotation, VideoStreamType,
};
pub use codec::{ParameterCodec, PlatformVariant};
pub use error::{ClientError, ClientResult};
pub use events::{EventKind, EventPayload, RtcEventHandler};
pub use session::{Session, SessionState};
