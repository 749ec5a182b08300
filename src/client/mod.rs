//! Client API layer
//!
//! This module contains the high-level client interface: the [`RtcClient`]
//! handle, its builder and configuration, the listener registry, and the
//! typed parameter surface. Operations on [`RtcClient`] split into two
//! families:
//!
//! - **Lifecycle** (`lifecycle.rs`): enter/exit/switch operations that read
//!   and advance the room session state machine.
//! - **Commands** (`commands.rs`): stateless forwards that marshal typed
//!   arguments into a single named engine call and pass whatever the engine
//!   answers back to the caller.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               RtcClient                 │
//! │  lifecycle ─── session state machine    │
//! │  commands ──── stateless forwards       │
//! │  registry ──── event fan-out            │
//! └───────────────────┬─────────────────────┘
//!                     │ WireCall / EventEnvelope
//!             ┌───────▼────────┐
//!             │ EngineBinding  │
//!             └────────────────┘
//! ```

pub mod builder;
pub mod config;
pub mod manager;
pub mod managers;
pub mod registry;
pub mod types;

mod commands;
mod lifecycle;


pub use builder::ClientBuilder;
pub use config::ClientConfig;
pub use manager::RtcClient;
pub use managers::{AudioEffectManager, BeautyManager, DeviceManager};
pub use registry::{ListenerHandle, ListenerRegistry};
pub use types::{
    AudioQuality, AudioRecordingParams, GSensorMode, LogLevel, MixUser, NetworkQosParams,
    PublishCdnParams, Role, RoomEntryParams, RoomIdentifier, Scene, SwitchRoomConfig,
    TranscodingConfig, VideoEncoderParams, VideoRotation, VideoStreamType,
};
