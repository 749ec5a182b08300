//! Event types for the RTC client library
//!
//! The engine emits notifications on a single multiplexed channel as
//! `{type, params}` envelopes. At the boundary the payload may be structured
//! or encoded text depending on the platform variant; it is decoded exactly
//! once (see [`crate::codec::ParameterCodec`]) into the [`EventPayload`]
//! tagged union before applications see it.
//!
//! # Event Categories
//!
//! - **Lifecycle** - room entered/exited, role and room switches, relay results
//! - **Remote users** - enter/leave, audio/video availability
//! - **Quality** - voice volume levels, network quality, statistics
//! - **Publishing** - CDN publish and mix-transcoding results
//! - **Diagnostics** - errors, warnings, speed-test results
//!
//! # Usage Examples
//!
//! ## Implementing an Event Handler
//!
//! ```rust
//! use rtc_client_core::events::{EventKind, EventPayload, RtcEventHandler};
//! use async_trait::async_trait;
//!
//! struct MyHandler;
//!
//! #[async_trait]
//! impl RtcEventHandler for MyHandler {
//!     async fn on_event(&self, kind: EventKind, payload: Option<EventPayload>) {
//!         match payload {
//!             Some(EventPayload::RoomEntered(entry)) => {
//!                 println!("entered in {} ms", entry.result);
//!             }
//!             Some(EventPayload::RemoteUserEntered(user)) => {
//!                 println!("{} joined", user.user_id);
//!             }
//!             // A malformed payload arrives as None; the event itself
//!             // is still delivered.
//!             None => println!("undecodable {:?} event", kind),
//!             _ => {}
//!         }
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Kind discriminator of an engine notification
///
/// Serializes to the engine's callback names (`onEnterRoom`, ...), which is
/// the form the discriminator crosses the boundary in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "onError")]
    Error,
    #[serde(rename = "onWarning")]
    Warning,
    /// Room-entry completion; see [`RoomEntryResult`] for the sign contract
    #[serde(rename = "onEnterRoom")]
    RoomEntered,
    #[serde(rename = "onExitRoom")]
    RoomExited,
    #[serde(rename = "onSwitchRole")]
    RoleSwitched,
    #[serde(rename = "onSwitchRoom")]
    RoomSwitched,
    #[serde(rename = "onConnectOtherRoom")]
    OtherRoomConnected,
    #[serde(rename = "onDisconnectOtherRoom")]
    OtherRoomDisconnected,
    #[serde(rename = "onRemoteUserEnterRoom")]
    RemoteUserEntered,
    #[serde(rename = "onRemoteUserLeaveRoom")]
    RemoteUserLeft,
    #[serde(rename = "onUserVideoAvailable")]
    UserVideoAvailable,
    #[serde(rename = "onUserAudioAvailable")]
    UserAudioAvailable,
    #[serde(rename = "onUserVoiceVolume")]
    UserVoiceVolume,
    #[serde(rename = "onNetworkQuality")]
    NetworkQuality,
    #[serde(rename = "onStatistics")]
    Statistics,
    #[serde(rename = "onStartPublishing")]
    PublishingStarted,
    #[serde(rename = "onStopPublishing")]
    PublishingStopped,
    #[serde(rename = "onStartPublishCDNStream")]
    CdnStreamStarted,
    #[serde(rename = "onStopPublishCDNStream")]
    CdnStreamStopped,
    #[serde(rename = "onSetMixTranscodingConfig")]
    TranscodingConfigured,
    #[serde(rename = "onSpeedTest")]
    SpeedTest,
    #[serde(rename = "onExperimentalCallback")]
    Experimental,
}

// ===== DECODED PAYLOADS =====

/// Engine error notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// Engine-defined error code, passed through unchanged
    pub err_code: i32,
    pub err_msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<serde_json::Value>,
}

/// Engine warning notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningInfo {
    pub warning_code: i32,
    pub warning_msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<serde_json::Value>,
}

/// Room-entry completion value
///
/// Sign-overloaded by the engine's contract: positive is the elapsed entry
/// time in milliseconds, negative is a room-entry error code. Preserved
/// as-is for compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomEntryResult {
    pub result: i64,
}

/// Room-exit notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomExitInfo {
    /// 0 = voluntary exit, 1 = kicked, 2 = room dismissed
    pub reason: i32,
}

/// Generic completion of an engine action (switch, relay, publish, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    /// 0 on success, otherwise an engine-defined error code
    pub err_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err_msg: Option<String>,
}

/// A remote user appeared in the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUserInfo {
    pub user_id: String,
}

/// A remote user left the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUserLeaveInfo {
    pub user_id: String,
    /// 0 = voluntary, 1 = timeout
    pub reason: i32,
}

/// A remote user's audio or video stream became (un)available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInfo {
    pub user_id: String,
    pub available: bool,
}

/// Volume evaluation for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserVolume {
    /// Empty string identifies the local user
    pub user_id: String,
    /// 0-100
    pub volume: i32,
}

/// Periodic volume evaluation across the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceVolumeInfo {
    #[serde(default)]
    pub user_volumes: Vec<UserVolume>,
    pub total_volume: i32,
}

/// Network quality rating for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// 1 (excellent) through 6 (down), engine-defined scale
    pub quality: i32,
}

/// Periodic network quality report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkQualityInfo {
    pub local_quality: QualityEntry,
    #[serde(default)]
    pub remote_quality: Vec<QualityEntry>,
}

/// Decoded payload of one engine notification, tagged by [`EventKind`]
///
/// Kinds whose payloads the engine does not give a stable schema for
/// (statistics, speed-test, experimental) carry the structured value
/// unparsed.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Error(ErrorInfo),
    Warning(WarningInfo),
    RoomEntered(RoomEntryResult),
    RoomExited(RoomExitInfo),
    RoleSwitched(ActionResult),
    RoomSwitched(ActionResult),
    OtherRoomConnected(ActionResult),
    OtherRoomDisconnected(ActionResult),
    RemoteUserEntered(RemoteUserInfo),
    RemoteUserLeft(RemoteUserLeaveInfo),
    UserVideoAvailable(AvailabilityInfo),
    UserAudioAvailable(AvailabilityInfo),
    UserVoiceVolume(VoiceVolumeInfo),
    NetworkQuality(NetworkQualityInfo),
    Statistics(serde_json::Value),
    PublishingStarted(ActionResult),
    PublishingStopped(ActionResult),
    CdnStreamStarted(ActionResult),
    CdnStreamStopped(ActionResult),
    TranscodingConfigured(ActionResult),
    SpeedTest(serde_json::Value),
    Experimental(serde_json::Value),
}

impl EventPayload {
    /// Kind-directed decode of a structured payload value.
    ///
    /// Returns `None` when the value does not match the kind's schema; the
    /// caller is expected to deliver the event anyway with an empty payload.
    pub fn decode(kind: EventKind, value: serde_json::Value) -> Option<Self> {
        fn typed<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Option<T> {
            serde_json::from_value(value).ok()
        }

        match kind {
            EventKind::Error => typed(value).map(Self::Error),
            EventKind::Warning => typed(value).map(Self::Warning),
            EventKind::RoomEntered => typed(value).map(Self::RoomEntered),
            EventKind::RoomExited => typed(value).map(Self::RoomExited),
            EventKind::RoleSwitched => typed(value).map(Self::RoleSwitched),
            EventKind::RoomSwitched => typed(value).map(Self::RoomSwitched),
            EventKind::OtherRoomConnected => typed(value).map(Self::OtherRoomConnected),
            EventKind::OtherRoomDisconnected => typed(value).map(Self::OtherRoomDisconnected),
            EventKind::RemoteUserEntered => typed(value).map(Self::RemoteUserEntered),
            EventKind::RemoteUserLeft => typed(value).map(Self::RemoteUserLeft),
            EventKind::UserVideoAvailable => typed(value).map(Self::UserVideoAvailable),
            EventKind::UserAudioAvailable => typed(value).map(Self::UserAudioAvailable),
            EventKind::UserVoiceVolume => typed(value).map(Self::UserVoiceVolume),
            EventKind::NetworkQuality => typed(value).map(Self::NetworkQuality),
            EventKind::Statistics => Some(Self::Statistics(value)),
            EventKind::PublishingStarted => typed(value).map(Self::PublishingStarted),
            EventKind::PublishingStopped => typed(value).map(Self::PublishingStopped),
            EventKind::CdnStreamStarted => typed(value).map(Self::CdnStreamStarted),
            EventKind::CdnStreamStopped => typed(value).map(Self::CdnStreamStopped),
            EventKind::TranscodingConfigured => typed(value).map(Self::TranscodingConfigured),
            EventKind::SpeedTest => Some(Self::SpeedTest(value)),
            EventKind::Experimental => Some(Self::Experimental(value)),
        }
    }
}

/// Application callback receiving decoded engine notifications
///
/// The handler reference itself is the subscription identity in
/// [`crate::client::ListenerRegistry`]: registering the same `Arc` twice
/// yields one delivery per event, not two.
///
/// Delivery is sequential per event in registration order; handlers should
/// not block for long.
#[async_trait]
pub trait RtcEventHandler: Send + Sync {
    /// Called once per engine notification.
    ///
    /// `payload` is `None` when the inbound payload failed to decode; the
    /// notification stream is never torn down because of one bad payload.
    async fn on_event(&self, kind: EventKind, payload: Option<EventPayload>);
}
