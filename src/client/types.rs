//! Type definitions for the RTC client library
//!
//! This module contains the parameter and configuration value types that
//! cross the engine boundary, plus the small integer-coded enums the engine
//! understands. Every configuration type is a strongly typed structured
//! value; serialization to the engine's wire shape happens solely inside
//! [`crate::codec::ParameterCodec`].
//!
//! # Type Categories
//!
//! - **Room entry** - [`RoomEntryParams`], [`RoomIdentifier`], [`Scene`], [`Role`]
//! - **Config payloads** - [`SwitchRoomConfig`], [`TranscodingConfig`],
//!   [`PublishCdnParams`], [`VideoEncoderParams`], [`NetworkQosParams`],
//!   [`AudioRecordingParams`]
//! - **Engine constants** - [`AudioQuality`], [`VideoStreamType`],
//!   [`LogLevel`], [`GSensorMode`], [`VideoRotation`]
//!
//! # Usage Examples
//!
//! ```rust
//! use rtc_client_core::client::types::{RoomEntryParams, RoomIdentifier, Role};
//!
//! let params = RoomEntryParams::new(1400000001, "alice", "sig-token", RoomIdentifier::Numeric(100))
//!     .with_role(Role::Anchor)
//!     .with_stream_id("alice_stream_001");
//!
//! assert_eq!(params.room, RoomIdentifier::Numeric(100));
//! assert_eq!(params.role, Some(Role::Anchor));
//! ```

use serde::{Deserialize, Serialize};

// ===== ROOM IDENTITY =====

/// Identifier of a room, in numeric or string form
///
/// Exactly one form is ever set, which is what makes the room-entry
/// parameters valid; the engine treats the two forms as distinct namespaces.
/// Serializes to the wire field the engine expects (`roomId` or `strRoomId`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomIdentifier {
    /// Numeric room number
    #[serde(rename = "roomId")]
    Numeric(u32),
    /// String room name
    #[serde(rename = "strRoomId")]
    Text(String),
}

impl std::fmt::Display for RoomIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{}", id),
            Self::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Parameters required to enter a room
///
/// Immutable value supplied in full before any entry transition. The
/// credential fields (`sdk_app_id`, `user_id`, `user_sig`) identify and
/// authenticate the local user against the engine's service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomEntryParams {
    /// Application identifier issued by the engine's service console
    pub sdk_app_id: u32,
    /// Local user identifier
    pub user_id: String,
    /// User credential (signature) for the given `sdk_app_id`/`user_id` pair
    pub user_sig: String,
    /// Target room, numeric or string form
    #[serde(flatten)]
    pub room: RoomIdentifier,
    /// Role to enter with; required for live-broadcast scenes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// CDN stream identifier bound to this user's stream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
    /// Server-side recording identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_define_record_id: Option<String>,
    /// Permission key for restricted rooms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_map_key: Option<String>,
    /// Opaque business metadata forwarded to the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_info: Option<String>,
}

impl RoomEntryParams {
    /// Create entry parameters with the required credential fields
    pub fn new(
        sdk_app_id: u32,
        user_id: impl Into<String>,
        user_sig: impl Into<String>,
        room: RoomIdentifier,
    ) -> Self {
        Self {
            sdk_app_id,
            user_id: user_id.into(),
            user_sig: user_sig.into(),
            room,
            role: None,
            stream_id: None,
            user_define_record_id: None,
            private_map_key: None,
            business_info: None,
        }
    }

    /// Set the role to enter with
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the CDN stream identifier
    pub fn with_stream_id(mut self, stream_id: impl Into<String>) -> Self {
        self.stream_id = Some(stream_id.into());
        self
    }

    /// Set the permission key
    pub fn with_private_map_key(mut self, key: impl Into<String>) -> Self {
        self.private_map_key = Some(key.into());
        self
    }

    /// Set opaque business metadata
    pub fn with_business_info(mut self, info: impl Into<String>) -> Self {
        self.business_info = Some(info.into());
        self
    }
}

// ===== ENGINE CONSTANTS =====

macro_rules! engine_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "i32", try_from = "i32")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// The integer code the engine understands
            pub fn as_i32(&self) -> i32 {
                match self {
                    $( Self::$variant => $value ),+
                }
            }

            /// Resolve an engine code, `None` when unknown.
            ///
            /// Variant resolution lives here rather than in the `TryFrom`
            /// impl, where `Self::Error` would collide with any variant
            /// named `Error`.
            pub fn from_i32(value: i32) -> Option<Self> {
                $( if value == $value {
                    return Some(Self::$variant);
                } )+
                None
            }
        }

        impl From<$name> for i32 {
            fn from(v: $name) -> i32 {
                v.as_i32()
            }
        }

        impl TryFrom<i32> for $name {
            type Error = String;

            fn try_from(value: i32) -> Result<Self, String> {
                $name::from_i32(value)
                    .ok_or_else(|| format!("unknown {} code: {}", stringify!($name), value))
            }
        }
    };
}

engine_enum! {
    /// Application scene a room is entered with
    ///
    /// Live-broadcast scenes ([`Scene::Live`] and [`Scene::VoiceChatRoom`])
    /// require a role in the entry parameters.
    Scene {
        /// Video call, low-latency symmetric
        VideoCall = 0,
        /// Interactive video live broadcast
        Live = 1,
        /// Audio call
        AudioCall = 2,
        /// Interactive voice chat room
        VoiceChatRoom = 3,
    }
}

engine_enum! {
    /// Role of the local user in a live-broadcast scene
    Role {
        /// Can publish audio and video upstream
        Anchor = 20,
        /// Watch-only
        Audience = 21,
    }
}

engine_enum! {
    /// Capture quality for local audio
    AudioQuality {
        /// 16k mono, speech-optimized
        Speech = 1,
        /// 48k mono, engine default
        Default = 2,
        /// 48k stereo full-band, music-grade
        Music = 3,
    }
}

engine_enum! {
    /// Which video stream a per-stream operation targets
    VideoStreamType {
        /// Main (camera) stream
        Big = 0,
        /// Low-resolution substream of the main stream
        Small = 1,
        /// Auxiliary stream, typically screen sharing
        Sub = 2,
    }
}

engine_enum! {
    /// Engine log verbosity, pass-through configuration
    LogLevel {
        Verbose = 0,
        Debug = 1,
        Info = 2,
        Warn = 3,
        Error = 4,
        Fatal = 5,
        None = 6,
    }
}

engine_enum! {
    /// Gravity-sensor adaptation mode
    GSensorMode {
        Disable = 0,
        UiAutoLayout = 1,
        UiFixLayout = 2,
    }
}

engine_enum! {
    /// Encoder output rotation
    VideoRotation {
        Rotation0 = 0,
        Rotation180 = 2,
    }
}

// ===== CONFIG PAYLOADS =====

/// Target room for a switch without tearing down local capture
///
/// Crossing the boundary this is one of the payloads that is serialized to
/// canonical text alongside its structured form (see
/// [`crate::codec::ParameterCodec::encode_config`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchRoomConfig {
    /// Fresh credential for the target room, when the service requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_sig: Option<String>,
    /// Room to move to
    #[serde(flatten)]
    pub room: RoomIdentifier,
    /// Permission key for the target room
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_map_key: Option<String>,
}

impl SwitchRoomConfig {
    /// Switch config targeting the given room
    pub fn new(room: RoomIdentifier) -> Self {
        Self {
            user_sig: None,
            room,
            private_map_key: None,
        }
    }

    /// Set a fresh credential for the target room
    pub fn with_user_sig(mut self, user_sig: impl Into<String>) -> Self {
        self.user_sig = Some(user_sig.into());
        self
    }
}

/// Parameters for relaying to a third-party CDN
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishCdnParams {
    /// CDN vendor application id
    pub app_id: u32,
    /// CDN vendor business id
    pub biz_id: u32,
    /// Push URL at the target CDN
    pub url: String,
}

/// One participant's placement in a mixed-transcoding canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixUser {
    /// User whose stream is mixed
    pub user_id: String,
    /// Room the user publishes from, when mixing across rooms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    /// Horizontal offset on the canvas, pixels
    pub x: i32,
    /// Vertical offset on the canvas, pixels
    pub y: i32,
    /// Width on the canvas, pixels
    pub width: i32,
    /// Height on the canvas, pixels
    pub height: i32,
    /// Layer order; higher draws on top
    pub z_order: i32,
    /// Which of the user's streams is mixed
    pub stream_type: VideoStreamType,
    /// Mix only the user's audio
    #[serde(default)]
    pub pure_audio: bool,
}

/// Cloud mixing/transcoding configuration
///
/// Passing `None` to
/// [`crate::client::RtcClient::set_mix_transcoding_config`] cancels cloud
/// transcoding; this type describes an active configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscodingConfig {
    /// Mixing mode, engine-defined constant
    pub mode: i32,
    /// Output canvas width, pixels
    pub video_width: i32,
    /// Output canvas height, pixels
    pub video_height: i32,
    /// Output video bitrate, kbps
    pub video_bitrate: i32,
    /// Output frame rate
    pub video_framerate: i32,
    /// Output GOP length, seconds
    pub video_gop: i32,
    /// Output audio sample rate, Hz
    pub audio_sample_rate: i32,
    /// Output audio bitrate, kbps
    pub audio_bitrate: i32,
    /// Output audio channel count
    pub audio_channels: i32,
    /// Participants placed on the canvas
    pub mix_users: Vec<MixUser>,
    /// Stream id the mixed output publishes under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
    /// Background color of the canvas, `0xRRGGBB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<i32>,
    /// Background image of the canvas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

/// Video encoder parameters
///
/// Determines what remote viewers see and what cloud recording stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEncoderParams {
    /// Resolution, engine-defined constant
    pub video_resolution: i32,
    /// Landscape or portrait resolution mode, engine-defined constant
    pub video_resolution_mode: i32,
    /// Capture/encode frame rate
    pub video_fps: i32,
    /// Target bitrate, kbps
    pub video_bitrate: i32,
    /// Lowest bitrate the adaptive controller may fall to, kbps
    #[serde(default)]
    pub min_video_bitrate: i32,
    /// Allow the engine to drop resolution under constrained bandwidth
    #[serde(default)]
    pub enable_adjust_res: bool,
}

/// Network flow-control preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkQosParams {
    /// Clarity-vs-smoothness preference under a weak network
    pub preference: i32,
    /// Where flow control runs, engine-defined constant
    pub control_mode: i32,
}

/// Audio recording parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRecordingParams {
    /// Destination file path; the suffix selects the container format
    pub file_path: String,
}

impl AudioRecordingParams {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_identifier_serializes_to_wire_field() {
        let numeric = serde_json::to_value(RoomIdentifier::Numeric(100)).unwrap();
        assert_eq!(numeric, serde_json::json!({ "roomId": 100 }));

        let text = serde_json::to_value(RoomIdentifier::Text("lobby".into())).unwrap();
        assert_eq!(text, serde_json::json!({ "strRoomId": "lobby" }));
    }

    #[test]
    fn entry_params_flatten_room_identifier() {
        let params = RoomEntryParams::new(1, "u1", "sig", RoomIdentifier::Numeric(100))
            .with_role(Role::Audience);
        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(value["sdkAppId"], 1);
        assert_eq!(value["roomId"], 100);
        assert_eq!(value["role"], 21);
        assert!(value.get("strRoomId").is_none());
        assert!(value.get("streamId").is_none());
    }

    #[test]
    fn engine_enums_round_trip_through_codes() {
        assert_eq!(Scene::try_from(Scene::Live.as_i32()), Ok(Scene::Live));
        assert_eq!(Role::try_from(20), Ok(Role::Anchor));
        assert!(Role::try_from(99).is_err());

        let json = serde_json::to_value(AudioQuality::Music).unwrap();
        assert_eq!(json, serde_json::json!(3));
        let back: AudioQuality = serde_json::from_value(json).unwrap();
        assert_eq!(back, AudioQuality::Music);
    }

    #[test]
    fn log_level_error_variant_resolves_from_its_code() {
        // `LogLevel` has a variant named `Error`, the one name that can
        // collide with `TryFrom::Error` inside a conversion impl.
        assert_eq!(LogLevel::from_i32(4), Some(LogLevel::Error));
        assert_eq!(LogLevel::try_from(4), Ok(LogLevel::Error));
        assert!(LogLevel::from_i32(42).is_none());

        let back: LogLevel = serde_json::from_value(serde_json::json!(4)).unwrap();
        assert_eq!(back, LogLevel::Error);
    }
}
