//! Stateless command forwarding
//!
//! Every operation in this module is a pure forward to the engine: no
//! lifecycle dependency, no cross-call ordering, no local validation. Range
//! checking (volume 0-100, watermark coordinates 0-1) is deliberately the
//! engine's responsibility; out-of-range values cross the boundary as-is.
//!
//! Each typed method marshals its arguments through the codec and crosses
//! the boundary as one named [`WireCall`]. Calls resolve with no value, with
//! an engine-produced value (volumes, version, recording result code), or
//! reject with whatever diagnostic the engine supplied.

use serde_json::{json, Value};

use crate::client::types::{
    AudioQuality, AudioRecordingParams, GSensorMode, LogLevel, NetworkQosParams,
    PublishCdnParams, TranscodingConfig, VideoEncoderParams, VideoRotation, VideoStreamType,
};
use crate::engine::WireCall;
use crate::error::{ClientError, ClientResult};

impl super::manager::RtcClient {
    pub(crate) async fn forward(&self, method: &'static str, args: Value) -> ClientResult<Value> {
        tracing::debug!(method, "forwarding engine command");
        self.engine
            .command(WireCall::new(method, args))
            .await
            .map_err(Into::into)
    }

    pub(crate) async fn forward_unit(&self, method: &'static str, args: Value) -> ClientResult<()> {
        self.forward(method, args).await.map(|_| ())
    }

    async fn forward_i32(&self, method: &'static str, args: Value) -> ClientResult<i32> {
        let value = self.forward(method, args).await?;
        value
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| {
                ClientError::internal(format!(
                    "engine returned a non-i32 value for {}: {}",
                    method, value
                ))
            })
    }

    // ===== STREAM RECEPTION =====

    /// Set the audio/video auto-reception mode.
    ///
    /// Effective only when set before entering a room.
    pub async fn set_default_stream_recv_mode(
        &self,
        auto_recv_audio: bool,
        auto_recv_video: bool,
    ) -> ClientResult<()> {
        self.forward_unit(
            "setDefaultStreamRecvMode",
            json!({ "autoRecvAudio": auto_recv_audio, "autoRecvVideo": auto_recv_video }),
        )
        .await
    }

    // ===== VIDEO =====

    /// Image pushed in place of local video while it is muted. An empty URL
    /// pushes nothing; `fps` is clamped by the engine to 5-20.
    pub async fn set_video_mute_image(&self, image_url: &str, fps: i32) -> ClientResult<()> {
        self.forward_unit(
            "setVideoMuteImage",
            json!({ "imageUrl": image_url, "fps": fps }),
        )
        .await
    }

    /// Place a watermark on one encoded stream.
    ///
    /// `x`, `y`, and `width` are normalized 0-1 coordinates relative to the
    /// encoded resolution; the engine derives the height from the image's
    /// aspect ratio. Call once per stream type to watermark both the main
    /// and the auxiliary stream.
    pub async fn set_watermark(
        &self,
        image_url: &str,
        stream_type: VideoStreamType,
        x: f64,
        y: f64,
        width: f64,
    ) -> ClientResult<()> {
        let args = self.codec.encode_watermark(image_url, stream_type, x, y, width);
        self.forward_unit("setWatermark", args).await
    }

    /// Set video encoder parameters, which determine what remote viewers
    /// see and what cloud recording stores.
    pub async fn set_video_encoder_param(&self, params: &VideoEncoderParams) -> ClientResult<()> {
        let args = self.codec.encode_config(params)?;
        self.forward_unit("setVideoEncoderParam", args).await
    }

    /// Set network flow-control preferences (clarity vs smoothness under a
    /// weak network).
    pub async fn set_network_qos_param(&self, params: &NetworkQosParams) -> ClientResult<()> {
        let args = self.codec.encode_config(params)?;
        self.forward_unit("setNetworkQosParam", args).await
    }

    /// Rotation applied to the encoder output
    pub async fn set_video_encoder_rotation(&self, rotation: VideoRotation) -> ClientResult<()> {
        self.forward_unit(
            "setVideoEncoderRotation",
            json!({ "rotation": rotation.as_i32() }),
        )
        .await
    }

    /// Mirror mode of the encoder output; does not affect local preview
    pub async fn set_video_encoder_mirror(&self, mirror: bool) -> ClientResult<()> {
        self.forward_unit("setVideoEncoderMirror", json!({ "mirror": mirror }))
            .await
    }

    /// Gravity-sensor adaptation mode
    pub async fn set_gsensor_mode(&self, mode: GSensorMode) -> ClientResult<()> {
        self.forward_unit("setGSensorMode", json!({ "mode": mode.as_i32() }))
            .await
    }

    /// Pause or resume pushing local video
    pub async fn mute_local_video(&self, mute: bool) -> ClientResult<()> {
        self.forward_unit("muteLocalVideo", json!({ "mute": mute })).await
    }

    /// Pause or resume receiving one remote user's video.
    ///
    /// Display resources are kept; the picture freezes on the last frame.
    /// Reset to unmuted by the engine when the room is exited.
    pub async fn mute_remote_video_stream(&self, user_id: &str, mute: bool) -> ClientResult<()> {
        self.forward_unit(
            "muteRemoteVideoStream",
            json!({ "userId": user_id, "mute": mute }),
        )
        .await
    }

    /// Pause or resume receiving all remote video
    pub async fn mute_all_remote_video_streams(&self, mute: bool) -> ClientResult<()> {
        self.forward_unit("muteAllRemoteVideoStreams", json!({ "mute": mute }))
            .await
    }

    // ===== CDN PUBLISHING =====

    /// Start publishing to the platform's live CDN under the given stream id
    pub async fn start_publishing(
        &self,
        stream_id: &str,
        stream_type: VideoStreamType,
    ) -> ClientResult<()> {
        self.forward_unit(
            "startPublishing",
            json!({ "streamId": stream_id, "streamType": stream_type.as_i32() }),
        )
        .await
    }

    /// Stop publishing to the platform's live CDN
    pub async fn stop_publishing(&self) -> ClientResult<()> {
        self.forward_unit("stopPublishing", json!({})).await
    }

    /// Start relaying to a third-party CDN
    pub async fn start_publish_cdn_stream(&self, params: &PublishCdnParams) -> ClientResult<()> {
        let args = self.codec.encode_config(params)?;
        self.forward_unit("startPublishCDNStream", args).await
    }

    /// Stop relaying to the third-party CDN
    pub async fn stop_publish_cdn_stream(&self) -> ClientResult<()> {
        self.forward_unit("stopPublishCDNStream", json!({})).await
    }

    /// Set cloud mix-transcoding parameters; `None` cancels transcoding.
    ///
    /// The result arrives as a
    /// [`crate::events::EventKind::TranscodingConfigured`] notification.
    pub async fn set_mix_transcoding_config(
        &self,
        config: Option<&TranscodingConfig>,
    ) -> ClientResult<()> {
        let args = match config {
            Some(config) => self.codec.encode_config(config)?,
            None => json!({ "config": Value::Null }),
        };
        self.forward_unit("setMixTranscodingConfig", args).await
    }

    // ===== AUDIO =====

    /// Start local audio capture and publishing at the given quality.
    ///
    /// The engine does not capture by default; without this call other
    /// users hear nothing.
    pub async fn start_local_audio(&self, quality: AudioQuality) -> ClientResult<()> {
        self.forward_unit("startLocalAudio", json!({ "quality": quality.as_i32() }))
            .await
    }

    /// Stop local audio capture and publishing
    pub async fn stop_local_audio(&self) -> ClientResult<()> {
        self.forward_unit("stopLocalAudio", json!({})).await
    }

    /// Mute or unmute local audio.
    ///
    /// Unlike stopping capture, muting keeps sending minimal silence
    /// packets, which keeps recorded files timeline-continuous.
    pub async fn mute_local_audio(&self, mute: bool) -> ClientResult<()> {
        self.forward_unit("muteLocalAudio", json!({ "mute": mute })).await
    }

    /// Mute or unmute one remote user
    pub async fn mute_remote_audio(&self, user_id: &str, mute: bool) -> ClientResult<()> {
        self.forward_unit(
            "muteRemoteAudio",
            json!({ "userId": user_id, "mute": mute }),
        )
        .await
    }

    /// Mute or unmute all remote users.
    ///
    /// The engine resets this flag when the room is exited.
    pub async fn mute_all_remote_audio(&self, mute: bool) -> ClientResult<()> {
        self.forward_unit("muteAllRemoteAudio", json!({ "mute": mute }))
            .await
    }

    /// Playback volume for one remote user, 0-100
    pub async fn set_remote_audio_volume(&self, user_id: &str, volume: i32) -> ClientResult<()> {
        self.forward_unit(
            "setRemoteAudioVolume",
            json!({ "userId": user_id, "volume": volume }),
        )
        .await
    }

    /// Capture volume, 0-100
    pub async fn set_audio_capture_volume(&self, volume: i32) -> ClientResult<()> {
        self.forward_unit("setAudioCaptureVolume", json!({ "volume": volume }))
            .await
    }

    /// Current capture volume
    pub async fn get_audio_capture_volume(&self) -> ClientResult<i32> {
        self.forward_i32("getAudioCaptureVolume", json!({})).await
    }

    /// Playout volume, 0-100
    pub async fn set_audio_playout_volume(&self, volume: i32) -> ClientResult<()> {
        self.forward_unit("setAudioPlayoutVolume", json!({ "volume": volume }))
            .await
    }

    /// Current playout volume
    pub async fn get_audio_playout_volume(&self) -> ClientResult<i32> {
        self.forward_i32("getAudioPlayoutVolume", json!({})).await
    }

    /// Enable periodic volume evaluation notifications
    /// ([`crate::events::EventKind::UserVoiceVolume`]); an interval of zero
    /// or less disables them.
    pub async fn enable_audio_volume_evaluation(&self, interval_ms: i32) -> ClientResult<()> {
        self.forward_unit(
            "enableAudioVolumeEvaluation",
            json!({ "intervalMs": interval_ms }),
        )
        .await
    }

    // ===== RECORDING =====

    /// Start recording all call audio to a file.
    ///
    /// Returns the engine's result code: 0 on success, negative codes for
    /// already-recording, unwritable path, or unsupported format. Recording
    /// stops automatically when the room is exited.
    pub async fn start_audio_recording(
        &self,
        params: &AudioRecordingParams,
    ) -> ClientResult<i32> {
        let args = json!({ "param": serde_json::to_value(params)
            .map_err(|e| ClientError::serialization(e.to_string()))? });
        self.forward_i32("startAudioRecording", args).await
    }

    /// Stop the audio recording
    pub async fn stop_audio_recording(&self) -> ClientResult<()> {
        self.forward_unit("stopAudioRecording", json!({})).await
    }

    // ===== DIAGNOSTICS =====

    /// Start a server speed test; results arrive as
    /// [`crate::events::EventKind::SpeedTest`] notifications. Not intended
    /// to run during a call.
    pub async fn start_speed_test(
        &self,
        sdk_app_id: u32,
        user_id: &str,
        user_sig: &str,
    ) -> ClientResult<()> {
        self.forward_unit(
            "startSpeedTest",
            json!({ "sdkAppId": sdk_app_id, "userId": user_id, "userSig": user_sig }),
        )
        .await
    }

    /// Stop the server speed test
    pub async fn stop_speed_test(&self) -> ClientResult<()> {
        self.forward_unit("stopSpeedTest", json!({})).await
    }

    /// Engine SDK version string
    pub async fn sdk_version(&self) -> ClientResult<String> {
        let value = self.forward("getSDKVersion", json!({})).await?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| ClientError::internal("engine returned a non-string SDK version"))
    }

    // ===== ENGINE LOGGING (pass-through) =====

    /// Engine log verbosity
    pub async fn set_log_level(&self, level: LogLevel) -> ClientResult<()> {
        self.forward_unit("setLogLevel", json!({ "level": level.as_i32() }))
            .await
    }

    /// Engine console log output
    pub async fn set_console_enabled(&self, enabled: bool) -> ClientResult<()> {
        self.forward_unit("setConsoleEnabled", json!({ "enabled": enabled }))
            .await
    }

    /// Engine on-disk log compression
    pub async fn set_log_compress_enabled(&self, enabled: bool) -> ClientResult<()> {
        self.forward_unit("setLogCompressEnabled", json!({ "enabled": enabled }))
            .await
    }

    /// Engine log directory; the directory must exist and be writable
    pub async fn set_log_dir_path(&self, path: &str) -> ClientResult<()> {
        self.forward_unit("setLogDirPath", json!({ "path": path })).await
    }

    // ===== ESCAPE HATCH =====

    /// Invoke an experimental engine API described by a JSON string,
    /// forwarded verbatim.
    pub async fn call_experimental_api(&self, json_str: &str) -> ClientResult<()> {
        self.forward_unit("callExperimentalAPI", json!({ "jsonStr": json_str }))
            .await
    }
}
