//! Parameter marshalling for the engine boundary
//!
//! Platform variants of the engine binding diverge in two ways: one accepts
//! room identifiers only as text and requires numeric identifiers to be
//! stringified before the call, and it delivers event payloads as encoded
//! text; the other accepts and delivers structured values unchanged. The
//! codec collapses those per-call-site branches into a single strategy
//! selected once at construction, so the rest of the core is written against
//! one canonical structured representation.
//!
//! Outbound configuration objects that must cross as canonical text (switch
//! room, publish-CDN, mix transcoding, encoder and QoS parameters) are
//! emitted with the serialized text alongside the structured value, which
//! keeps one wire shape compatible with both variants.
//!
//! Inbound decode failures are deliberately not errors: a malformed payload
//! is logged and yields `None`, and the event is still delivered (see
//! [`crate::client::ListenerRegistry`]).

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::types::{RoomEntryParams, Scene, VideoStreamType};
use crate::engine::{EventEnvelope, RawPayload};
use crate::error::{ClientError, ClientResult};
use crate::events::EventPayload;

/// Which wire dialect the underlying engine binding speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformVariant {
    /// Structured values cross the boundary unchanged
    #[default]
    Structured,
    /// Numeric room identifiers are stringified outbound; inbound event
    /// payloads arrive as encoded text
    Textual,
}

/// Normalizes outbound parameters and decodes inbound event payloads
///
/// Cheap to clone; holds only the variant choice.
#[derive(Debug, Clone)]
pub struct ParameterCodec {
    variant: PlatformVariant,
}

impl ParameterCodec {
    pub fn new(variant: PlatformVariant) -> Self {
        Self { variant }
    }

    /// The variant this codec was constructed for
    pub fn variant(&self) -> PlatformVariant {
        self.variant
    }

    // ===== OUTBOUND =====

    /// Normalize room-entry parameters into the shape the binding expects.
    ///
    /// On the textual variant the numeric room identifier crosses as a
    /// decimal string and the scene is folded into the argument object; on
    /// the structured variant the parameters pass through unchanged (the
    /// scene crosses as the separate verb argument either way).
    pub fn encode_enter_room(&self, params: &RoomEntryParams, scene: Scene) -> ClientResult<Value> {
        let mut value = to_value(params)?;
        if self.variant == PlatformVariant::Textual {
            if let Some(object) = value.as_object_mut() {
                if let Some(room_id) = object.get("roomId").and_then(Value::as_u64) {
                    object.insert("roomId".into(), Value::String(room_id.to_string()));
                }
                object.insert("scene".into(), json!(scene.as_i32()));
            }
        }
        Ok(value)
    }

    /// Encode a configuration payload for the boundary.
    ///
    /// Emits `{ "config": <canonical text>, "structured": <value> }`: the
    /// text form is required by the textual variant, the structured field
    /// keeps the same call valid on the other.
    pub fn encode_config<T: Serialize>(&self, config: &T) -> ClientResult<Value> {
        let structured = to_value(config)?;
        let text = serde_json::to_string(&structured)
            .map_err(|e| ClientError::serialization(e.to_string()))?;
        Ok(json!({
            "config": text,
            "structured": structured,
        }))
    }

    /// Encode a watermark placement.
    ///
    /// The normalized rect coordinates cross as decimal strings on both
    /// variants; that is the binding's wire contract, not a variant quirk.
    pub fn encode_watermark(
        &self,
        image_url: &str,
        stream_type: VideoStreamType,
        x: f64,
        y: f64,
        width: f64,
    ) -> Value {
        json!({
            "imageUrl": image_url,
            "streamType": stream_type.as_i32(),
            "x": x.to_string(),
            "y": y.to_string(),
            "width": width.to_string(),
        })
    }

    // ===== INBOUND =====

    /// Decode an envelope's payload to a structured value.
    ///
    /// Encoded text is parsed; structured payloads pass through unchanged.
    /// Malformed text is logged and yields `None` rather than an error, so
    /// the notification stream survives one bad payload.
    pub fn decode_envelope(&self, envelope: &EventEnvelope) -> Option<Value> {
        match &envelope.payload {
            RawPayload::Structured(value) => Some(value.clone()),
            RawPayload::Text(text) => match serde_json::from_str(text) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(
                        kind = ?envelope.kind,
                        error = %err,
                        "failed to decode inbound event payload"
                    );
                    None
                }
            },
        }
    }

    /// Decode an envelope into the typed payload union.
    ///
    /// Any failure, at either the text or the schema level, is `None`.
    pub fn decode_event(&self, envelope: &EventEnvelope) -> Option<EventPayload> {
        let value = self.decode_envelope(envelope)?;
        let decoded = EventPayload::decode(envelope.kind, value);
        if decoded.is_none() {
            tracing::warn!(
                kind = ?envelope.kind,
                "inbound event payload did not match the expected schema"
            );
        }
        decoded
    }
}

fn to_value<T: Serialize>(value: &T) -> ClientResult<Value> {
    serde_json::to_value(value).map_err(|e| ClientError::serialization(e.to_string()))
}
