//! Feature sub-managers
//!
//! The engine groups audio-effect, beauty, and device control behind
//! separately acquired manager objects. The wrappers here are thin handles:
//! each factory announces the acquisition to the engine with a one-shot
//! call, then hands back a passthrough that forwards method invocations on
//! that manager's behalf. The handles clone the underlying engine binding,
//! so they stay usable independently of the client that created them.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::engine::{EngineBinding, WireCall};
use crate::error::ClientResult;

macro_rules! engine_manager {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            engine: Arc<dyn EngineBinding>,
        }

        impl $name {
            pub(crate) fn new(engine: Arc<dyn EngineBinding>) -> Self {
                Self { engine }
            }

            /// Invoke a method on this manager, forwarding the arguments
            /// verbatim.
            pub async fn invoke(&self, method: &'static str, args: Value) -> ClientResult<Value> {
                tracing::debug!(manager = stringify!($name), method, "forwarding manager command");
                self.engine
                    .command(WireCall::new(method, args))
                    .await
                    .map_err(Into::into)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

engine_manager! {
    /// Background music, sound effects, and voice changing
    AudioEffectManager
}

engine_manager! {
    /// Beauty filters and image adjustment
    BeautyManager
}

engine_manager! {
    /// Camera, microphone, and speaker selection
    DeviceManager
}

impl super::manager::RtcClient {
    /// Acquire the audio effect manager.
    pub async fn audio_effect_manager(&self) -> ClientResult<AudioEffectManager> {
        self.forward_unit("getAudioEffectManager", json!({})).await?;
        Ok(AudioEffectManager::new(Arc::clone(&self.engine)))
    }

    /// Acquire the beauty filter manager.
    pub async fn beauty_manager(&self) -> ClientResult<BeautyManager> {
        self.forward_unit("getBeautyManager", json!({})).await?;
        Ok(BeautyManager::new(Arc::clone(&self.engine)))
    }

    /// Acquire the device manager.
    pub async fn device_manager(&self) -> ClientResult<DeviceManager> {
        self.forward_unit("getDeviceManager", json!({})).await?;
        Ok(DeviceManager::new(Arc::clone(&self.engine)))
    }
}
