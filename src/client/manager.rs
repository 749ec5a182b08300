//! High-level RTC client that coordinates all bridge operations
//!
//! The [`RtcClient`] is the primary entry point: it owns the session state
//! machine, the parameter codec, and the listener registry, and holds the
//! one reference to the engine binding every operation crosses through.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Application Layer     │
//! └───────────┬─────────────┘
//!             │
//! ┌───────────▼─────────────┐
//! │       RtcClient         │ ◄── This Layer
//! │ ┌─────────────────────┐ │
//! │ │ Session lifecycle   │ │  • enter/exit/switch serialization
//! │ │ Command forwarding  │ │  • codec-normalized parameters
//! │ │ Listener registry   │ │  • decode-and-forward events
//! │ └─────────────────────┘ │
//! └───────────┬─────────────┘
//!             │
//! ┌───────────▼─────────────┐
//! │     EngineBinding       │
//! │  (external engine)      │
//! └─────────────────────────┘
//! ```
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rtc_client_core::{ClientBuilder, RoomEntryParams, RoomIdentifier, Scene};
//! # use rtc_client_core::engine::EngineBinding;
//! # async fn example(engine: Arc<dyn EngineBinding>) -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new().engine(engine).build().await?;
//!
//! let params = RoomEntryParams::new(1400000001, "alice", "sig", RoomIdentifier::Numeric(100));
//! let result = client.enter_room(params, Scene::VideoCall).await?;
//! if result >= 0 {
//!     println!("entered in {} ms", result);
//! } else {
//!     println!("entry refused with code {}", result);
//! }
//!
//! client.exit_room().await?;
//! client.destroy().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::config::ClientConfig;
use crate::client::registry::{ListenerHandle, ListenerRegistry};
use crate::codec::ParameterCodec;
use crate::engine::EngineBinding;
use crate::error::ClientResult;
use crate::events::RtcEventHandler;
use crate::session::{Session, SessionState};

/// Bridge between application code and a real-time audio/video engine
///
/// One client corresponds to one acquisition of the shared engine instance.
/// The session is mutated exclusively by the lifecycle operations in
/// [`crate::client::lifecycle`]; everything else is stateless forwarding.
pub struct RtcClient {
    pub(crate) engine: Arc<dyn EngineBinding>,
    pub(crate) codec: ParameterCodec,
    pub(crate) registry: ListenerRegistry,
    pub(crate) session: RwLock<Session>,
    pub(crate) config: ClientConfig,
}

impl RtcClient {
    /// Acquire the shared engine instance and construct a client over it.
    ///
    /// Engine log configuration present in `config` is forwarded before the
    /// client is handed out, matching the binding's requirement that the log
    /// directory be set ahead of other calls.
    pub async fn new(
        config: ClientConfig,
        engine: Arc<dyn EngineBinding>,
    ) -> ClientResult<Arc<Self>> {
        engine.acquire().await?;
        tracing::info!(variant = ?config.platform_variant, "acquired shared engine instance");

        let codec = ParameterCodec::new(config.platform_variant);
        let registry = ListenerRegistry::new(codec.clone());
        registry.attach(engine.notifications());

        let client = Arc::new(Self {
            engine,
            codec,
            registry,
            session: RwLock::new(Session::new()),
            config,
        });
        client.apply_log_config().await?;
        Ok(client)
    }

    /// Tear the client down: drop every subscription, stop the event pump,
    /// and release the shared engine instance.
    pub async fn destroy(&self) -> ClientResult<()> {
        self.registry.unregister_all();
        self.registry.shutdown();
        self.engine.release().await?;
        tracing::info!("released shared engine instance");
        Ok(())
    }

    // ===== SESSION ACCESS =====

    /// Snapshot of the current session
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Current lifecycle state
    pub async fn state(&self) -> SessionState {
        self.session.read().await.state
    }

    // ===== LISTENERS =====

    /// Subscribe a handler to engine notifications.
    ///
    /// Registering the same handler identity twice returns a handle to the
    /// existing subscription; events are never delivered twice to one
    /// identity. Delegates to [`ListenerRegistry::register`].
    pub fn register_listener(&self, handler: Arc<dyn RtcEventHandler>) -> ListenerHandle {
        self.registry.register(handler)
    }

    /// Remove the subscription for this handler identity; no-op if absent
    pub fn unregister_listener(&self, handler: &Arc<dyn RtcEventHandler>) {
        self.registry.unregister(handler)
    }

    /// Remove every subscription made through this client
    pub fn unregister_all_listeners(&self) {
        self.registry.unregister_all()
    }

    // ===== INTERNAL =====

    async fn apply_log_config(&self) -> ClientResult<()> {
        // Path first: the binding requires it before other calls.
        if let Some(path) = self.config.log_dir_path.clone() {
            self.set_log_dir_path(&path).await?;
        }
        if let Some(level) = self.config.log_level {
            self.set_log_level(level).await?;
        }
        if let Some(enabled) = self.config.console_enabled {
            self.set_console_enabled(enabled).await?;
        }
        if let Some(enabled) = self.config.log_compress_enabled {
            self.set_log_compress_enabled(enabled).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for RtcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtcClient")
            .field("codec", &self.codec)
            .field("config", &self.config)
            .field("listeners", &self.registry.len())
            .finish()
    }
}
