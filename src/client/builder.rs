//! Client builder for creating RTC clients
//!
//! Fluent construction of an [`RtcClient`] over a concrete engine binding.
//! The builder pattern keeps configuration readable while the one required
//! input, the engine binding, stays explicit: the engine is a process-wide
//! resource modeled as a value passed in by reference, so tests can hand in
//! independent mock engines instead of fighting a global.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rtc_client_core::{ClientBuilder, PlatformVariant};
//! use rtc_client_core::client::types::LogLevel;
//! # use rtc_client_core::engine::EngineBinding;
//! # async fn example(engine: Arc<dyn EngineBinding>) -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new()
//!     .engine(engine)
//!     .platform_variant(PlatformVariant::Textual)
//!     .log_level(LogLevel::Warn)
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::client::config::ClientConfig;
use crate::client::manager::RtcClient;
use crate::client::types::LogLevel;
use crate::codec::PlatformVariant;
use crate::engine::EngineBinding;
use crate::error::{ClientError, ClientResult};

/// Fluent builder for [`RtcClient`]
pub struct ClientBuilder {
    config: ClientConfig,
    engine: Option<Arc<dyn EngineBinding>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::new(),
            engine: None,
        }
    }

    /// The engine binding to bridge to (required)
    pub fn engine(mut self, engine: Arc<dyn EngineBinding>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Wire dialect of the engine binding
    pub fn platform_variant(mut self, variant: PlatformVariant) -> Self {
        self.config = self.config.with_platform_variant(variant);
        self
    }

    /// Engine log verbosity, forwarded during construction
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config = self.config.with_log_level(level);
        self
    }

    /// Engine console log output, forwarded during construction
    pub fn console_enabled(mut self, enabled: bool) -> Self {
        self.config = self.config.with_console_enabled(enabled);
        self
    }

    /// Engine log compression, forwarded during construction
    pub fn log_compress_enabled(mut self, enabled: bool) -> Self {
        self.config = self.config.with_log_compress_enabled(enabled);
        self
    }

    /// Engine log directory, forwarded during construction
    pub fn log_dir_path(mut self, path: impl Into<String>) -> Self {
        self.config = self.config.with_log_dir_path(path);
        self
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Acquire the shared engine instance and construct the client
    pub async fn build(self) -> ClientResult<Arc<RtcClient>> {
        let engine = self
            .engine
            .ok_or_else(|| ClientError::config("an engine binding is required"))?;
        RtcClient::new(self.config, engine).await
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
