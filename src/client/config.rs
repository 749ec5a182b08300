//! Client configuration structures
//!
//! Configuration is deliberately small: the one decision the core itself
//! consumes is which wire dialect the engine binding speaks (the
//! [`PlatformVariant`] handed to the codec). Everything else here is
//! pass-through engine logging configuration, forwarded verbatim during
//! construction; the core owns no log files of its own.
//!
//! # Usage Examples
//!
//! ```rust
//! use rtc_client_core::client::config::ClientConfig;
//! use rtc_client_core::codec::PlatformVariant;
//! use rtc_client_core::client::types::LogLevel;
//!
//! let config = ClientConfig::new()
//!     .with_platform_variant(PlatformVariant::Textual)
//!     .with_log_level(LogLevel::Warn)
//!     .with_console_enabled(false);
//!
//! assert_eq!(config.platform_variant, PlatformVariant::Textual);
//! assert_eq!(config.log_level, Some(LogLevel::Warn));
//! ```

use crate::client::types::LogLevel;
use crate::codec::PlatformVariant;

/// Configuration for an RTC client
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Wire dialect of the engine binding; selects the codec strategy once
    pub platform_variant: PlatformVariant,
    /// Engine log verbosity, forwarded on construction when set
    pub log_level: Option<LogLevel>,
    /// Enable the engine's console log output
    pub console_enabled: Option<bool>,
    /// Enable the engine's on-disk log compression
    pub log_compress_enabled: Option<bool>,
    /// Engine log directory; must exist and be writable before any call
    pub log_dir_path: Option<String>,
}

impl ClientConfig {
    /// Create a default configuration (structured variant, engine log
    /// settings untouched)
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the engine binding's wire dialect
    pub fn with_platform_variant(mut self, variant: PlatformVariant) -> Self {
        self.platform_variant = variant;
        self
    }

    /// Forward an engine log level on construction
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Forward console log enablement on construction
    pub fn with_console_enabled(mut self, enabled: bool) -> Self {
        self.console_enabled = Some(enabled);
        self
    }

    /// Forward log compression enablement on construction
    pub fn with_log_compress_enabled(mut self, enabled: bool) -> Self {
        self.log_compress_enabled = Some(enabled);
        self
    }

    /// Forward a log directory path on construction
    pub fn with_log_dir_path(mut self, path: impl Into<String>) -> Self {
        self.log_dir_path = Some(path.into());
        self
    }
}
