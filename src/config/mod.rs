//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - Programmatic overrides

use anyhow::{Context, Result};
use enumflags2::BitFlags;
use serde::{Deserialize, Serialize};

use crate::protocol::EntityKind;

pub mod types;

pub use types::{InputConfig, LoggingConfig, ObjectMapping, TransportConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Transport configuration
    #[serde(default)]
    pub transport: TransportConfig,
    /// Input bridging configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.transport.port == 0 {
            anyhow::bail!("Invalid TUIO port: 0");
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        Ok(())
    }

    /// Override config with caller-supplied values
    pub fn with_overrides(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.transport.port = port;
        }

        self
    }

    /// Build the enabled entity-kind bitmask from the input flags
    ///
    /// # Mapping
    ///
    /// | Input Config | Entity Kind |
    /// |--------------|-------------|
    /// | input.enable_cursors | Cursors |
    /// | input.enable_blobs | Blobs |
    /// | input.enable_objects | Objects |
    pub fn enabled_kinds(&self) -> BitFlags<EntityKind> {
        let mut kinds = BitFlags::empty();
        if self.input.enable_cursors {
            kinds |= EntityKind::Cursors;
        }
        if self.input.enable_blobs {
            kinds |= EntityKind::Blobs;
        }
        if self.input.enable_objects {
            kinds |= EntityKind::Objects;
        }
        kinds
    }
}
