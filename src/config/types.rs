//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Network transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// UDP port the TUIO listener binds to
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

fn default_port() -> u16 {
    3333
}

/// Input bridging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Process cursor (bare touch point) entities
    #[serde(default = "default_true")]
    pub enable_cursors: bool,

    /// Process blob (shaped touch region) entities
    #[serde(default = "default_true")]
    pub enable_blobs: bool,

    /// Process object (tagged fiducial marker) entities
    #[serde(default = "default_true")]
    pub enable_objects: bool,

    /// Tags applied to every cursor-driven touch session
    #[serde(default = "default_cursor_tags")]
    pub cursor_tags: Vec<String>,

    /// Tags applied to every blob-driven touch session
    #[serde(default = "default_blob_tags")]
    pub blob_tags: Vec<String>,

    /// Tags applied to every object-driven touch session
    #[serde(default = "default_object_tags")]
    pub object_tags: Vec<String>,

    /// Ordered class-id → tag table for fiducial objects.
    /// Lookup is by id; the first matching entry wins.
    #[serde(default)]
    pub object_mappings: Vec<ObjectMapping>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            enable_cursors: true,
            enable_blobs: true,
            enable_objects: true,
            cursor_tags: default_cursor_tags(),
            blob_tags: default_blob_tags(),
            object_tags: default_object_tags(),
            object_mappings: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cursor_tags() -> Vec<String> {
    vec!["TUIO".to_string(), "Touch".to_string()]
}

fn default_blob_tags() -> Vec<String> {
    vec!["TUIO".to_string(), "Blob".to_string()]
}

fn default_object_tags() -> Vec<String> {
    vec!["TUIO".to_string(), "Object".to_string()]
}

/// One entry of the object class-id → tag table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMapping {
    /// Fiducial marker class id reported by the protocol
    pub id: i32,

    /// Tag appended to touch sessions driven by markers of this class
    pub tag: String,
}

/// Logging configuration
///
/// The library itself only emits `tracing` events; the host owns the
/// subscriber and reads this section to configure it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level() }
    }
}

fn default_level() -> String {
    "info".to_string()
}
