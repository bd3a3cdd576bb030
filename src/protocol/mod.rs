//! TUIO protocol entity types
//!
//! The external decoder library parses the OSC wire format and delivers the
//! entity values defined here through the [`client::TuioClient`] boundary.
//! Positions are normalized to `[0, 1]` with a top-left origin (the protocol's
//! Y-down convention); identities are stable across update notifications for
//! the same physical touch or marker.

use enumflags2::bitflags;
use std::fmt;

pub mod client;

pub use client::{EntityProcessor, TransportError, TuioClient};

/// The three TUIO entity kinds
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Bare touch point (2Dcur profile)
    Cursors = 0b001,
    /// Shaped touch region (2Dblb profile)
    Blobs = 0b010,
    /// Tagged fiducial marker (2Dobj profile)
    Objects = 0b100,
}

impl EntityKind {
    /// Dense index for per-kind tables (cursor, blob, object order)
    pub const fn index(self) -> usize {
        match self {
            EntityKind::Cursors => 0,
            EntityKind::Blobs => 1,
            EntityKind::Objects => 2,
        }
    }
}

/// Stable protocol session identity.
///
/// The decoder reuses one id for all notifications concerning the same
/// physical contact; the bridge keys its registries on this value rather than
/// on decoder object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub i64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bare touch point
#[derive(Debug, Clone, PartialEq)]
pub struct CursorEntity {
    /// Protocol session identity
    pub id: SessionId,
    /// Normalized X position, `[0, 1]` left → right
    pub x: f32,
    /// Normalized Y position, `[0, 1]` top → bottom
    pub y: f32,
}

/// Shaped touch region
#[derive(Debug, Clone, PartialEq)]
pub struct BlobEntity {
    /// Protocol session identity
    pub id: SessionId,
    /// Normalized X position
    pub x: f32,
    /// Normalized Y position
    pub y: f32,
    /// Orientation in radians
    pub angle: f32,
    /// Normalized bounding-ellipse width
    pub width: f32,
    /// Normalized bounding-ellipse height
    pub height: f32,
    /// Normalized covered area
    pub area: f32,
    /// Angular velocity
    pub rotation_velocity: f32,
    /// Angular acceleration
    pub rotation_acceleration: f32,
}

/// Tagged fiducial marker
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectEntity {
    /// Protocol session identity
    pub id: SessionId,
    /// Normalized X position
    pub x: f32,
    /// Normalized Y position
    pub y: f32,
    /// Marker class id (the printed fiducial pattern)
    pub class_id: i32,
    /// Orientation in radians
    pub angle: f32,
    /// Angular velocity
    pub rotation_velocity: f32,
    /// Angular acceleration
    pub rotation_acceleration: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use enumflags2::BitFlags;

    #[test]
    fn test_kind_indices_are_dense() {
        let mut seen = [false; 3];
        for kind in BitFlags::<EntityKind>::all().iter() {
            seen[kind.index()] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_session_id_display() {
        assert_eq!(SessionId(42).to_string(), "42");
        assert_eq!(SessionId(-3).to_string(), "-3");
    }
}
