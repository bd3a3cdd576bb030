//! Kind-specific session properties
//!
//! Blobs and objects carry metadata beyond their position; it is projected
//! onto the touch session's property bag under fixed keys so downstream
//! consumers can read shape, orientation, and marker class without knowing
//! which protocol profile produced the session. Values are raw numeric
//! pass-through, no unit conversion.

use std::collections::HashMap;

use crate::protocol::{BlobEntity, ObjectEntity};

/// Property bag keys
pub mod keys {
    /// Orientation in radians (blobs and objects)
    pub const ANGLE: &str = "Angle";
    /// Normalized bounding-ellipse width (blobs)
    pub const WIDTH: &str = "Width";
    /// Normalized bounding-ellipse height (blobs)
    pub const HEIGHT: &str = "Height";
    /// Normalized covered area (blobs)
    pub const AREA: &str = "Area";
    /// Angular velocity (blobs and objects)
    pub const ROTATION_VELOCITY: &str = "RotationVelocity";
    /// Angular acceleration (blobs and objects)
    pub const ROTATION_ACCELERATION: &str = "RotationAcceleration";
    /// Fiducial marker class id (objects)
    pub const OBJECT_ID: &str = "ObjectId";
}

/// Extensible string-key → numeric-value metadata attached to a touch session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    values: HashMap<String, f32>,
}

impl PropertyBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, overwriting any prior value
    pub fn set(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);
    }

    /// Read a property
    pub fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    /// Number of properties set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no properties are set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Project blob shape and rotation state onto the bag
pub fn project_blob(bag: &mut PropertyBag, blob: &BlobEntity) {
    bag.set(keys::ANGLE, blob.angle);
    bag.set(keys::WIDTH, blob.width);
    bag.set(keys::HEIGHT, blob.height);
    bag.set(keys::AREA, blob.area);
    bag.set(keys::ROTATION_VELOCITY, blob.rotation_velocity);
    bag.set(keys::ROTATION_ACCELERATION, blob.rotation_acceleration);
}

/// Project object class and rotation state onto the bag
pub fn project_object(bag: &mut PropertyBag, object: &ObjectEntity) {
    bag.set(keys::ANGLE, object.angle);
    bag.set(keys::OBJECT_ID, object.class_id as f32);
    bag.set(keys::ROTATION_VELOCITY, object.rotation_velocity);
    bag.set(keys::ROTATION_ACCELERATION, object.rotation_acceleration);
}
