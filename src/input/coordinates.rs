//! Coordinate Transformation
//!
//! Converts the protocol's normalized coordinates (range `[0, 1]`, origin
//! top-left, Y down) into screen pixels for the consuming pipeline (origin
//! bottom-left, Y up), using the viewport dimensions the host refreshes once
//! per frame.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A position in screen pixels, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X in pixels, left → right
    pub x: f32,
    /// Y in pixels, bottom → top
    pub y: f32,
}

/// Current viewport dimensions in pixels.
///
/// Written by the application thread once per tick, read by the decoder
/// thread on every notification. Reads are deliberately unsynchronized:
/// a resize can yield one frame of stale dimensions, which is acceptable
/// coordinate skew, so plain relaxed atomics suffice.
#[derive(Debug)]
pub struct Viewport {
    width: AtomicU32,
    height: AtomicU32,
}

impl Viewport {
    /// Create a viewport with initial dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: AtomicU32::new(width),
            height: AtomicU32::new(height),
        }
    }

    /// Refresh the dimensions (host calls this once per frame)
    pub fn set_size(&self, width: u32, height: u32) {
        self.width.store(width, Ordering::Relaxed);
        self.height.store(height, Ordering::Relaxed);
    }

    /// Current `(width, height)` in pixels
    pub fn size(&self) -> (u32, u32) {
        (
            self.width.load(Ordering::Relaxed),
            self.height.load(Ordering::Relaxed),
        )
    }
}

/// Maps normalized protocol coordinates into the current viewport
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    viewport: Arc<Viewport>,
}

impl CoordinateMapper {
    /// Create a mapper reading from the shared viewport
    pub fn new(viewport: Arc<Viewport>) -> Self {
        Self { viewport }
    }

    /// Map a normalized position using the current viewport dimensions
    pub fn to_screen(&self, x_norm: f32, y_norm: f32) -> ScreenPoint {
        let (width, height) = self.viewport.size();
        Self::map(x_norm, y_norm, width as f32, height as f32)
    }

    /// Map a normalized position into a `width`×`height` pixel space.
    ///
    /// The protocol's top-left-origin, Y-down convention is flipped to the
    /// consumer's bottom-left-origin, Y-up convention. Values outside `[0, 1]`
    /// pass through unclamped: sensor noise at the edges is a legitimate
    /// upstream condition.
    pub fn map(x_norm: f32, y_norm: f32, width: f32, height: f32) -> ScreenPoint {
        ScreenPoint {
            x: x_norm * width,
            y: (1.0 - y_norm) * height,
        }
    }
}
