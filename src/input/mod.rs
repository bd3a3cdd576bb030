//! Core bridging layer
//!
//! Turns the decoder's per-kind add/update/remove notifications into touch
//! session lifecycle calls:
//!
//! ```text
//! TUIO Notifications
//!       ↓
//! ┌─────────────────────────┐
//! │  TuioSessionController  │ ← single lock, all kinds
//! └─────────────────────────┘
//!       ↓           ↓           ↓
//! ┌──────────┐ ┌──────────┐ ┌───────────────┐
//! │  Entity  │ │ Tag sets │ │  Coordinate   │
//! │ Registry │ │ + Props  │ │   Mapper      │
//! └──────────┘ └──────────┘ └───────────────┘
//!       ↓
//! Touch Input Sink (begin / update / end / cancel)
//! ```

pub mod controller;
pub mod coordinates;
pub mod error;
pub mod properties;
pub mod registry;
pub mod tags;

pub use controller::{ControllerStats, TuioSessionController};
pub use coordinates::{CoordinateMapper, ScreenPoint, Viewport};
pub use error::{BridgeError, Result};
pub use properties::PropertyBag;
pub use registry::{EntityRegistry, LogicalTouchSession};
pub use tags::{ObjectTagResolver, TagSet};
