//! Downstream touch pipeline surface
//!
//! The host application implements [`TouchInputSink`] to receive touch
//! session lifecycle calls. The bridge serializes all calls through one lock,
//! so implementations are never entered concurrently, but they run on the
//! decoder's receive thread and must complete in bounded, non-blocking time.
//!
//! A session terminates through exactly one of two calls: `end_touch` for a
//! graceful, protocol-driven removal, or `cancel_touch` when the transport
//! shuts down underneath a still-active contact.

use std::fmt;

use crate::input::coordinates::ScreenPoint;
use crate::input::properties::PropertyBag;
use crate::input::tags::TagSet;

/// Handle for one touch session, assigned by the sink on begin.
///
/// Opaque to the bridge; it is only stored and passed back on subsequent
/// lifecycle calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub u64);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Consumer-visible payload of one touch session
#[derive(Debug, Clone)]
pub struct TouchState {
    /// Position in screen pixels, origin bottom-left
    pub position: ScreenPoint,
    /// Source and kind labels, plus any resolved object tag
    pub tags: TagSet,
    /// Kind-specific metadata (shape, orientation, marker class)
    pub properties: PropertyBag,
}

/// Touch session lifecycle sink implemented by the consuming pipeline
pub trait TouchInputSink: Send {
    /// A new contact appeared; returns the handle used for all subsequent
    /// calls concerning this session
    fn begin_touch(&mut self, touch: &TouchState) -> TouchId;

    /// An active contact moved or changed metadata
    fn update_touch(&mut self, id: TouchId, touch: &TouchState);

    /// A contact ended gracefully (protocol removal)
    fn end_touch(&mut self, id: TouchId);

    /// A contact was forcibly aborted (transport shutdown); mutually
    /// exclusive with `end_touch` for any given session
    fn cancel_touch(&mut self, id: TouchId);
}
