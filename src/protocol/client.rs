//! External decoder boundary
//!
//! The TUIO wire decoder is an external collaborator: it owns the UDP socket,
//! parses OSC bundles, and tracks which session ids appeared, moved, or
//! vanished between frames. This module defines the narrow surface the bridge
//! programs against.
//!
//! Decoder implementations deliver notifications from their own receive
//! thread, concurrently with the host application's execution; everything
//! attached here must therefore be `Send + Sync`.

use std::sync::Arc;
use thiserror::Error;

use super::{BlobEntity, CursorEntity, ObjectEntity};

/// Transport-layer error reported by the decoder
#[derive(Error, Debug)]
pub enum TransportError {
    /// Listener could not bind its UDP socket
    #[error("Failed to bind TUIO listener on port {port}: {source}")]
    Bind {
        /// Requested port
        port: u16,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },

    /// Listener failed after startup
    #[error("TUIO listener error: {0}")]
    Listener(String),
}

/// Per-kind notification processor.
///
/// One processor observes the full lifecycle of every entity of a single
/// kind. Notifications are fire-and-forget: the decoder does not expect a
/// result and must not be blocked, so handlers complete in bounded time.
pub trait EntityProcessor<E>: Send + Sync {
    /// A new entity appeared in the protocol stream
    fn entity_added(&self, entity: &E);

    /// An existing entity changed position or attributes
    fn entity_updated(&self, entity: &E);

    /// An entity left the protocol stream
    fn entity_removed(&self, entity: &E);
}

/// Handle to the external TUIO decoder.
///
/// The bridge owns exactly one client and drives its lifecycle through
/// [`crate::transport::TransportManager`]; processors registered here receive
/// notifications on the decoder's receive thread until they are detached or
/// the client disconnects.
pub trait TuioClient: Send {
    /// Bind the listener to `port` and start receiving.
    ///
    /// Implementations must leave no listener running when this fails.
    fn connect(&mut self, port: u16) -> Result<(), TransportError>;

    /// Stop the listener. Attached processors receive no further
    /// notifications. Idempotent.
    fn disconnect(&mut self);

    /// Whether the listener is currently bound and receiving
    fn is_connected(&self) -> bool;

    /// Attach (`Some`) or detach (`None`) the cursor processor
    fn set_cursor_processor(&mut self, processor: Option<Arc<dyn EntityProcessor<CursorEntity>>>);

    /// Attach (`Some`) or detach (`None`) the blob processor
    fn set_blob_processor(&mut self, processor: Option<Arc<dyn EntityProcessor<BlobEntity>>>);

    /// Attach (`Some`) or detach (`None`) the object processor
    fn set_object_processor(&mut self, processor: Option<Arc<dyn EntityProcessor<ObjectEntity>>>);
}
