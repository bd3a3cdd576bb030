//! # tuio-bridge
//!
//! Bridges a TUIO 1.1 protocol stream (multi-touch cursors, shaped blobs,
//! tagged fiducial objects) into a generic touch-input pipeline.
//!
//! The wire format itself is decoded by an external TUIO client library; this
//! crate consumes its add/update/remove notifications through the
//! [`protocol::TuioClient`] boundary and turns them into coherent touch
//! sessions with stable identities, screen-space coordinates, and kind-specific
//! metadata, handed off safely from the network-receiving thread to the
//! consuming application.
//!
//! # Architecture
//!
//! ```text
//! tuio-bridge
//!   ├─> Transport Manager (listener lifecycle, per-kind processor attach)
//!   ├─> Session Controller (protocol notifications → touch lifecycle calls)
//!   │     ├─> Entity Registries (cursor / blob / object session tables)
//!   │     ├─> Coordinate Mapper (normalized TUIO coords → screen pixels)
//!   │     ├─> Property Projection (blob shape / object class metadata)
//!   │     └─> Object Tag Resolver (class id → configured tag)
//!   └─> Touch Input Sink (begin/update/end/cancel, owned by the host)
//! ```
//!
//! # Data Flow
//!
//! **Input Path:** TUIO packets → external decoder → per-kind processor
//! notifications → Session Controller → Touch Input Sink
//!
//! **Host Path:** viewport size per tick + running gate → Transport Manager /
//! Coordinate Mapper
//!
//! All notification handlers run on the decoder's receive thread and serialize
//! through a single lock, so the sink never observes interleaved lifecycle
//! calls regardless of which entity kind produced them.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Bridge configuration (port, enabled kinds, tag lists, object mappings)
pub mod config;

/// Core bridging layer: registries, coordinate mapping, session controller
pub mod input;

/// Downstream touch pipeline surface consumed by the host application
pub mod pipeline;

/// Protocol entity types and the external decoder boundary
pub mod protocol;

/// Network listener lifecycle and processor attachment
pub mod transport;
