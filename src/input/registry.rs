//! Per-kind entity registries
//!
//! Each entity kind (cursor, blob, object) owns one registry mapping live
//! protocol session ids to the logical touch sessions they drive. The three
//! namespaces never collide. Lookups for absent ids are expected under normal
//! protocol jitter and return `None`; registering an id that is already live
//! is an invariant violation surfaced as an error.

use std::collections::HashMap;

use super::error::BridgeError;
use crate::pipeline::{TouchId, TouchState};
use crate::protocol::SessionId;

/// One active touch contact as tracked by the bridge
#[derive(Debug, Clone)]
pub struct LogicalTouchSession {
    /// Handle assigned by the consuming pipeline on begin
    pub touch_id: TouchId,
    /// Canonical session payload (position, tags, properties)
    pub touch: TouchState,
}

/// Mapping from live protocol identity to logical touch session
#[derive(Debug, Default)]
pub struct EntityRegistry {
    sessions: HashMap<SessionId, LogicalTouchSession>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` currently drives a live session
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Insert a new session for `id`.
    ///
    /// Fails without overwriting when `id` is already live; the previous
    /// session would otherwise leak.
    pub fn register(
        &mut self,
        id: SessionId,
        session: LogicalTouchSession,
    ) -> Result<(), BridgeError> {
        if self.sessions.contains_key(&id) {
            return Err(BridgeError::DuplicateSession(id));
        }
        self.sessions.insert(id, session);
        Ok(())
    }

    /// Mutable access to the session driven by `id`, if live
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut LogicalTouchSession> {
        self.sessions.get_mut(&id)
    }

    /// Remove and return the session driven by `id`, if live
    pub fn remove(&mut self, id: SessionId) -> Option<LogicalTouchSession> {
        self.sessions.remove(&id)
    }

    /// Remove and yield every live session
    pub fn drain(&mut self) -> impl Iterator<Item = (SessionId, LogicalTouchSession)> + '_ {
        self.sessions.drain()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are live
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
