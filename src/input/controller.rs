//! TUIO Session Controller
//!
//! The single authority translating protocol notifications into touch-session
//! lifecycle calls. The three entity kinds fire add/update/remove
//! notifications independently on the decoder's receive thread; every handler
//! takes one shared lock for its full body, so registry state and the calls
//! into the consuming pipeline stay consistent across kinds.
//!
//! ```text
//! Decoder thread                 TuioSessionController            Consumer
//! ━━━━━━━━━━━━━━                 ━━━━━━━━━━━━━━━━━━━━━            ━━━━━━━━
//!
//! cursor added ───────────────┐
//! blob updated ───────────────┼─> lock ─> registry lookup
//! object removed ─────────────┘      │        │
//!                                    │        ├─> coordinate mapping
//!                                    │        ├─> tag / property projection
//!                                    │        │
//!                                    │        └─> begin / update /
//!                                    │            end / cancel ──────> sink
//!                                    └─> unlock
//! ```
//!
//! Per entity the lifecycle is `absent → active` on add, `active → active` on
//! any number of updates, and `active → absent` on remove. Update or remove
//! for an absent entity is a silent no-op (late or duplicate protocol events
//! race with teardown under normal jitter); add for an already-active entity
//! is a fault and is dropped loudly rather than overwriting the live session.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

use super::coordinates::{CoordinateMapper, Viewport};
use super::properties::{self, PropertyBag};
use super::registry::{EntityRegistry, LogicalTouchSession};
use super::tags::{ObjectTagResolver, TagSet};
use crate::config::InputConfig;
use crate::pipeline::{TouchInputSink, TouchState};
use crate::protocol::{
    BlobEntity, CursorEntity, EntityKind, EntityProcessor, ObjectEntity, SessionId,
};

/// Counters describing the controller's lifetime activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    /// Sessions begun
    pub begins: u64,
    /// Update calls issued
    pub updates: u64,
    /// Sessions ended gracefully
    pub ends: u64,
    /// Sessions force-cancelled on shutdown
    pub cancels: u64,
    /// Update/remove notifications dropped for absent entities
    pub stale_events: u64,
    /// Add notifications dropped for already-active entities
    pub duplicate_adds: u64,
}

/// Everything the notification handlers mutate, behind one lock
struct ControllerState<S> {
    sink: S,
    registries: [EntityRegistry; 3],
    base_tags: [TagSet; 3],
    resolver: ObjectTagResolver,
    stats: ControllerStats,
}

/// Translates per-kind protocol notifications into touch lifecycle calls.
///
/// Implements [`EntityProcessor`] for all three entity kinds; one instance is
/// attached to the decoder for every enabled kind, so a single lock serializes
/// the whole notification stream.
pub struct TuioSessionController<S: TouchInputSink> {
    state: Mutex<ControllerState<S>>,
    mapper: CoordinateMapper,
}

/// Kind-specific capabilities a protocol entity brings to the shared
/// lifecycle handlers: its identity, its position, and how it projects
/// metadata onto a session.
trait BridgedEntity {
    /// Which registry and base tag set this entity kind uses
    const KIND: EntityKind;

    fn session_id(&self) -> SessionId;

    /// Normalized `(x, y)`, top-left origin
    fn normalized_position(&self) -> (f32, f32);

    /// Write kind-specific properties into the session bag
    fn project_properties(&self, bag: &mut PropertyBag);

    /// Extra configured tag for this entity, if any
    fn resolve_extra_tag(&self, resolver: &ObjectTagResolver) -> Option<String> {
        let _ = resolver;
        None
    }
}

impl BridgedEntity for CursorEntity {
    const KIND: EntityKind = EntityKind::Cursors;

    fn session_id(&self) -> SessionId {
        self.id
    }

    fn normalized_position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn project_properties(&self, _bag: &mut PropertyBag) {}
}

impl BridgedEntity for BlobEntity {
    const KIND: EntityKind = EntityKind::Blobs;

    fn session_id(&self) -> SessionId {
        self.id
    }

    fn normalized_position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn project_properties(&self, bag: &mut PropertyBag) {
        properties::project_blob(bag, self);
    }
}

impl BridgedEntity for ObjectEntity {
    const KIND: EntityKind = EntityKind::Objects;

    fn session_id(&self) -> SessionId {
        self.id
    }

    fn normalized_position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn project_properties(&self, bag: &mut PropertyBag) {
        properties::project_object(bag, self);
    }

    fn resolve_extra_tag(&self, resolver: &ObjectTagResolver) -> Option<String> {
        resolver.resolve(self.class_id).map(str::to_owned)
    }
}

impl<S: TouchInputSink> TuioSessionController<S> {
    /// Create a controller feeding `sink`, mapping coordinates through
    /// `viewport`, with tag lists and object mappings from `config`
    pub fn new(sink: S, viewport: Arc<Viewport>, config: &InputConfig) -> Self {
        Self {
            state: Mutex::new(ControllerState {
                sink,
                registries: [
                    EntityRegistry::new(),
                    EntityRegistry::new(),
                    EntityRegistry::new(),
                ],
                base_tags: [
                    TagSet::from(config.cursor_tags.as_slice()),
                    TagSet::from(config.blob_tags.as_slice()),
                    TagSet::from(config.object_tags.as_slice()),
                ],
                resolver: ObjectTagResolver::new(config.object_mappings.clone()),
                stats: ControllerStats::default(),
            }),
            mapper: CoordinateMapper::new(viewport),
        }
    }

    /// Snapshot of the activity counters
    pub fn stats(&self) -> ControllerStats {
        self.state.lock().stats
    }

    /// Number of currently active sessions across all kinds
    pub fn active_sessions(&self) -> usize {
        let state = self.state.lock();
        state.registries.iter().map(EntityRegistry::len).sum()
    }

    /// Force-cancel every active session in every registry.
    ///
    /// Called on transport shutdown so no session of any kind outlives its
    /// listener. Returns the number of sessions cancelled.
    pub fn cancel_all_sessions(&self) -> usize {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let mut cancelled = 0;
        for registry in state.registries.iter_mut() {
            for (id, session) in registry.drain() {
                trace!("Cancelling touch session {} for protocol session {}", session.touch_id, id);
                state.sink.cancel_touch(session.touch_id);
                state.stats.cancels += 1;
                cancelled += 1;
            }
        }

        if cancelled > 0 {
            info!("Force-cancelled {} active touch sessions", cancelled);
        }
        cancelled
    }

    fn handle_added<E: BridgedEntity>(&self, entity: &E) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let id = entity.session_id();
        let kind_index = E::KIND.index();

        if state.registries[kind_index].contains(id) {
            state.stats.duplicate_adds += 1;
            error!(
                "Duplicate add for live {:?} session {}; notification dropped",
                E::KIND,
                id
            );
            return;
        }

        let (x, y) = entity.normalized_position();
        let position = self.mapper.to_screen(x, y);

        let mut tags = state.base_tags[kind_index].clone();
        if let Some(tag) = entity.resolve_extra_tag(&state.resolver) {
            tags.push(tag);
        }

        let mut properties = PropertyBag::new();
        entity.project_properties(&mut properties);

        let touch = TouchState { position, tags, properties };
        let touch_id = state.sink.begin_touch(&touch);

        // Cannot fail: liveness was checked above under the same lock.
        if let Err(e) = state.registries[kind_index].register(id, LogicalTouchSession { touch_id, touch }) {
            error!("Failed to register touch session: {}", e);
            return;
        }

        state.stats.begins += 1;
        debug!(
            "Touch session {} began for {:?} session {}",
            touch_id,
            E::KIND,
            id
        );
    }

    fn handle_updated<E: BridgedEntity>(&self, entity: &E) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let id = entity.session_id();
        let Some(session) = state.registries[E::KIND.index()].get_mut(id) else {
            state.stats.stale_events += 1;
            trace!("Stale update for {:?} session {}; ignored", E::KIND, id);
            return;
        };

        let (x, y) = entity.normalized_position();
        session.touch.position = self.mapper.to_screen(x, y);
        entity.project_properties(&mut session.touch.properties);

        state.sink.update_touch(session.touch_id, &session.touch);
        state.stats.updates += 1;
    }

    fn handle_removed<E: BridgedEntity>(&self, entity: &E) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let id = entity.session_id();
        // Remove before calling into the sink: a racing update for the same
        // id must not resurrect the entry mid-teardown.
        let Some(session) = state.registries[E::KIND.index()].remove(id) else {
            state.stats.stale_events += 1;
            trace!("Stale remove for {:?} session {}; ignored", E::KIND, id);
            return;
        };

        state.sink.end_touch(session.touch_id);
        state.stats.ends += 1;
        debug!(
            "Touch session {} ended for {:?} session {}",
            session.touch_id,
            E::KIND,
            id
        );
    }
}

impl<S: TouchInputSink> EntityProcessor<CursorEntity> for TuioSessionController<S> {
    fn entity_added(&self, entity: &CursorEntity) {
        self.handle_added(entity);
    }

    fn entity_updated(&self, entity: &CursorEntity) {
        self.handle_updated(entity);
    }

    fn entity_removed(&self, entity: &CursorEntity) {
        self.handle_removed(entity);
    }
}

impl<S: TouchInputSink> EntityProcessor<BlobEntity> for TuioSessionController<S> {
    fn entity_added(&self, entity: &BlobEntity) {
        self.handle_added(entity);
    }

    fn entity_updated(&self, entity: &BlobEntity) {
        self.handle_updated(entity);
    }

    fn entity_removed(&self, entity: &BlobEntity) {
        self.handle_removed(entity);
    }
}

impl<S: TouchInputSink> EntityProcessor<ObjectEntity> for TuioSessionController<S> {
    fn entity_added(&self, entity: &ObjectEntity) {
        self.handle_added(entity);
    }

    fn entity_updated(&self, entity: &ObjectEntity) {
        self.handle_updated(entity);
    }

    fn entity_removed(&self, entity: &ObjectEntity) {
        self.handle_removed(entity);
    }
}
