//! End-to-end bridge integration tests
//!
//! Drives the full path a deployment exercises: a scripted decoder client
//! delivers per-kind notifications through the transport manager's attached
//! processors, and a recording sink captures every lifecycle call the
//! consuming pipeline would see.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tuio_bridge::config::{Config, ObjectMapping};
use tuio_bridge::input::coordinates::{ScreenPoint, Viewport};
use tuio_bridge::input::properties::keys;
use tuio_bridge::input::TuioSessionController;
use tuio_bridge::pipeline::{TouchId, TouchInputSink, TouchState};
use tuio_bridge::protocol::{
    BlobEntity, CursorEntity, EntityProcessor, ObjectEntity, SessionId, TransportError, TuioClient,
};
use tuio_bridge::transport::TransportManager;

// ---------------------------------------------------------------------------
// Scripted decoder client
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeClientState {
    connected: AtomicBool,
    binds: Mutex<Vec<u16>>,
    cursor: Mutex<Option<Arc<dyn EntityProcessor<CursorEntity>>>>,
    blob: Mutex<Option<Arc<dyn EntityProcessor<BlobEntity>>>>,
    object: Mutex<Option<Arc<dyn EntityProcessor<ObjectEntity>>>>,
}

impl FakeClientState {
    fn cursor_added(&self, entity: &CursorEntity) {
        if let Some(p) = self.cursor.lock().unwrap().as_ref() {
            p.entity_added(entity);
        }
    }

    fn cursor_updated(&self, entity: &CursorEntity) {
        if let Some(p) = self.cursor.lock().unwrap().as_ref() {
            p.entity_updated(entity);
        }
    }

    fn cursor_removed(&self, entity: &CursorEntity) {
        if let Some(p) = self.cursor.lock().unwrap().as_ref() {
            p.entity_removed(entity);
        }
    }

    fn blob_added(&self, entity: &BlobEntity) {
        if let Some(p) = self.blob.lock().unwrap().as_ref() {
            p.entity_added(entity);
        }
    }

    fn blob_updated(&self, entity: &BlobEntity) {
        if let Some(p) = self.blob.lock().unwrap().as_ref() {
            p.entity_updated(entity);
        }
    }

    fn object_added(&self, entity: &ObjectEntity) {
        if let Some(p) = self.object.lock().unwrap().as_ref() {
            p.entity_added(entity);
        }
    }

    fn bind_count(&self) -> usize {
        self.binds.lock().unwrap().len()
    }
}

struct FakeTuioClient {
    state: Arc<FakeClientState>,
}

impl TuioClient for FakeTuioClient {
    fn connect(&mut self, port: u16) -> Result<(), TransportError> {
        self.state.binds.lock().unwrap().push(port);
        self.state.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.state.connected.store(false, Ordering::SeqCst);
    }

    fn is_connected(&self) -> bool {
        self.state.connected.load(Ordering::SeqCst)
    }

    fn set_cursor_processor(&mut self, processor: Option<Arc<dyn EntityProcessor<CursorEntity>>>) {
        *self.state.cursor.lock().unwrap() = processor;
    }

    fn set_blob_processor(&mut self, processor: Option<Arc<dyn EntityProcessor<BlobEntity>>>) {
        *self.state.blob.lock().unwrap() = processor;
    }

    fn set_object_processor(&mut self, processor: Option<Arc<dyn EntityProcessor<ObjectEntity>>>) {
        *self.state.object.lock().unwrap() = processor;
    }
}

// ---------------------------------------------------------------------------
// Recording sink
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum SinkEvent {
    Begin { id: TouchId, touch: TouchState },
    Update { id: TouchId, touch: TouchState },
    End { id: TouchId },
    Cancel { id: TouchId },
}

struct RecordingSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
    next_id: u64,
}

impl RecordingSink {
    fn new() -> (Self, Arc<Mutex<Vec<SinkEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (Self { events: Arc::clone(&events), next_id: 100 }, events)
    }
}

impl TouchInputSink for RecordingSink {
    fn begin_touch(&mut self, touch: &TouchState) -> TouchId {
        let id = TouchId(self.next_id);
        self.next_id += 1;
        self.events.lock().unwrap().push(SinkEvent::Begin { id, touch: touch.clone() });
        id
    }

    fn update_touch(&mut self, id: TouchId, touch: &TouchState) {
        self.events.lock().unwrap().push(SinkEvent::Update { id, touch: touch.clone() });
    }

    fn end_touch(&mut self, id: TouchId) {
        self.events.lock().unwrap().push(SinkEvent::End { id });
    }

    fn cancel_touch(&mut self, id: TouchId) {
        self.events.lock().unwrap().push(SinkEvent::Cancel { id });
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Bridge {
    manager: TransportManager<RecordingSink>,
    controller: Arc<TuioSessionController<RecordingSink>>,
    client: Arc<FakeClientState>,
    events: Arc<Mutex<Vec<SinkEvent>>>,
    viewport: Arc<Viewport>,
}

/// Build a connected bridge over an 800×600 viewport
fn bridge(config: Config) -> Bridge {
    let (sink, events) = RecordingSink::new();
    let viewport = Arc::new(Viewport::new(800, 600));
    let controller = Arc::new(TuioSessionController::new(
        sink,
        Arc::clone(&viewport),
        &config.input,
    ));

    let client = Arc::new(FakeClientState::default());
    let mut manager = TransportManager::new(
        Box::new(FakeTuioClient { state: Arc::clone(&client) }),
        Arc::clone(&controller),
        &config,
    );

    manager.set_running(true).unwrap();
    manager.connect().unwrap();

    Bridge { manager, controller, client, events, viewport }
}

fn cursor(id: i64, x: f32, y: f32) -> CursorEntity {
    CursorEntity { id: SessionId(id), x, y }
}

fn blob(id: i64, angle: f32) -> BlobEntity {
    BlobEntity {
        id: SessionId(id),
        x: 0.25,
        y: 0.75,
        angle,
        width: 0.1,
        height: 0.05,
        area: 0.004,
        rotation_velocity: 0.2,
        rotation_acceleration: 0.0,
    }
}

fn object(id: i64, class_id: i32) -> ObjectEntity {
    ObjectEntity {
        id: SessionId(id),
        x: 0.5,
        y: 0.5,
        class_id,
        angle: 1.0,
        rotation_velocity: 0.0,
        rotation_acceleration: 0.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_cursor_lifecycle_produces_ordered_calls() {
    let b = bridge(Config::default());

    b.client.cursor_added(&cursor(1, 0.5, 0.25));
    b.client.cursor_updated(&cursor(1, 0.75, 0.5));
    b.client.cursor_updated(&cursor(1, 1.0, 1.0));
    b.client.cursor_removed(&cursor(1, 1.0, 1.0));

    let events = b.events.lock().unwrap();
    assert_eq!(events.len(), 4);

    let SinkEvent::Begin { id, touch } = &events[0] else {
        panic!("expected begin, got {:?}", events[0]);
    };
    // (0.5, 0.25) normalized → (400, 450) in an 800×600 Y-up space
    assert_eq!(touch.position, ScreenPoint { x: 400.0, y: 450.0 });
    assert!(touch.tags.contains("TUIO"));
    assert!(touch.tags.contains("Touch"));
    assert!(touch.properties.is_empty());

    let SinkEvent::Update { id: u1, touch } = &events[1] else {
        panic!("expected update, got {:?}", events[1]);
    };
    assert_eq!(u1, id);
    assert_eq!(touch.position, ScreenPoint { x: 600.0, y: 300.0 });

    assert!(matches!(&events[2], SinkEvent::Update { id: u2, .. } if u2 == id));
    assert!(matches!(&events[3], SinkEvent::End { id: e } if e == id));
}

#[test]
fn test_stale_events_reach_no_sink() {
    let b = bridge(Config::default());

    b.client.cursor_updated(&cursor(7, 0.1, 0.1));
    b.client.cursor_removed(&cursor(7, 0.1, 0.1));

    // Removed then updated again: still absent, still silent
    b.client.cursor_added(&cursor(8, 0.1, 0.1));
    b.client.cursor_removed(&cursor(8, 0.1, 0.1));
    b.client.cursor_updated(&cursor(8, 0.2, 0.2));
    b.client.cursor_removed(&cursor(8, 0.2, 0.2));

    let events = b.events.lock().unwrap();
    assert_eq!(events.len(), 2); // one begin + one end for session 8
    assert_eq!(b.controller.stats().stale_events, 4);
}

#[test]
fn test_duplicate_add_does_not_leak_session() {
    let b = bridge(Config::default());

    b.client.cursor_added(&cursor(1, 0.1, 0.1));
    b.client.cursor_added(&cursor(1, 0.9, 0.9));
    b.client.cursor_removed(&cursor(1, 0.9, 0.9));

    let events = b.events.lock().unwrap();
    // One begin, one end; the duplicate produced nothing
    assert_eq!(events.len(), 2);
    assert_eq!(b.controller.stats().duplicate_adds, 1);
    assert_eq!(b.controller.active_sessions(), 0);
}

#[test]
fn test_blob_properties_projected_and_updated_in_place() {
    let b = bridge(Config::default());

    b.client.blob_added(&blob(3, 0.5));
    b.client.blob_updated(&blob(3, 2.5));

    let events = b.events.lock().unwrap();

    let SinkEvent::Begin { touch, .. } = &events[0] else {
        panic!("expected begin, got {:?}", events[0]);
    };
    assert_eq!(touch.properties.get(keys::ANGLE), Some(0.5));
    assert_eq!(touch.properties.get(keys::WIDTH), Some(0.1));
    assert_eq!(touch.properties.get(keys::AREA), Some(0.004));
    assert!(touch.tags.contains("Blob"));

    let SinkEvent::Update { touch, .. } = &events[1] else {
        panic!("expected update, got {:?}", events[1]);
    };
    // Same keys, new value, no key growth
    assert_eq!(touch.properties.get(keys::ANGLE), Some(2.5));
    assert_eq!(touch.properties.len(), 6);
}

#[test]
fn test_object_tag_resolution_first_match_wins() {
    let mut config = Config::default();
    config.input.object_mappings = vec![
        ObjectMapping { id: 4, tag: "Token".to_string() },
        ObjectMapping { id: 4, tag: "Shadowed".to_string() },
        ObjectMapping { id: 9, tag: "Brush".to_string() },
    ];
    let b = bridge(config);

    b.client.object_added(&object(1, 4));
    b.client.object_added(&object(2, 9));
    b.client.object_added(&object(3, 77)); // unmapped

    let events = b.events.lock().unwrap();

    let SinkEvent::Begin { touch, .. } = &events[0] else { panic!() };
    assert!(touch.tags.contains("TUIO"));
    assert!(touch.tags.contains("Object"));
    assert!(touch.tags.contains("Token"));
    assert!(!touch.tags.contains("Shadowed"));
    assert_eq!(touch.properties.get(keys::OBJECT_ID), Some(4.0));

    let SinkEvent::Begin { touch, .. } = &events[1] else { panic!() };
    assert!(touch.tags.contains("Brush"));

    let SinkEvent::Begin { touch, .. } = &events[2] else { panic!() };
    // Unmapped class id: base tags only
    assert_eq!(touch.tags.len(), 2);
}

#[test]
fn test_disconnect_cancels_every_active_session() {
    let mut b = bridge(Config::default());

    b.client.cursor_added(&cursor(1, 0.1, 0.1));
    b.client.blob_added(&blob(2, 0.0));
    b.client.object_added(&object(3, 5));
    assert_eq!(b.controller.active_sessions(), 3);

    b.manager.disconnect();

    let events = b.events.lock().unwrap();
    let cancels: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, SinkEvent::Cancel { .. }))
        .collect();
    let ends: Vec<_> = events.iter().filter(|e| matches!(e, SinkEvent::End { .. })).collect();

    assert_eq!(cancels.len(), 3);
    assert!(ends.is_empty());
    assert_eq!(b.controller.active_sessions(), 0);
    assert!(!b.manager.is_connected());

    // Notifications after shutdown go nowhere: processors are detached
    drop(events);
    b.client.cursor_updated(&cursor(1, 0.5, 0.5));
    assert_eq!(b.events.lock().unwrap().len(), 6);
}

#[test]
fn test_same_port_does_not_rebind() {
    let mut b = bridge(Config::default());
    assert_eq!(b.client.bind_count(), 1);

    b.manager.set_port(3333).unwrap();
    assert_eq!(b.client.bind_count(), 1);

    b.manager.set_port(3340).unwrap();
    assert_eq!(b.client.bind_count(), 2);
    assert_eq!(b.manager.port(), 3340);
}

#[test]
fn test_connect_deferred_until_host_runs() {
    let (sink, _events) = RecordingSink::new();
    let viewport = Arc::new(Viewport::new(800, 600));
    let config = Config::default();
    let controller = Arc::new(TuioSessionController::new(sink, viewport, &config.input));
    let client = Arc::new(FakeClientState::default());
    let mut manager = TransportManager::new(
        Box::new(FakeTuioClient { state: Arc::clone(&client) }),
        controller,
        &config,
    );

    manager.connect().unwrap();
    assert_eq!(client.bind_count(), 0);
    assert!(!manager.is_connected());

    manager.set_running(true).unwrap();
    assert_eq!(client.bind_count(), 1);
    assert!(manager.is_connected());
}

#[test]
fn test_disabled_kind_receives_no_processor() {
    let mut config = Config::default();
    config.input.enable_blobs = false;
    let b = bridge(config);

    b.client.blob_added(&blob(1, 0.0));
    b.client.cursor_added(&cursor(2, 0.5, 0.5));

    let events = b.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], SinkEvent::Begin { .. }));
}

#[test]
fn test_viewport_resize_affects_following_events() {
    let b = bridge(Config::default());

    b.client.cursor_added(&cursor(1, 0.5, 0.5));
    b.viewport.set_size(1600, 1200);
    b.client.cursor_updated(&cursor(1, 0.5, 0.5));

    let events = b.events.lock().unwrap();
    let SinkEvent::Begin { touch, .. } = &events[0] else { panic!() };
    assert_eq!(touch.position, ScreenPoint { x: 400.0, y: 300.0 });

    let SinkEvent::Update { touch, .. } = &events[1] else { panic!() };
    assert_eq!(touch.position, ScreenPoint { x: 800.0, y: 600.0 });
}
