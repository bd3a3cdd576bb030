//! Network listener lifecycle
//!
//! Owns the external TUIO decoder handle: when the listener binds, which
//! entity-kind processors are attached to it, and the forced teardown of
//! every still-active touch session when the listener goes away.
//!
//! Connection attempts are gated on the host application's running state;
//! configuration changes made while the host is stopped are stored and
//! applied on the next start. Re-applying an unchanged port or kind mask is
//! an explicit no-op, so configuration UIs can write settings back freely
//! without causing reconnect storms or processor churn.

use enumflags2::BitFlags;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::input::controller::TuioSessionController;
use crate::pipeline::TouchInputSink;
use crate::protocol::{EntityKind, EntityProcessor, TuioClient};

pub use crate::protocol::TransportError;

/// Drives the decoder's connect/disconnect lifecycle and keeps the attached
/// processor set in sync with the enabled-kind configuration
pub struct TransportManager<S: TouchInputSink + 'static> {
    client: Box<dyn TuioClient>,
    controller: Arc<TuioSessionController<S>>,
    port: u16,
    enabled: BitFlags<EntityKind>,
    attached: BitFlags<EntityKind>,
    running: bool,
    pending_connect: bool,
}

impl<S: TouchInputSink + 'static> TransportManager<S> {
    /// Create a manager over `client`, routing notifications to `controller`,
    /// with port and enabled kinds taken from `config`
    pub fn new(
        client: Box<dyn TuioClient>,
        controller: Arc<TuioSessionController<S>>,
        config: &Config,
    ) -> Self {
        Self {
            client,
            controller,
            port: config.transport.port,
            enabled: config.enabled_kinds(),
            attached: BitFlags::empty(),
            running: false,
            pending_connect: false,
        }
    }

    /// Bind the listener at the configured port and attach the enabled
    /// processors.
    ///
    /// Deferred while the host is not running. When already connected the
    /// previous listener is torn down first, so calling this again
    /// reconfigures rather than stacking listeners. A bind failure propagates
    /// and leaves the controller and registries untouched.
    pub fn connect(&mut self) -> Result<(), TransportError> {
        if !self.running {
            self.pending_connect = true;
            debug!("Host not running; deferring TUIO connect to port {}", self.port);
            return Ok(());
        }

        if self.client.is_connected() {
            self.disconnect();
        }

        self.client.connect(self.port)?;
        info!("TUIO listener connected on port {}", self.port);

        let enabled = self.enabled;
        for kind in enabled.iter() {
            self.attach(kind);
        }
        self.attached = enabled;

        Ok(())
    }

    /// Detach all processors, stop the listener, and force-cancel every
    /// still-active touch session of every kind.
    ///
    /// Idempotent: disconnecting while not connected does nothing.
    pub fn disconnect(&mut self) {
        if !self.client.is_connected() && self.attached.is_empty() {
            return;
        }

        let attached = self.attached;
        for kind in attached.iter() {
            self.detach(kind);
        }
        self.attached = BitFlags::empty();

        self.client.disconnect();

        let cancelled = self.controller.cancel_all_sessions();
        info!("TUIO listener disconnected ({} sessions cancelled)", cancelled);
    }

    /// Change the listening port.
    ///
    /// Setting the current value is a no-op. A changed value reconnects only
    /// when a listener is live; otherwise it takes effect on the next
    /// connect.
    pub fn set_port(&mut self, port: u16) -> Result<(), TransportError> {
        if port == self.port {
            return Ok(());
        }

        self.port = port;
        debug!("TUIO port changed to {}", port);

        if self.client.is_connected() {
            self.connect()
        } else {
            Ok(())
        }
    }

    /// Change the enabled entity-kind set.
    ///
    /// While connected, the attached processors are diffed live: newly
    /// enabled kinds attach, newly disabled kinds detach, and unchanged
    /// kinds are left alone. Setting the current mask is a no-op.
    pub fn set_enabled_kinds(&mut self, kinds: BitFlags<EntityKind>) {
        if kinds == self.enabled {
            return;
        }

        self.enabled = kinds;
        if !self.client.is_connected() {
            return;
        }

        let to_attach = kinds & !self.attached;
        let to_detach = self.attached & !kinds;

        for kind in to_attach.iter() {
            self.attach(kind);
        }
        // Sessions of a freshly disabled kind stay active until the protocol
        // removes them or the listener disconnects.
        for kind in to_detach.iter() {
            self.detach(kind);
        }
        self.attached = kinds;
    }

    /// Host lifecycle gate.
    ///
    /// Entering the running state applies a deferred connect; leaving it
    /// tears the listener down and remembers to reconnect on the next start.
    pub fn set_running(&mut self, running: bool) -> Result<(), TransportError> {
        if running == self.running {
            return Ok(());
        }
        self.running = running;

        if running {
            if self.pending_connect {
                self.pending_connect = false;
                return self.connect();
            }
            Ok(())
        } else {
            if self.client.is_connected() {
                self.pending_connect = true;
            }
            self.disconnect();
            Ok(())
        }
    }

    /// Whether the listener is currently bound
    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    /// Currently configured port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Currently enabled entity kinds
    pub fn enabled_kinds(&self) -> BitFlags<EntityKind> {
        self.enabled
    }

    fn attach(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Cursors => {
                let processor: Arc<dyn EntityProcessor<crate::protocol::CursorEntity>> =
                    self.controller.clone();
                self.client.set_cursor_processor(Some(processor));
            }
            EntityKind::Blobs => {
                let processor: Arc<dyn EntityProcessor<crate::protocol::BlobEntity>> =
                    self.controller.clone();
                self.client.set_blob_processor(Some(processor));
            }
            EntityKind::Objects => {
                let processor: Arc<dyn EntityProcessor<crate::protocol::ObjectEntity>> =
                    self.controller.clone();
                self.client.set_object_processor(Some(processor));
            }
        }
        debug!("Attached {:?} processor", kind);
    }

    fn detach(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Cursors => self.client.set_cursor_processor(None),
            EntityKind::Blobs => self.client.set_blob_processor(None),
            EntityKind::Objects => self.client.set_object_processor(None),
        }
        debug!("Detached {:?} processor", kind);
    }
}

impl<S: TouchInputSink + 'static> Drop for TransportManager<S> {
    fn drop(&mut self) {
        if self.client.is_connected() {
            warn!("TransportManager dropped while connected; forcing disconnect");
            self.disconnect();
        }
    }
}
