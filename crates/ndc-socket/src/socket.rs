//! Socket handler
//!
//! Public entry point tying together the transport session, the event dispatcher,
//! and the two supervisory loops.

use crate::dispatch::EventDispatcher;
use crate::error::SocketResult;
use crate::handlers::EventHandler;
use crate::supervisor::{spawn_heartbeat, spawn_reconnect};
use crate::transport::{CloseOutcome, ConnectOutcome, TransportSession};
use ndc_common::SocketConfig;
use ndc_core::IdentityProvider;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Authenticated real-time socket client
///
/// With `socket_enabled` set, the heartbeat and reconnect loops start as soon as the
/// handler is created inside a Tokio runtime; otherwise they start on the first
/// [`connect`](Self::connect). Dropping the handler stops both loops and the receive loop.
pub struct SocketHandler {
    session: Arc<TransportSession>,
    shutdown: CancellationToken,
    supervisors: Mutex<Vec<JoinHandle<()>>>,
}

impl SocketHandler {
    pub fn new(
        config: SocketConfig,
        identity: Arc<dyn IdentityProvider>,
        handler: Arc<dyn EventHandler>,
    ) -> Self {
        let shutdown = CancellationToken::new();
        let start_now = config.socket_enabled;
        let dispatcher = Arc::new(EventDispatcher::new(handler));
        let session = Arc::new(TransportSession::new(
            config,
            identity,
            dispatcher,
            shutdown.clone(),
        ));

        let this = Self {
            session,
            shutdown,
            supervisors: Mutex::new(Vec::new()),
        };

        if start_now {
            if tokio::runtime::Handle::try_current().is_ok() {
                this.start_supervisors();
            } else {
                tracing::warn!("No Tokio runtime, supervisory loops deferred to connect");
            }
        }
        this
    }

    /// Start the heartbeat and reconnect loops once
    fn start_supervisors(&self) {
        let mut supervisors = self.supervisors.lock();
        if !supervisors.is_empty() || self.shutdown.is_cancelled() {
            return;
        }

        let config = self.session.config();
        supervisors.push(spawn_heartbeat(
            Arc::clone(&self.session),
            config.heartbeat_interval,
            self.shutdown.child_token(),
        ));
        supervisors.push(spawn_reconnect(
            Arc::clone(&self.session),
            config.reconnect_interval,
            self.shutdown.child_token(),
        ));
        tracing::debug!(
            heartbeat_secs = config.heartbeat_interval.as_secs(),
            reconnect_secs = config.reconnect_interval.as_secs(),
            "Supervisory loops started"
        );
    }

    /// Open a new socket, replacing any current one
    ///
    /// Returns `NoSession` without touching the network when the identity holds
    /// no session token, and `Superseded` when `close` ran during the handshake.
    ///
    /// # Errors
    /// Returns the handshake error after logging it
    pub async fn connect(&self) -> SocketResult<ConnectOutcome> {
        self.start_supervisors();
        self.session.connect().await
    }

    /// Send a text frame on the current socket
    ///
    /// # Errors
    /// `NotConnected` when no socket is open, or the transport error
    pub async fn send(&self, frame: &str) -> SocketResult<()> {
        self.session.send(frame).await
    }

    /// Close the current socket and stop forced reconnects
    ///
    /// # Errors
    /// Returns the transport error after logging it
    pub async fn close(&self) -> SocketResult<CloseOutcome> {
        self.session.close().await
    }

    pub async fn is_active(&self) -> bool {
        self.session.is_active().await
    }

    pub async fn is_connected(&self) -> bool {
        self.session.is_connected().await
    }

    /// Full signed URL of the open socket
    pub async fn current_url(&self) -> Option<String> {
        self.session.current_url().await
    }

    /// Base endpoint picked by the latest connect attempt
    pub async fn base_url(&self) -> Option<String> {
        self.session.base_url().await
    }

    pub fn supervisors_running(&self) -> bool {
        let supervisors = self.supervisors.lock();
        !supervisors.is_empty() && supervisors.iter().all(|h| !h.is_finished())
    }

    /// Stop the supervisory loops and close the socket
    ///
    /// # Errors
    /// Returns the close error after logging it
    pub async fn shutdown(&self) -> SocketResult<CloseOutcome> {
        self.shutdown.cancel();
        let handles: Vec<_> = self.supervisors.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }
        self.session.close().await
    }
}

impl Drop for SocketHandler {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl std::fmt::Debug for SocketHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketHandler")
            .field("session", &self.session)
            .field("supervisors", &self.supervisors.lock().len())
            .finish()
    }
}
