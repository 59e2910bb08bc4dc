//! Transport session
//!
//! Holds at most one live socket. The session lock only guards state transitions;
//! network writes go through a per-socket sink lock and are bounded by the configured
//! write timeout, so a stalled peer never blocks close or reconnect.

use super::auth::AuthHeaders;
use super::endpoint::EndpointSelector;
use super::receiver::{receive_loop, WsStream};
use crate::dispatch::EventDispatcher;
use crate::error::{SocketError, SocketResult};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use ndc_common::SocketConfig;
use ndc_core::IdentityProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async_tls_with_config, Connector};
use tokio_util::sync::CancellationToken;

type WsSink = SplitSink<WsStream, Message>;

/// Result of a connect call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A new socket is installed at `url`
    Connected { url: String },
    /// The identity holds no session token; nothing was attempted
    NoSession,
    /// The session was closed while the handshake was in flight; the new socket
    /// was discarded
    Superseded,
}

/// Result of a close call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// There was no socket to close
    AlreadyClosed,
}

struct LiveSocket {
    url: String,
    sink: Arc<Mutex<WsSink>>,
    reader: CancellationToken,
}

impl LiveSocket {
    /// Stop the receive loop and send a close frame within `limit`
    async fn shutdown(self, limit: Duration) -> SocketResult<()> {
        self.reader.cancel();
        let close = async { self.sink.lock().await.close().await };
        match timeout(limit, close).await {
            Ok(
                Ok(())
                | Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed),
            ) => Ok(()),
            Ok(Err(e)) => Err(SocketError::from(e)),
            Err(_) => Err(SocketError::Timeout("close")),
        }
    }
}

#[derive(Default)]
struct SessionState {
    base_url: Option<String>,
    active: bool,
    socket: Option<LiveSocket>,
    /// Bumped by every close; a handshake started under an older value is discarded
    generation: u64,
}

/// The single live connection of a socket handler
pub struct TransportSession {
    config: SocketConfig,
    identity: Arc<dyn IdentityProvider>,
    dispatcher: Arc<EventDispatcher>,
    endpoints: EndpointSelector,
    shutdown: CancellationToken,
    state: Mutex<SessionState>,
}

impl TransportSession {
    /// Create a disconnected session
    ///
    /// Receive loops are children of `shutdown`; cancelling it stops every reader.
    pub fn new(
        config: SocketConfig,
        identity: Arc<dyn IdentityProvider>,
        dispatcher: Arc<EventDispatcher>,
        shutdown: CancellationToken,
    ) -> Self {
        let endpoints = EndpointSelector::new(config.endpoints.iter().cloned());
        Self {
            config,
            identity,
            dispatcher,
            endpoints,
            shutdown,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Open a new authenticated socket
    ///
    /// Picks a fresh endpoint, builds the signed URL and headers, and performs the
    /// handshake within the connect timeout. A previously installed socket is closed
    /// and replaced. If the session is closed while the handshake is in flight, the
    /// new socket is discarded and the session stays inactive.
    ///
    /// # Errors
    /// Returns the handshake error after logging it; the session state is unchanged.
    pub async fn connect(&self) -> SocketResult<ConnectOutcome> {
        let device_id = self.identity.connect_device_id();
        let unix_time = chrono::Utc::now().timestamp();
        let auth = match AuthHeaders::build(
            self.identity.as_ref(),
            device_id,
            unix_time,
            self.config.language.as_str(),
        ) {
            Ok(auth) => auth,
            Err(SocketError::MissingSessionToken) => {
                tracing::info!("No session token, socket not connected");
                return Ok(ConnectOutcome::NoSession);
            }
            Err(e) => return Err(e),
        };

        let Some(base_url) = self.endpoints.select().map(String::from) else {
            let e = SocketError::InvalidRequest("no socket endpoints configured".into());
            tracing::error!(error = %e, "Socket connect failed");
            return Err(e);
        };
        let url = auth.signed_url(&base_url);
        let generation = {
            let mut state = self.state.lock().await;
            state.base_url = Some(base_url);
            state.generation
        };

        let stream = match self.open(&url, &auth).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Socket connect failed");
                return Err(e);
            }
        };

        let (sink, source) = stream.split();
        let reader = self.shutdown.child_token();
        let socket = LiveSocket {
            url: url.clone(),
            sink: Arc::new(Mutex::new(sink)),
            reader: reader.clone(),
        };

        let installed = {
            let mut state = self.state.lock().await;
            if state.generation == generation {
                state.active = true;
                Ok(state.socket.replace(socket))
            } else {
                Err(socket)
            }
        };

        match installed {
            Ok(previous) => {
                tokio::spawn(receive_loop(
                    source,
                    Arc::clone(&self.dispatcher),
                    url.clone(),
                    reader,
                ));
                if let Some(previous) = previous {
                    if let Err(e) = previous.shutdown(self.config.write_timeout).await {
                        tracing::debug!(error = %e, "Replaced socket did not close cleanly");
                    }
                }
                tracing::info!(url = %url, "Socket connected");
                Ok(ConnectOutcome::Connected { url })
            }
            Err(discarded) => {
                drop(source);
                if let Err(e) = discarded.shutdown(self.config.write_timeout).await {
                    tracing::debug!(error = %e, "Discarded socket did not close cleanly");
                }
                tracing::info!(url = %url, "Session closed during handshake, socket discarded");
                Ok(ConnectOutcome::Superseded)
            }
        }
    }

    async fn open(&self, url: &str, auth: &AuthHeaders) -> SocketResult<WsStream> {
        let mut request = url.into_client_request()?;
        auth.apply(request.headers_mut())?;

        let connector = if self.config.accept_invalid_certs && url.starts_with("wss") {
            let tls = native_tls::TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()?;
            Some(Connector::NativeTls(tls))
        } else {
            None
        };

        let handshake = connect_async_tls_with_config(request, None, false, connector);
        let (stream, _response) = timeout(self.config.connect_timeout, handshake)
            .await
            .map_err(|_| SocketError::Timeout("handshake"))??;
        Ok(stream)
    }

    /// Send a text frame on the current socket
    ///
    /// # Errors
    /// `NotConnected` when no socket is installed, or the transport error after logging it
    pub async fn send(&self, frame: &str) -> SocketResult<()> {
        tracing::info!(frame = %frame, "Sending frame");
        self.write(vec![Message::Text(frame.to_owned())]).await
    }

    /// Send the keep-alive if a socket is installed
    ///
    /// Writes `frame` as a text frame followed by a WebSocket ping carrying the same
    /// payload. Returns `Ok(false)` when there was nothing to send on.
    pub async fn send_heartbeat(&self, frame: &str) -> SocketResult<bool> {
        let messages = vec![
            Message::Text(frame.to_owned()),
            Message::Ping(frame.as_bytes().to_vec()),
        ];
        match self.write(messages).await {
            Ok(()) => {
                tracing::trace!("Heartbeat sent");
                Ok(true)
            }
            Err(SocketError::NotConnected) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn write(&self, messages: Vec<Message>) -> SocketResult<()> {
        let (url, sink) = {
            let state = self.state.lock().await;
            let Some(socket) = state.socket.as_ref() else {
                tracing::debug!("Socket not connected, frame dropped");
                return Err(SocketError::NotConnected);
            };
            (socket.url.clone(), Arc::clone(&socket.sink))
        };

        let write = async {
            let mut sink = sink.lock().await;
            for message in messages {
                sink.feed(message).await?;
            }
            sink.flush().await?;
            Ok::<(), tungstenite::Error>(())
        };
        let result = match timeout(self.config.write_timeout, write).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(SocketError::from(e)),
            Err(_) => Err(SocketError::Timeout("write")),
        };

        if let Err(e) = &result {
            tracing::error!(url = %url, error = %e, "Failed to send frame");
        }
        result
    }

    /// Close the current socket and mark the session inactive
    ///
    /// Idempotent: closing an absent socket returns `AlreadyClosed`. Also cancels any
    /// handshake in flight.
    ///
    /// # Errors
    /// Returns the transport error after logging it; the socket is dropped either way.
    pub async fn close(&self) -> SocketResult<CloseOutcome> {
        let socket = {
            let mut state = self.state.lock().await;
            state.active = false;
            state.generation = state.generation.wrapping_add(1);
            state.socket.take()
        };

        let Some(socket) = socket else {
            tracing::info!("Socket already closed");
            return Ok(CloseOutcome::AlreadyClosed);
        };

        let url = socket.url.clone();
        match socket.shutdown(self.config.write_timeout).await {
            Ok(()) => {
                tracing::info!(url = %url, "Socket closed");
                Ok(CloseOutcome::Closed)
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Can't close connection");
                Err(e)
            }
        }
    }

    /// Whether the session wants to stay connected
    pub async fn is_active(&self) -> bool {
        self.state.lock().await.active
    }

    /// Whether a socket is currently installed
    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.socket.is_some()
    }

    /// Full signed URL of the installed socket
    pub async fn current_url(&self) -> Option<String> {
        self.state.lock().await.socket.as_ref().map(|s| s.url.clone())
    }

    /// Base endpoint picked by the most recent connect attempt
    pub async fn base_url(&self) -> Option<String> {
        self.state.lock().await.base_url.clone()
    }

    pub fn config(&self) -> &SocketConfig {
        &self.config
    }
}

impl std::fmt::Debug for TransportSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportSession")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}
