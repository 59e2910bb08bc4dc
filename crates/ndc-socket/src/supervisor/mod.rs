//! Supervisory loops
//!
//! Two periodic tasks keep the session alive: a heartbeat that writes the keep-alive
//! frame, and a reconnect supervisor that replaces the socket on a fixed period while
//! the session is active. Both talk to the session through [`SessionControl`].

mod heartbeat;
mod reconnect;

pub use heartbeat::{heartbeat_tick, spawn_heartbeat, HEARTBEAT_FRAME};
pub use reconnect::{reconnect_tick, spawn_reconnect};

use crate::error::SocketResult;
use crate::transport::{CloseOutcome, ConnectOutcome, TransportSession};
use async_trait::async_trait;

/// Session operations the supervisory loops rely on
#[async_trait]
pub trait SessionControl: Send + Sync {
    /// Whether the session wants to stay connected
    async fn is_active(&self) -> bool;

    /// Whether a socket is currently installed
    async fn has_socket(&self) -> bool;

    /// Write the keep-alive frame; `Ok(false)` when no socket is installed
    async fn send_heartbeat(&self) -> SocketResult<bool>;

    async fn close(&self) -> SocketResult<CloseOutcome>;

    async fn connect(&self) -> SocketResult<ConnectOutcome>;
}

#[async_trait]
impl SessionControl for TransportSession {
    async fn is_active(&self) -> bool {
        TransportSession::is_active(self).await
    }

    async fn has_socket(&self) -> bool {
        TransportSession::is_connected(self).await
    }

    async fn send_heartbeat(&self) -> SocketResult<bool> {
        TransportSession::send_heartbeat(self, HEARTBEAT_FRAME).await
    }

    async fn close(&self) -> SocketResult<CloseOutcome> {
        TransportSession::close(self).await
    }

    async fn connect(&self) -> SocketResult<ConnectOutcome> {
        TransportSession::connect(self).await
    }
}
