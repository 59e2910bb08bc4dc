//! Socket error types

use ndc_core::FrameError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Socket error type
///
/// Returned by connect, send, and close after the event has been logged. Supervisory
/// loops never propagate these further.
#[derive(Debug, Error)]
pub enum SocketError {
    /// Identity holds no session token
    #[error("No session token available")]
    MissingSessionToken,

    /// No socket is currently open
    #[error("Socket not connected")]
    NotConnected,

    /// URL or header construction failed
    #[error("Invalid connection request: {0}")]
    InvalidRequest(String),

    /// TLS connector could not be built
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    /// Transport-level failure
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// A handshake, write, or close did not finish in time
    #[error("Socket {0} timed out")]
    Timeout(&'static str),

    /// Inbound frame could not be decoded
    #[error("Frame decode error: {0}")]
    Decode(#[from] FrameError),
}

impl SocketError {
    /// Whether this error only means "currently disconnected"
    pub fn is_disconnected(&self) -> bool {
        matches!(self, Self::NotConnected | Self::MissingSessionToken)
    }
}

impl From<tungstenite::Error> for SocketError {
    fn from(e: tungstenite::Error) -> Self {
        match e {
            tungstenite::Error::Url(e) => Self::InvalidRequest(e.to_string()),
            tungstenite::Error::HttpFormat(e) => Self::InvalidRequest(e.to_string()),
            other => Self::WebSocket(other.to_string()),
        }
    }
}

/// Socket result type
pub type SocketResult<T> = Result<T, SocketError>;
