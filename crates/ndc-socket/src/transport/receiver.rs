//! Inbound receive loop

use crate::dispatch::EventDispatcher;
use futures_util::stream::SplitStream;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub(crate) type WsSource = SplitStream<WsStream>;

/// Read frames until the peer closes, the transport fails, or the session cancels us
///
/// Ending the loop does not touch the session state: the socket stays installed
/// until the next close or forced reconnect replaces it.
pub(crate) async fn receive_loop(
    mut stream: WsSource,
    dispatcher: Arc<EventDispatcher>,
    url: String,
    cancel: CancellationToken,
) {
    loop {
        let message = tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!(url = %url, "Receive loop cancelled");
                return;
            }
            message = stream.next() => message,
        };

        match message {
            Some(Ok(Message::Text(text))) => {
                dispatcher.dispatch_text(&text);
            }
            Some(Ok(Message::Binary(bytes))) => {
                dispatcher.dispatch_bytes(&bytes);
            }
            Some(Ok(Message::Ping(_))) => {
                tracing::trace!(url = %url, "Ping received");
            }
            Some(Ok(Message::Pong(_))) => {
                tracing::trace!(url = %url, "Pong received");
            }
            Some(Ok(Message::Close(frame))) => {
                let (code, reason) = frame
                    .map(|f| (Some(u16::from(f.code)), f.reason.to_string()))
                    .unwrap_or_default();
                tracing::warn!(
                    url = %url,
                    code = ?code,
                    reason = %reason,
                    "Socket closed by peer"
                );
                return;
            }
            Some(Ok(Message::Frame(_))) => {}
            Some(Err(e)) => {
                tracing::error!(url = %url, error = %e, "Critical error in socket");
                return;
            }
            None => {
                tracing::warn!(url = %url, "Socket stream ended");
                return;
            }
        }
    }
}
