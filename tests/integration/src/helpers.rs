//! Test helpers for integration tests
//!
//! Provides a local WebSocket server that captures handshake requests, records
//! inbound frames, and pushes frames to the most recent connection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::HeaderMap;
use tokio_tungstenite::tungstenite::Message;

/// Default wait for an expected event
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Captured handshake request
#[derive(Debug, Clone)]
pub struct Handshake {
    pub uri: String,
    pub headers: HeaderMap,
}

impl Handshake {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Raw `signbody` query value
    pub fn signbody(&self) -> Option<&str> {
        self.uri.split_once("signbody=").map(|(_, v)| v)
    }
}

/// Frame received by the test server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFrame {
    Text(String),
    Binary(Vec<u8>),
    Ping(Vec<u8>),
    Closed,
}

/// Local WebSocket server
pub struct TestSocketServer {
    pub addr: SocketAddr,
    handshakes: mpsc::UnboundedReceiver<Handshake>,
    frames: mpsc::UnboundedReceiver<ServerFrame>,
    current: Arc<Mutex<Option<mpsc::UnboundedSender<Message>>>>,
    _handle: JoinHandle<()>,
}

impl TestSocketServer {
    /// Start a server on an ephemeral loopback port
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let (handshake_tx, handshakes) = mpsc::unbounded_channel();
        let (frame_tx, frames) = mpsc::unbounded_channel();
        let current = Arc::new(Mutex::new(None));
        let current_accept = Arc::clone(&current);

        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve_connection(
                    stream,
                    handshake_tx.clone(),
                    frame_tx.clone(),
                    Arc::clone(&current_accept),
                ));
            }
        });

        Ok(Self {
            addr,
            handshakes,
            frames,
            current,
            _handle: handle,
        })
    }

    /// Base endpoint for the client configuration
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Wait for the next handshake
    pub async fn next_handshake(&mut self) -> Result<Handshake> {
        tokio::time::timeout(EVENT_TIMEOUT, self.handshakes.recv())
            .await
            .context("timed out waiting for handshake")?
            .context("server stopped")
    }

    /// Assert that no handshake arrives within `wait`
    pub async fn expect_no_handshake(&mut self, wait: Duration) -> Result<()> {
        match tokio::time::timeout(wait, self.handshakes.recv()).await {
            Err(_) => Ok(()),
            Ok(handshake) => anyhow::bail!("unexpected handshake: {handshake:?}"),
        }
    }

    /// Wait for the next frame the client sent
    pub async fn next_frame(&mut self) -> Result<ServerFrame> {
        tokio::time::timeout(EVENT_TIMEOUT, self.frames.recv())
            .await
            .context("timed out waiting for frame")?
            .context("server stopped")
    }

    /// Wait for the next text frame, skipping anything else
    pub async fn next_text(&mut self) -> Result<String> {
        loop {
            if let ServerFrame::Text(text) = self.next_frame().await? {
                return Ok(text);
            }
        }
    }

    /// Wait for the next ping payload, skipping anything else
    pub async fn next_ping(&mut self) -> Result<Vec<u8>> {
        loop {
            if let ServerFrame::Ping(payload) = self.next_frame().await? {
                return Ok(payload);
            }
        }
    }

    /// Wait until a connection reports closed
    pub async fn wait_closed(&mut self) -> Result<()> {
        loop {
            if self.next_frame().await? == ServerFrame::Closed {
                return Ok(());
            }
        }
    }

    /// Push a text frame to the most recent connection
    pub fn push_text(&self, text: impl Into<String>) -> Result<()> {
        self.push(Message::Text(text.into()))
    }

    /// Push a binary frame to the most recent connection
    pub fn push_binary(&self, bytes: impl Into<Vec<u8>>) -> Result<()> {
        self.push(Message::Binary(bytes.into()))
    }

    /// Close the most recent connection from the server side
    pub fn disconnect(&self) -> Result<()> {
        self.push(Message::Close(None))
    }

    fn push(&self, message: Message) -> Result<()> {
        let current = self.current.lock();
        let tx = current.as_ref().context("no client connected")?;
        tx.send(message).context("connection gone")
    }
}

async fn serve_connection(
    stream: TcpStream,
    handshakes: mpsc::UnboundedSender<Handshake>,
    frames: mpsc::UnboundedSender<ServerFrame>,
    current: Arc<Mutex<Option<mpsc::UnboundedSender<Message>>>>,
) {
    let callback = move |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
        let _ = handshakes.send(Handshake {
            uri: request.uri().to_string(),
            headers: request.headers().clone(),
        });
        Ok(response)
    };

    let Ok(ws) = tokio_tungstenite::accept_hdr_async(stream, callback).await else {
        return;
    };
    let (mut sink, mut source) = ws.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    *current.lock() = Some(tx);

    loop {
        tokio::select! {
            outgoing = rx.recv() => {
                let Some(message) = outgoing else { break };
                let closing = matches!(message, Message::Close(_));
                if sink.send(message).await.is_err() || closing {
                    break;
                }
            }
            incoming = source.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let _ = frames.send(ServerFrame::Text(text));
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        let _ = frames.send(ServerFrame::Binary(bytes));
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        let _ = frames.send(ServerFrame::Ping(payload));
                    }
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    let _ = frames.send(ServerFrame::Closed);
}

/// Poll `check` until it holds or `EVENT_TIMEOUT` elapses
pub async fn eventually<F, Fut>(mut check: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    tokio::time::timeout(EVENT_TIMEOUT, async {
        while !check().await {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .context("condition never held")
}
