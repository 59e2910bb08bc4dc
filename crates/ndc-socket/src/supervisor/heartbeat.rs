//! Heartbeat loop

use super::SessionControl;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Keep-alive frame written on every heartbeat tick
pub const HEARTBEAT_FRAME: &str = r#"{"t": 116, "o": {"threadChannelUserInfoList": []}}"#;

/// Run one heartbeat
///
/// Sends the keep-alive frame when a socket is installed. A socket vanishing between
/// the check and the write is not an error. Errors are already logged by the session
/// and never escape the tick. Returns whether a frame was written.
pub async fn heartbeat_tick<S>(session: &S) -> bool
where
    S: SessionControl + ?Sized,
{
    if !session.has_socket().await {
        tracing::trace!("No socket, heartbeat skipped");
        return false;
    }

    match session.send_heartbeat().await {
        Ok(sent) => sent,
        Err(e) => {
            tracing::debug!(error = %e, "Heartbeat failed");
            false
        }
    }
}

/// Spawn the heartbeat loop
///
/// The first tick fires one `period` after spawning. The loop ends when `shutdown`
/// is cancelled.
pub fn spawn_heartbeat<S>(
    session: Arc<S>,
    period: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()>
where
    S: SessionControl + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    heartbeat_tick(session.as_ref()).await;
                }
            }
        }

        tracing::debug!("Heartbeat loop stopped");
    })
}
