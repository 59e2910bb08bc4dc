//! Forced reconnect supervisor

use super::SessionControl;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Run one reconnect check
///
/// When the session is active, the current socket is closed and a new one opened.
/// An inactive session is left alone. Close and connect failures are logged by the
/// session and do not stop the supervisor. Returns whether a reconnect was attempted.
pub async fn reconnect_tick<S>(session: &S) -> bool
where
    S: SessionControl + ?Sized,
{
    if !session.is_active().await {
        tracing::trace!("Session inactive, reconnect skipped");
        return false;
    }

    if let Err(e) = session.close().await {
        tracing::debug!(error = %e, "Close before reconnect failed");
    }

    tracing::info!("Reconnecting socket");
    if let Err(e) = session.connect().await {
        tracing::debug!(error = %e, "Reconnect failed");
    }
    true
}

/// Spawn the reconnect supervisor
///
/// The first check runs one `period` after spawning. The loop ends when `shutdown`
/// is cancelled.
pub fn spawn_reconnect<S>(
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
                    reconnect_tick(session.as_ref()).await;
                }
            }
        }

        tracing::debug!("Reconnect supervisor stopped");
    })
}
