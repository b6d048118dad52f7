//! Auto-dismiss timers.
//!
//! A timer is a one-shot tokio task racing a sleep against a
//! `CancellationToken`. On expiry it reports a `DismissTicket` back to the
//! task that owns the queue; it never touches the queue itself.

use crate::models::NotificationId;
use log::trace;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Identifies one activation of one notification.
///
/// The generation is bumped every time the active slot is filled, so a
/// ticket from an earlier activation never matches the current one even if
/// ids were reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DismissTicket {
    pub id: NotificationId,
    pub generation: u64,
}

/// Cancels a scheduled expiry.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// A handle not attached to any running timer.
    pub fn detached() -> Self {
        Self::new(CancellationToken::new())
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Schedules delayed delivery of a ticket back to the queue owner.
#[cfg_attr(test, mockall::automock)]
pub trait Scheduler: Send {
    fn schedule(&mut self, ticket: DismissTicket, after: Duration) -> TimerHandle;
}

/// Scheduler backed by tokio tasks. Must be used inside a tokio runtime.
pub struct TokioScheduler {
    expired: UnboundedSender<DismissTicket>,
    shutdown: CancellationToken,
}

impl TokioScheduler {
    /// Timers are children of `shutdown` and stop with the session.
    pub fn new(expired: UnboundedSender<DismissTicket>, shutdown: CancellationToken) -> Self {
        Self { expired, shutdown }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, ticket: DismissTicket, after: Duration) -> TimerHandle {
        let token = self.shutdown.child_token();
        let cancelled = token.clone();
        let expired = self.expired.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = sleep(after) => {
                    trace!("Timer for {} (gen {}) elapsed", ticket.id, ticket.generation);
                    // Receiver is gone once the session has ended
                    let _ = expired.send(ticket);
                }
                _ = cancelled.cancelled() => {
                    trace!("Timer for {} (gen {}) cancelled", ticket.id, ticket.generation);
                }
            }
        });

        TimerHandle::new(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn ticket() -> DismissTicket {
        DismissTicket {
            id: NotificationId::new(),
            generation: 1,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_delivers_ticket_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx, CancellationToken::new());
        let ticket = ticket();

        scheduler.schedule(ticket, Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(rx.try_recv().unwrap(), ticket);
    }

    #[tokio::test(start_paused = true)]
    async fn test_receiver_is_woken_by_expiry() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx, CancellationToken::new());
        let ticket = ticket();
        scheduler.schedule(ticket, Duration::from_millis(100));

        let mut recv = tokio_test::task::spawn(rx.recv());
        tokio_test::assert_pending!(recv.poll());

        tokio::time::sleep(Duration::from_millis(101)).await;
        assert!(recv.is_woken());
        tokio_test::assert_ready_eq!(recv.poll(), Some(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx, CancellationToken::new());

        let handle = scheduler.schedule(ticket(), Duration::from_millis(100));
        handle.cancel();
        assert!(handle.is_cancelled());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_shutdown_cancels_pending_timers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let mut scheduler = TokioScheduler::new(tx, shutdown.clone());

        let handle = scheduler.schedule(ticket(), Duration::from_secs(3));
        shutdown.cancel();
        assert!(handle.is_cancelled());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
