//! Per-session notification service.
//!
//! The service task owns the [`NotificationQueue`]. Producers hold a
//! cloneable [`NotificationHandle`] and every call is sent over a channel,
//! so the queue only ever mutates on the service task.

use super::queue::{Message, Notification, NotificationQueue, Renderer};
use super::timer::{DismissTicket, TokioScheduler};
use crate::config::NotificationConfig;
use crate::models::{NotificationId, NotificationItem};
use log::{debug, info, trace, warn};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Debug)]
enum Command {
    Enqueue(Notification),
    DismissActive,
    Message(Message),
    Withdraw(NotificationId),
    SetProgress(NotificationId, Option<f32>),
    Clear,
}

#[derive(Debug, Clone)]
enum CommandSender {
    Bounded(mpsc::Sender<Command>),
    Unbounded(mpsc::UnboundedSender<Command>),
}

enum CommandReceiver {
    Bounded(mpsc::Receiver<Command>),
    Unbounded(mpsc::UnboundedReceiver<Command>),
}

impl CommandReceiver {
    async fn recv(&mut self) -> Option<Command> {
        match self {
            CommandReceiver::Bounded(rx) => rx.recv().await,
            CommandReceiver::Unbounded(rx) => rx.recv().await,
        }
    }
}

fn command_channel(capacity: Option<usize>) -> (CommandSender, CommandReceiver) {
    match capacity {
        Some(capacity) if capacity > 0 => {
            let (tx, rx) = mpsc::channel(capacity);
            (CommandSender::Bounded(tx), CommandReceiver::Bounded(rx))
        }
        _ => {
            let (tx, rx) = mpsc::unbounded_channel();
            (CommandSender::Unbounded(tx), CommandReceiver::Unbounded(rx))
        }
    }
}

/// Publishes every active-item change on an unbounded channel.
///
/// Frames are never dropped, so the receiving side always ends up showing
/// what the queue shows. The channel closes when the queue is dropped.
pub struct ChannelRenderer {
    updates: mpsc::UnboundedSender<Option<NotificationItem>>,
}

impl Renderer for ChannelRenderer {
    fn render(&mut self, active: Option<&NotificationItem>) {
        if self.updates.send(active.cloned()).is_err() {
            trace!("Active item update dropped: no receiver");
        }
    }
}

pub fn render_to_channel() -> (
    ChannelRenderer,
    mpsc::UnboundedReceiver<Option<NotificationItem>>,
) {
    let (updates, rx) = mpsc::unbounded_channel();
    (ChannelRenderer { updates }, rx)
}

/// Producer-side access to a session's queue.
///
/// Every method is fire-and-forget. Calls made after the session ended are
/// dropped.
#[derive(Debug, Clone)]
pub struct NotificationHandle {
    sender: CommandSender,
    session_id: Uuid,
}

impl NotificationHandle {
    pub fn enqueue(&self, notification: impl Into<Notification>) {
        self.send_command(Command::Enqueue(notification.into()));
    }

    pub fn dismiss_active(&self) {
        self.send_command(Command::DismissActive);
    }

    pub fn dismiss(&self, id: NotificationId) {
        self.send(Message::Dismiss(id));
    }

    pub fn confirm(&self, id: NotificationId) {
        self.send(Message::Confirm(id));
    }

    pub fn cancel(&self, id: NotificationId) {
        self.send(Message::Cancel(id));
    }

    pub fn perform_action(&self, id: NotificationId) {
        self.send(Message::Action(id));
    }

    pub fn withdraw(&self, id: NotificationId) {
        self.send_command(Command::Withdraw(id));
    }

    pub fn set_progress(&self, id: NotificationId, progress: Option<f32>) {
        self.send_command(Command::SetProgress(id, progress));
    }

    pub fn clear(&self) {
        self.send_command(Command::Clear);
    }

    /// Forwards a view message.
    pub fn send(&self, message: Message) {
        self.send_command(Command::Message(message));
    }

    /// True once the service has stopped.
    pub fn is_closed(&self) -> bool {
        match &self.sender {
            CommandSender::Bounded(tx) => tx.is_closed(),
            CommandSender::Unbounded(tx) => tx.is_closed(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn send_command(&self, command: Command) {
        match &self.sender {
            CommandSender::Bounded(tx) => match tx.try_send(command) {
                Ok(()) => {}
                Err(TrySendError::Full(command)) => {
                    warn!(
                        "[{}] Notification channel full, dropping {:?}",
                        self.session_id, command
                    );
                }
                Err(TrySendError::Closed(command)) => {
                    debug!("[{}] Session ended, dropping {:?}", self.session_id, command);
                }
            },
            CommandSender::Unbounded(tx) => {
                if let Err(err) = tx.send(command) {
                    debug!("[{}] Session ended, dropping {:?}", self.session_id, err.0);
                }
            }
        }
    }
}

/// Owns the queue and applies producer commands and timer expiries in
/// arrival order.
pub struct NotificationService {
    queue: NotificationQueue,
    commands: CommandReceiver,
    expired: mpsc::UnboundedReceiver<DismissTicket>,
    shutdown: CancellationToken,
    session_id: Uuid,
}

impl NotificationService {
    /// Must be called inside a tokio runtime: toast timers are spawned as
    /// tasks. Cancelling `shutdown` ends the session.
    pub fn new(
        config: &NotificationConfig,
        renderer: impl Renderer + 'static,
        shutdown: CancellationToken,
    ) -> (Self, NotificationHandle) {
        let session_id = Uuid::new_v4();
        let (sender, commands) = command_channel(config.channel_capacity);
        let (expired_tx, expired) = mpsc::unbounded_channel();
        let scheduler = TokioScheduler::new(expired_tx, shutdown.child_token());
        let queue = NotificationQueue::new(config.toast_durations, renderer, scheduler);

        let service = Self {
            queue,
            commands,
            expired,
            shutdown,
            session_id,
        };
        let handle = NotificationHandle { sender, session_id };
        (service, handle)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Runs until the shutdown token fires or every handle is dropped.
    pub async fn run(mut self) {
        info!("[{}] Notification session started", self.session_id);

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    info!(
                        "[{}] Shutdown signal received, closing notification session",
                        self.session_id
                    );
                    break;
                }
                Some(ticket) = self.expired.recv() => {
                    self.queue.expire(ticket);
                }
                command = self.commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => {
                        debug!("[{}] All notification handles dropped", self.session_id);
                        break;
                    }
                },
            }
        }

        self.queue.dispose();
        info!("[{}] Notification session stopped", self.session_id);
    }

    /// Spawns [`run`](Self::run) on the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Enqueue(notification) => self.queue.enqueue(notification),
            Command::DismissActive => {
                self.queue.dismiss_active();
            }
            Command::Message(message) => self.queue.handle_message(&message),
            Command::Withdraw(id) => {
                self.queue.withdraw(id);
            }
            Command::SetProgress(id, progress) => {
                self.queue.set_progress(id, progress);
            }
            Command::Clear => self.queue.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoadingDialog, Toast};
    use crate::notifications::render_with;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn recording() -> (impl Renderer, Arc<Mutex<Vec<Option<NotificationId>>>>) {
        let renders: Arc<Mutex<Vec<Option<NotificationId>>>> = Arc::default();
        let sink = renders.clone();
        let renderer = render_with(move |active: Option<&NotificationItem>| {
            sink.lock().unwrap().push(active.map(|item| item.id()));
        });
        (renderer, renders)
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_channel_drops_when_full() {
        let config = NotificationConfig {
            channel_capacity: Some(1),
            ..NotificationConfig::default()
        };
        let (renderer, renders) = recording();
        let (service, handle) =
            NotificationService::new(&config, renderer, CancellationToken::new());

        // Service not running yet, so the second send overflows
        let first = Toast::info("kept");
        let first_id = first.id();
        handle.enqueue(first);
        handle.enqueue(Toast::info("dropped"));

        let task = service.spawn();
        tokio::time::sleep(Duration::from_millis(1)).await;
        drop(handle);
        task.await.unwrap();

        let renders = renders.lock().unwrap();
        assert_eq!(renders.first(), Some(&Some(first_id)));
        assert!(!renders.iter().any(|r| matches!(r, Some(id) if *id != first_id)));
    }

    #[tokio::test]
    async fn test_handle_reports_closed_after_shutdown() {
        let (renderer, _) = recording();
        let shutdown = CancellationToken::new();
        let (service, handle) =
            NotificationService::new(&NotificationConfig::default(), renderer, shutdown.clone());
        let task = service.spawn();

        assert!(!handle.is_closed());
        shutdown.cancel();
        task.await.unwrap();
        assert!(handle.is_closed());

        // Silently dropped
        handle.enqueue(Toast::error("after shutdown"));
    }

    #[tokio::test]
    async fn test_channel_renderer_keeps_every_frame() {
        let (renderer, mut updates) = render_to_channel();
        let (service, handle) = NotificationService::new(
            &NotificationConfig::default(),
            renderer,
            CancellationToken::new(),
        );
        let task = service.spawn();

        for i in 0..150 {
            handle.enqueue(LoadingDialog::new(format!("Job {}", i)));
        }
        for _ in 0..150 {
            handle.dismiss_active();
        }
        drop(handle);
        task.await.unwrap();

        let mut frames = Vec::new();
        while let Some(frame) = updates.recv().await {
            frames.push(frame.map(|item| item.id()));
        }
        assert_eq!(frames.len(), 151);
        assert_eq!(frames.last(), Some(&None));
    }

    #[tokio::test]
    async fn test_session_ids_differ() {
        let (r1, _) = recording();
        let (r2, _) = recording();
        let (_, a) =
            NotificationService::new(&NotificationConfig::default(), r1, CancellationToken::new());
        let (_, b) =
            NotificationService::new(&NotificationConfig::default(), r2, CancellationToken::new());
        assert_ne!(a.session_id(), b.session_id());
    }
}
