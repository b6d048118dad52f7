use crate::models::NotificationItem;
use crate::notifications::{NotificationHandle, NotificationMessage};
use iced::futures::channel::mpsc::Sender;
use iced::futures::SinkExt;
use log::debug;
use tokio::sync::mpsc::UnboundedReceiver;

/// Unified application message type
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Notification Session Messages =====
    /// The session task is running and can take notifications
    SessionStarted(NotificationHandle),
    /// The active notification changed
    ActiveChanged(Option<NotificationItem>),
    /// The user answered the active notification
    Notification(NotificationMessage),

    // ===== Form Input Messages =====
    /// Update meeting title input field
    TitleChanged(String),

    // ===== Demo Action Messages =====
    /// Create a meeting with the current title
    CreateMeeting,
    /// Submit the current title as an approval request
    SubmitRequest,
    /// Delete the meeting with the current title
    DeleteMeeting,
    /// Show a plain informational toast
    ShowTip,

    // ===== Async Operation Results =====
    /// A spawned operation finished
    OperationFinished(Result<(), String>),
}

/// Forwards active-item changes to the subscription output, waiting for
/// room instead of dropping frames. Returns once the session has stopped
/// or the UI side has gone away.
pub async fn forward_active_changes(
    mut updates: UnboundedReceiver<Option<NotificationItem>>,
    mut output: Sender<Message>,
) {
    while let Some(active) = updates.recv().await {
        if output.send(Message::ActiveChanged(active)).await.is_err() {
            debug!("Subscription output closed, no longer forwarding notifications");
            break;
        }
    }
}
