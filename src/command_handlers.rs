//! Command handlers module
//!
//! Business operations behind the demo screens. Each one reports progress
//! and outcome only through the session's notification handle, the way the
//! meeting and request screens do.

use crate::error::{AppError, AppResult};
use crate::models::{ConfirmDialog, DestructiveDialog, LoadingDialog, Toast};
use crate::notifications::{Notification, NotificationHandle};
use crate::AppState;
use log::{info, warn};
use std::time::Duration;
use tokio::time::sleep;

/// Simulated backend latency per step.
const STEP_DELAY: Duration = Duration::from_millis(300);
const STEPS: u32 = 4;

/// Meeting and request operations
#[derive(Debug, Clone)]
pub struct CommandHandlers {
    notifications: NotificationHandle,
}

impl CommandHandlers {
    pub fn new(state: &AppState) -> Self {
        Self {
            notifications: state.notifications.clone(),
        }
    }

    pub fn notifications(&self) -> &NotificationHandle {
        &self.notifications
    }

    /// Creates a meeting: a loading dialog with progress while the backend
    /// works, then a success toast.
    pub async fn create_meeting(&self, title: &str) -> AppResult<()> {
        let title = validate_title(title).map_err(|e| {
            self.notifications.enqueue(Toast::warning(e.to_safe_string()));
            e
        })?;

        info!("Creating meeting");
        run_with_progress(&self.notifications, "Creating meeting…").await;

        self.notifications.enqueue(
            Toast::success(format!("\"{}\" was added to your calendar", title))
                .with_title("Meeting created"),
        );
        Ok(())
    }

    /// Asks for confirmation before submitting an approval request.
    pub fn submit_request(&self, subject: &str) -> AppResult<()> {
        let subject = validate_title(subject)?;

        let on_confirm = self.notifications.clone();
        let on_cancel = self.notifications.clone();
        let confirmed_subject = subject.clone();

        self.notifications.enqueue(
            Notification::new(
                ConfirmDialog::new(format!("Send \"{}\" for approval?", subject))
                    .with_title("Submit request")
                    .with_labels("Submit", "Keep editing"),
            )
            .on_confirm(move || {
                tokio::spawn(async move {
                    run_with_progress(&on_confirm, "Submitting request…").await;
                    on_confirm.enqueue(Toast::success(format!(
                        "\"{}\" is waiting for approval",
                        confirmed_subject
                    )));
                });
            })
            .on_cancel(move || {
                on_cancel.enqueue(Toast::info("Request kept as draft"));
            }),
        );
        Ok(())
    }

    /// Asks before deleting a meeting, then offers an undo.
    pub fn delete_meeting(&self, name: &str) -> AppResult<()> {
        let name = validate_title(name)?;

        let notifications = self.notifications.clone();
        let deleted_name = name.clone();

        self.notifications.enqueue(
            Notification::new(
                DestructiveDialog::new("This meeting will be removed for all attendees.")
                    .with_title("Delete meeting")
                    .with_item_name(name),
            )
            .on_confirm(move || {
                let restore = notifications.clone();
                let restored_name = deleted_name.clone();
                notifications.enqueue(
                    Notification::new(
                        Toast::info(format!("\"{}\" deleted", deleted_name)).with_action("Undo"),
                    )
                    .on_action(move || {
                        restore.enqueue(Toast::success(format!("\"{}\" restored", restored_name)));
                    }),
                );
            }),
        );
        Ok(())
    }

    /// Surfaces a failed operation as an error toast without leaking
    /// details.
    pub fn report_failure(&self, error: &AppError) {
        warn!("Operation failed: {}", error);
        self.notifications
            .enqueue(Toast::error(error.to_safe_string()).with_title("Something went wrong"));
    }
}

fn validate_title(title: &str) -> AppResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::invalid_input("a title is required"));
    }
    Ok(title.to_string())
}

/// Shows a loading dialog, steps its progress to completion, then
/// dismisses it.
async fn run_with_progress(notifications: &NotificationHandle, message: &str) {
    let loading = LoadingDialog::new(message).with_progress(0.0);
    let id = loading.id();
    notifications.enqueue(loading);

    for step in 1..=STEPS {
        sleep(STEP_DELAY).await;
        notifications.set_progress(id, Some(step as f32 / STEPS as f32));
    }

    // Still queued if something else held the slot the whole time
    notifications.withdraw(id);
    notifications.dismiss(id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title_trims() {
        assert_eq!(validate_title("  Weekly sync ").unwrap(), "Weekly sync");
    }

    #[test]
    fn test_validate_title_rejects_blank() {
        let err = validate_title("   ").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
