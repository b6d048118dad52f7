//! UI state management module
//!
//! Holds what the demo window renders. The notification shown here is a
//! copy pushed by the session's renderer; the queue itself lives on the
//! session task.

use crate::models::NotificationItem;

#[derive(Debug, Clone)]
pub struct UiState {
    /// Meeting title input field
    pub meeting_title: String,

    /// Active notification as last rendered
    pub active: Option<NotificationItem>,

    /// Status line under the actions
    pub status: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            meeting_title: String::new(),
            active: None,
            status: "Starting notification session…".to_string(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
