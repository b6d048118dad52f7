// file: src/models/notification.rs
//! Notification data: ids, kinds and the four item variants.
//!
//! Items are plain data. Callbacks live in the `Notification` envelope
//! (see `crate::notifications`) so items can be cloned into renderers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Unique identifier for a notification, increasing with creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Allocates the next id.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity of a notification. Drives the accent color and, for toasts,
/// the default display duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Success => "success",
            Kind::Error => "error",
            Kind::Warning => "warning",
            Kind::Info => "info",
        }
    }
}

/// Converts a caller-supplied millisecond count into a duration.
/// Negative values clamp to zero.
pub fn clamp_duration_ms(ms: i64) -> Duration {
    Duration::from_millis(ms.max(0) as u64)
}

/// A transient, self-dismissing notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: NotificationId,
    message: String,
    title: Option<String>,
    kind: Kind,
    action_label: Option<String>,
    duration: Option<Duration>,
    dismissible: bool,
}

impl Toast {
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            title: None,
            kind,
            action_label: None,
            duration: None,
            dismissible: true,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Kind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Kind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Kind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Kind::Error, message)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds an action button. The handler is attached on the envelope.
    #[must_use]
    pub fn with_action(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }

    /// Overrides the kind's default duration. Negative values clamp to zero,
    /// which shows the toast and dismisses it on the next timer tick.
    #[must_use]
    pub fn with_duration_ms(mut self, ms: i64) -> Self {
        self.duration = Some(clamp_duration_ms(ms));
        self
    }

    /// Hides the close button. The timer still dismisses the toast.
    #[must_use]
    pub fn non_dismissible(mut self) -> Self {
        self.dismissible = false;
        self
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn action_label(&self) -> Option<&str> {
        self.action_label.as_deref()
    }

    pub fn has_action(&self) -> bool {
        self.action_label.is_some()
    }

    /// Explicit duration, or `None` when the kind default applies.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn dismissible(&self) -> bool {
        self.dismissible
    }
}

/// A blocking dialog asking the user to confirm or cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmDialog {
    id: NotificationId,
    message: String,
    title: Option<String>,
    kind: Kind,
    confirm_label: String,
    cancel_label: String,
    requires_cancel_callback: bool,
}

impl ConfirmDialog {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            title: None,
            kind: Kind::Info,
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
            requires_cancel_callback: false,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }

    pub(crate) fn set_requires_cancel_callback(&mut self, required: bool) {
        self.requires_cancel_callback = required;
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn confirm_label(&self) -> &str {
        &self.confirm_label
    }

    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    /// Whether cancelling must report back through a cancel handler.
    pub fn requires_cancel_callback(&self) -> bool {
        self.requires_cancel_callback
    }
}

/// A confirmation for an irreversible action, such as deleting a meeting.
#[derive(Debug, Clone, PartialEq)]
pub struct DestructiveDialog {
    id: NotificationId,
    message: String,
    title: Option<String>,
    item_name: Option<String>,
    confirm_label: String,
    cancel_label: String,
}

impl DestructiveDialog {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            title: None,
            item_name: None,
            confirm_label: "Delete".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Names the thing being destroyed, shown emphasised by renderers.
    #[must_use]
    pub fn with_item_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn item_name(&self) -> Option<&str> {
        self.item_name.as_deref()
    }

    pub fn confirm_label(&self) -> &str {
        &self.confirm_label
    }

    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }
}

/// A blocking progress indicator. Never dismissed by a timer.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingDialog {
    id: NotificationId,
    message: String,
    progress: Option<f32>,
}

impl LoadingDialog {
    /// Creates an indeterminate loading dialog.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            progress: None,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: f32) -> Self {
        self.set_progress(Some(progress));
        self
    }

    /// Clamps into `[0, 1]`. NaN is treated as indeterminate.
    pub fn set_progress(&mut self, progress: Option<f32>) {
        self.progress = progress
            .filter(|p| !p.is_nan())
            .map(|p| p.clamp(0.0, 1.0));
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `None` means indeterminate.
    pub fn progress(&self) -> Option<f32> {
        self.progress
    }

    pub fn dismissible(&self) -> bool {
        false
    }
}

/// One notification waiting for or occupying the display slot.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationItem {
    Toast(Toast),
    ConfirmDialog(ConfirmDialog),
    DestructiveDialog(DestructiveDialog),
    LoadingDialog(LoadingDialog),
}

impl NotificationItem {
    pub fn id(&self) -> NotificationId {
        match self {
            NotificationItem::Toast(t) => t.id(),
            NotificationItem::ConfirmDialog(d) => d.id(),
            NotificationItem::DestructiveDialog(d) => d.id(),
            NotificationItem::LoadingDialog(d) => d.id(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            NotificationItem::Toast(t) => t.message(),
            NotificationItem::ConfirmDialog(d) => d.message(),
            NotificationItem::DestructiveDialog(d) => d.message(),
            NotificationItem::LoadingDialog(d) => d.message(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            NotificationItem::Toast(t) => t.title(),
            NotificationItem::ConfirmDialog(d) => d.title(),
            NotificationItem::DestructiveDialog(d) => d.title(),
            NotificationItem::LoadingDialog(_) => None,
        }
    }

    /// Destructive dialogs read as errors, loading dialogs as info.
    pub fn kind(&self) -> Kind {
        match self {
            NotificationItem::Toast(t) => t.kind(),
            NotificationItem::ConfirmDialog(d) => d.kind(),
            NotificationItem::DestructiveDialog(_) => Kind::Error,
            NotificationItem::LoadingDialog(_) => Kind::Info,
        }
    }

    /// True for the variants that answer `confirm` and `cancel`.
    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            NotificationItem::ConfirmDialog(_) | NotificationItem::DestructiveDialog(_)
        )
    }

    /// Whether the user may close the item without deciding.
    pub fn is_dismissible(&self) -> bool {
        match self {
            NotificationItem::Toast(t) => t.dismissible(),
            NotificationItem::ConfirmDialog(_) | NotificationItem::DestructiveDialog(_) => true,
            NotificationItem::LoadingDialog(d) => d.dismissible(),
        }
    }

    /// Short variant name used in log lines.
    pub fn variant_name(&self) -> &'static str {
        match self {
            NotificationItem::Toast(_) => "toast",
            NotificationItem::ConfirmDialog(_) => "confirm-dialog",
            NotificationItem::DestructiveDialog(_) => "destructive-dialog",
            NotificationItem::LoadingDialog(_) => "loading-dialog",
        }
    }
}

impl From<Toast> for NotificationItem {
    fn from(toast: Toast) -> Self {
        NotificationItem::Toast(toast)
    }
}

impl From<ConfirmDialog> for NotificationItem {
    fn from(dialog: ConfirmDialog) -> Self {
        NotificationItem::ConfirmDialog(dialog)
    }
}

impl From<DestructiveDialog> for NotificationItem {
    fn from(dialog: DestructiveDialog) -> Self {
        NotificationItem::DestructiveDialog(dialog)
    }
}

impl From<LoadingDialog> for NotificationItem {
    fn from(dialog: LoadingDialog) -> Self {
        NotificationItem::LoadingDialog(dialog)
    }
}
