pub mod notification;

// Flattened so callers can write `use meetdesk::models::Toast`.
pub use notification::{
    clamp_duration_ms, ConfirmDialog, DestructiveDialog, Kind, LoadingDialog, NotificationId,
    NotificationItem, Toast,
};
