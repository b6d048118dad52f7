//! Notification queue: toasts and blocking dialogs serialized onto a single
//! display slot.
//!
//! - [`queue`] - the single-writer state machine
//! - [`timer`] - cancellable auto-dismiss timers
//! - [`service`] - the session task that owns a queue, and the handle
//!   producers use to reach it
//!
//! ```ignore
//! let shutdown = CancellationToken::new();
//! let (service, notifications) =
//!     NotificationService::new(&config, render_with(|active| redraw(active)), shutdown.clone());
//! service.spawn();
//!
//! notifications.enqueue(Toast::success("Meeting created"));
//! ```

pub mod queue;
pub mod service;
pub mod timer;

pub use queue::{
    render_with, Message as NotificationMessage, Notification, NotificationQueue, Renderer,
};
pub use service::{render_to_channel, ChannelRenderer, NotificationHandle, NotificationService};
pub use timer::{DismissTicket, Scheduler, TimerHandle, TokioScheduler};
