//! The notification queue.
//!
//! One active slot, one FIFO backlog. The queue is a plain `&mut self`
//! state machine: it is owned by exactly one task (see `service`) and all
//! producer calls are marshalled onto that task.

use super::timer::{DismissTicket, Scheduler, TimerHandle};
use crate::config::ToastDurations;
use crate::models::{NotificationId, NotificationItem};
use crate::utils::logging::log_notification_event;
use chrono::{DateTime, Utc};
use log::{debug, trace, warn};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// A user action handler. Runs at most once.
type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Receives the active item every time it changes.
pub trait Renderer: Send {
    fn render(&mut self, active: Option<&NotificationItem>);
}

/// Adapts a closure into a [`Renderer`].
pub struct FnRenderer<F>(F);

impl<F> Renderer for FnRenderer<F>
where
    F: FnMut(Option<&NotificationItem>) + Send,
{
    fn render(&mut self, active: Option<&NotificationItem>) {
        (self.0)(active)
    }
}

pub fn render_with<F>(f: F) -> FnRenderer<F>
where
    F: FnMut(Option<&NotificationItem>) + Send,
{
    FnRenderer(f)
}

/// User intents emitted by a notification view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Close button on a toast or dialog.
    Dismiss(NotificationId),
    /// Confirm button on a dialog.
    Confirm(NotificationId),
    /// Cancel button on a dialog.
    Cancel(NotificationId),
    /// Action button on a toast.
    Action(NotificationId),
}

#[derive(Default)]
struct Actions {
    on_confirm: Option<Callback>,
    on_cancel: Option<Callback>,
    on_action: Option<Callback>,
}

/// An item plus the handlers that answer it.
pub struct Notification {
    item: NotificationItem,
    actions: Actions,
    created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(item: impl Into<NotificationItem>) -> Self {
        Self {
            item: item.into(),
            actions: Actions::default(),
            created_at: Utc::now(),
        }
    }

    /// Runs when a confirm or destructive dialog is confirmed.
    #[must_use]
    pub fn on_confirm(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.actions.on_confirm = Some(Box::new(f));
        self
    }

    /// Runs when a dialog is cancelled.
    #[must_use]
    pub fn on_cancel(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        if let NotificationItem::ConfirmDialog(dialog) = &mut self.item {
            dialog.set_requires_cancel_callback(true);
        }
        self.actions.on_cancel = Some(Box::new(f));
        self
    }

    /// Runs when a toast's action button is pressed.
    #[must_use]
    pub fn on_action(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.actions.on_action = Some(Box::new(f));
        self
    }

    pub fn id(&self) -> NotificationId {
        self.item.id()
    }

    pub fn item(&self) -> &NotificationItem {
        &self.item
    }

    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("item", &self.item)
            .field("on_confirm", &self.actions.on_confirm.is_some())
            .field("on_cancel", &self.actions.on_cancel.is_some())
            .field("on_action", &self.actions.on_action.is_some())
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl From<NotificationItem> for Notification {
    fn from(item: NotificationItem) -> Self {
        Self::new(item)
    }
}

impl From<crate::models::Toast> for Notification {
    fn from(toast: crate::models::Toast) -> Self {
        Self::new(toast)
    }
}

impl From<crate::models::ConfirmDialog> for Notification {
    fn from(dialog: crate::models::ConfirmDialog) -> Self {
        Self::new(dialog)
    }
}

impl From<crate::models::DestructiveDialog> for Notification {
    fn from(dialog: crate::models::DestructiveDialog) -> Self {
        Self::new(dialog)
    }
}

impl From<crate::models::LoadingDialog> for Notification {
    fn from(dialog: crate::models::LoadingDialog) -> Self {
        Self::new(dialog)
    }
}

struct ActiveSlot {
    notification: Notification,
    generation: u64,
    timer: Option<TimerHandle>,
}

/// FIFO notification queue with a single display slot.
pub struct NotificationQueue {
    active: Option<ActiveSlot>,
    backlog: VecDeque<Notification>,
    generation: u64,
    durations: ToastDurations,
    renderer: Box<dyn Renderer>,
    scheduler: Box<dyn Scheduler>,
    disposed: bool,
}

impl NotificationQueue {
    pub fn new(
        durations: ToastDurations,
        renderer: impl Renderer + 'static,
        scheduler: impl Scheduler + 'static,
    ) -> Self {
        Self {
            active: None,
            backlog: VecDeque::new(),
            generation: 0,
            durations,
            renderer: Box::new(renderer),
            scheduler: Box::new(scheduler),
            disposed: false,
        }
    }

    /// Shows the notification now if the slot is free, otherwise appends it
    /// to the backlog. Dropped silently once the queue is disposed.
    pub fn enqueue(&mut self, notification: impl Into<Notification>) {
        let notification = notification.into();

        if self.disposed {
            debug!(
                "Dropping {} {}: queue disposed",
                notification.item().variant_name(),
                notification.id()
            );
            return;
        }

        log_notification_event("enqueued", notification.item());

        if self.active.is_none() {
            self.activate(notification);
            self.render();
        } else {
            self.backlog.push_back(notification);
        }
    }

    /// Clears the active slot and promotes the backlog head.
    ///
    /// Returns `false` when nothing was active.
    pub fn dismiss_active(&mut self) -> bool {
        match self.take_active() {
            Some(notification) => {
                log_notification_event("dismissed", notification.item());
                debug!(
                    "{} dismissed after {}ms",
                    notification.id(),
                    notification.age().num_milliseconds()
                );
                self.promote_next();
                true
            }
            None => false,
        }
    }

    /// Dismisses the active item only if it is `id`. Any other id, including
    /// one already dismissed, is ignored.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if self.active_id() != Some(id) {
            trace!("Ignoring dismiss of inactive {}", id);
            return false;
        }
        self.dismiss_active()
    }

    /// Handles a timer expiry. Tickets from an earlier activation are stale
    /// and ignored.
    pub fn expire(&mut self, ticket: DismissTicket) -> bool {
        let current = self
            .active
            .as_ref()
            .map(|slot| (slot.notification.id(), slot.generation));

        if current != Some((ticket.id, ticket.generation)) {
            trace!("Ignoring stale timer for {} (gen {})", ticket.id, ticket.generation);
            return false;
        }

        // Timer has fired, cancelling is moot
        if let Some(slot) = self.active.as_mut() {
            slot.timer = None;
        }
        self.dismiss_active()
    }

    /// Confirms the active dialog `id`: runs its confirm handler, then
    /// dismisses it.
    pub fn confirm(&mut self, id: NotificationId) -> bool {
        let Some(slot) = self.active_slot_mut(id) else {
            trace!("Ignoring confirm of inactive {}", id);
            return false;
        };
        if !slot.notification.item.is_decision() {
            debug!("Ignoring confirm of non-dialog {}", id);
            return false;
        }

        let callback = slot.notification.actions.on_confirm.take();
        if let Some(callback) = callback {
            callback();
        }
        self.dismiss_active()
    }

    /// Cancels the active dialog `id`: runs its cancel handler, then
    /// dismisses it.
    pub fn cancel(&mut self, id: NotificationId) -> bool {
        let Some(slot) = self.active_slot_mut(id) else {
            trace!("Ignoring cancel of inactive {}", id);
            return false;
        };
        if !slot.notification.item.is_decision() {
            debug!("Ignoring cancel of non-dialog {}", id);
            return false;
        }

        let callback = slot.notification.actions.on_cancel.take();
        match callback {
            Some(callback) => callback(),
            None => {
                if let NotificationItem::ConfirmDialog(dialog) = &slot.notification.item {
                    if dialog.requires_cancel_callback() {
                        warn!("{} requires a cancel handler but has none", id);
                    }
                }
            }
        }
        self.dismiss_active()
    }

    /// Runs the action handler of the active toast `id`, then dismisses it.
    pub fn perform_action(&mut self, id: NotificationId) -> bool {
        let Some(slot) = self.active_slot_mut(id) else {
            trace!("Ignoring action of inactive {}", id);
            return false;
        };
        match &slot.notification.item {
            NotificationItem::Toast(toast) if toast.has_action() => {}
            _ => {
                debug!("{} has no action", id);
                return false;
            }
        }

        let callback = slot.notification.actions.on_action.take();
        if let Some(callback) = callback {
            callback();
        }
        self.dismiss_active()
    }

    /// Removes a not-yet-shown notification from the backlog. Never touches
    /// the active slot.
    pub fn withdraw(&mut self, id: NotificationId) -> bool {
        match self.backlog.iter().position(|n| n.id() == id) {
            Some(pos) => {
                if let Some(notification) = self.backlog.remove(pos) {
                    log_notification_event("withdrawn", notification.item());
                }
                true
            }
            None => false,
        }
    }

    /// Updates the progress of a loading dialog, active or queued.
    pub fn set_progress(&mut self, id: NotificationId, progress: Option<f32>) -> bool {
        if let Some(slot) = self.active_slot_mut(id) {
            if let NotificationItem::LoadingDialog(dialog) = &mut slot.notification.item {
                dialog.set_progress(progress);
                self.render();
                return true;
            }
            return false;
        }

        for notification in self.backlog.iter_mut() {
            if notification.id() == id {
                if let NotificationItem::LoadingDialog(dialog) = &mut notification.item {
                    dialog.set_progress(progress);
                    return true;
                }
                return false;
            }
        }
        false
    }

    /// Applies a view message.
    pub fn handle_message(&mut self, message: &Message) {
        match *message {
            Message::Dismiss(id) => {
                self.dismiss(id);
            }
            Message::Confirm(id) => {
                self.confirm(id);
            }
            Message::Cancel(id) => {
                self.cancel(id);
            }
            Message::Action(id) => {
                self.perform_action(id);
            }
        }
    }

    /// Drops everything without running any handler.
    pub fn clear(&mut self) {
        self.backlog.clear();
        if self.take_active().is_some() {
            self.render();
        }
    }

    /// Clears and refuses further notifications. Called when the hosting
    /// session ends.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.clear();
        self.disposed = true;
        debug!("Notification queue disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn active(&self) -> Option<&NotificationItem> {
        self.active.as_ref().map(|slot| &slot.notification.item)
    }

    pub fn active_id(&self) -> Option<NotificationId> {
        self.active.as_ref().map(|slot| slot.notification.id())
    }

    /// Pending items in display order.
    pub fn backlog(&self) -> impl Iterator<Item = &NotificationItem> {
        self.backlog.iter().map(|n| &n.item)
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    pub fn has_notifications(&self) -> bool {
        self.active.is_some() || !self.backlog.is_empty()
    }

    fn active_slot_mut(&mut self, id: NotificationId) -> Option<&mut ActiveSlot> {
        self.active
            .as_mut()
            .filter(|slot| slot.notification.id() == id)
    }

    /// Empties the slot and stops its timer. Does not render.
    fn take_active(&mut self) -> Option<Notification> {
        let slot = self.active.take()?;
        if let Some(timer) = slot.timer {
            timer.cancel();
        }
        Some(slot.notification)
    }

    fn promote_next(&mut self) {
        if let Some(next) = self.backlog.pop_front() {
            self.activate(next);
        }
        self.render();
    }

    fn activate(&mut self, notification: Notification) {
        self.generation += 1;
        let generation = self.generation;

        let timer = self.auto_dismiss_after(&notification.item).map(|after| {
            let ticket = DismissTicket {
                id: notification.id(),
                generation,
            };
            self.scheduler.schedule(ticket, after)
        });

        log_notification_event("shown", &notification.item);
        self.active = Some(ActiveSlot {
            notification,
            generation,
            timer,
        });
    }

    /// Only toasts time out.
    fn auto_dismiss_after(&self, item: &NotificationItem) -> Option<Duration> {
        match item {
            NotificationItem::Toast(toast) => Some(
                toast
                    .duration()
                    .unwrap_or_else(|| self.durations.for_kind(toast.kind())),
            ),
            _ => None,
        }
    }

    fn render(&mut self) {
        let active = self.active.as_ref().map(|slot| &slot.notification.item);
        self.renderer.render(active);
    }
}

impl fmt::Debug for NotificationQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationQueue")
            .field("active", &self.active_id())
            .field("backlog", &self.backlog.len())
            .field("generation", &self.generation)
            .field("disposed", &self.disposed)
            .finish()
    }
}
