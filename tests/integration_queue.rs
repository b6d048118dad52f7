use meetdesk::models::{ConfirmDialog, LoadingDialog, NotificationId, NotificationItem, Toast};
use meetdesk::notifications::{render_with, Notification, NotificationHandle, NotificationService};
use meetdesk::NotificationConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

type Renders = Arc<Mutex<Vec<Option<NotificationId>>>>;

struct Session {
    handle: NotificationHandle,
    renders: Renders,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl Session {
    fn start() -> Self {
        Self::start_with(NotificationConfig::default())
    }

    fn start_with(config: NotificationConfig) -> Self {
        let renders: Renders = Arc::default();
        let sink = renders.clone();
        let shutdown = CancellationToken::new();
        let (service, handle) = NotificationService::new(
            &config,
            render_with(move |active: Option<&NotificationItem>| {
                sink.lock().unwrap().push(active.map(|item| item.id()));
            }),
            shutdown.clone(),
        );
        let task = service.spawn();
        Self {
            handle,
            renders,
            shutdown,
            task,
        }
    }

    fn active(&self) -> Option<NotificationId> {
        self.renders.lock().unwrap().last().copied().flatten()
    }

    fn render_count(&self) -> usize {
        self.renders.lock().unwrap().len()
    }
}

/// Lets the service task drain its channels without moving the clock.
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_first_enqueue_is_shown() {
    let session = Session::start();
    let toast = Toast::success("Meeting created");
    let id = toast.id();

    session.handle.enqueue(toast);
    settle().await;

    assert_eq!(session.active(), Some(id));
}

#[tokio::test(start_paused = true)]
async fn test_fifo_through_handle() {
    let session = Session::start();
    let a = LoadingDialog::new("A");
    let b = LoadingDialog::new("B");
    let c = LoadingDialog::new("C");
    let ids = [a.id(), b.id(), c.id()];

    session.handle.enqueue(a);
    session.handle.enqueue(b);
    session.handle.enqueue(c);
    settle().await;
    assert_eq!(session.active(), Some(ids[0]));

    session.handle.dismiss_active();
    settle().await;
    assert_eq!(session.active(), Some(ids[1]));

    session.handle.dismiss_active();
    settle().await;
    assert_eq!(session.active(), Some(ids[2]));

    session.handle.dismiss_active();
    session.handle.dismiss_active();
    settle().await;
    assert_eq!(session.active(), None);
    assert_eq!(session.render_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_toast_auto_dismisses_after_duration() {
    let session = Session::start();
    let toast = Toast::info("Synced").with_duration_ms(100);
    let next = LoadingDialog::new("Next");
    let next_id = next.id();

    session.handle.enqueue(toast);
    session.handle.enqueue(next);
    settle().await;

    sleep(Duration::from_millis(90)).await;
    assert_ne!(session.active(), Some(next_id));

    sleep(Duration::from_millis(20)).await;
    settle().await;
    assert_eq!(session.active(), Some(next_id));
}

#[tokio::test(start_paused = true)]
async fn test_manual_dismiss_beats_timer() {
    let session = Session::start();
    let first = Toast::info("First").with_duration_ms(100);
    let second = Toast::info("Second").with_duration_ms(1000);
    let second_id = second.id();

    session.handle.enqueue(first);
    session.handle.enqueue(second);
    settle().await;

    sleep(Duration::from_millis(10)).await;
    session.handle.dismiss_active();
    settle().await;
    assert_eq!(session.active(), Some(second_id));

    // The first toast's timer would have fired here
    sleep(Duration::from_millis(140)).await;
    settle().await;
    assert_eq!(session.active(), Some(second_id));
    assert_eq!(session.render_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_user_close_makes_timer_a_noop() {
    let session = Session::start();
    let toast = Toast::warning("Room changed").with_duration_ms(100);
    let id = toast.id();

    session.handle.enqueue(toast);
    settle().await;
    session.handle.dismiss(id);
    settle().await;

    sleep(Duration::from_millis(200)).await;
    settle().await;
    assert_eq!(session.active(), None);
    assert_eq!(session.render_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_loading_dialog_never_self_dismisses() {
    let session = Session::start();
    let loading = LoadingDialog::new("Fetching requests");
    let id = loading.id();

    session.handle.enqueue(loading);
    sleep(Duration::from_secs(3600)).await;
    settle().await;
    assert_eq!(session.active(), Some(id));

    session.handle.dismiss_active();
    settle().await;
    assert_eq!(session.active(), None);
}

#[tokio::test(start_paused = true)]
async fn test_zero_and_negative_durations_render_then_dismiss() {
    let session = Session::start();
    let zero = Toast::info("zero").with_duration_ms(0);
    let negative = Toast::info("negative").with_duration_ms(-50);
    let (zero_id, negative_id) = (zero.id(), negative.id());

    session.handle.enqueue(zero);
    session.handle.enqueue(negative);
    sleep(Duration::from_millis(5)).await;
    settle().await;

    let renders = session.renders.lock().unwrap().clone();
    assert_eq!(renders, vec![Some(zero_id), Some(negative_id), None]);
}

#[tokio::test(start_paused = true)]
async fn test_confirm_callback_runs_exactly_once() {
    let session = Session::start();
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let dialog = ConfirmDialog::new("Approve leave request?");
    let id = dialog.id();
    let next = LoadingDialog::new("Approving");
    let next_id = next.id();

    session.handle.enqueue(Notification::new(dialog).on_confirm(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    session.handle.enqueue(next);
    settle().await;

    session.handle.confirm(id);
    session.handle.confirm(id);
    settle().await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(session.active(), Some(next_id));
}

#[tokio::test(start_paused = true)]
async fn test_callback_can_enqueue_follow_up() {
    let session = Session::start();
    let follow_up = Toast::success("Request approved");
    let follow_up_id = follow_up.id();
    let producer = session.handle.clone();
    let dialog = ConfirmDialog::new("Approve?");
    let id = dialog.id();

    session.handle.enqueue(Notification::new(dialog).on_confirm(move || {
        producer.enqueue(follow_up);
    }));
    settle().await;
    session.handle.confirm(id);
    settle().await;

    assert_eq!(session.active(), Some(follow_up_id));
}

#[tokio::test(start_paused = true)]
async fn test_enqueue_after_shutdown_is_dropped() {
    let session = Session::start();
    session.handle.enqueue(LoadingDialog::new("Working"));
    settle().await;

    session.shutdown.cancel();
    session.task.await.unwrap();
    assert!(session.handle.is_closed());
    assert_eq!(session.renders.lock().unwrap().last(), Some(&None));

    let before = session.renders.lock().unwrap().len();
    session.handle.enqueue(Toast::error("Too late"));
    session.handle.dismiss_active();
    settle().await;
    assert_eq!(session.renders.lock().unwrap().len(), before);
}

#[tokio::test(start_paused = true)]
async fn test_session_ends_when_all_handles_dropped() {
    let Session { handle, task, .. } = Session::start();
    drop(handle);
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("service should stop")
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_configured_kind_duration_applies() {
    let mut config = NotificationConfig::default();
    config.toast_durations.error_ms = 50;
    let session = Session::start_with(config);
    let toast = Toast::error("Could not reach server");

    session.handle.enqueue(toast);
    settle().await;
    assert!(session.active().is_some());

    sleep(Duration::from_millis(60)).await;
    settle().await;
    assert_eq!(session.active(), None);
}

#[tokio::test(start_paused = true)]
async fn test_progress_updates_rerender_active_loading_dialog() {
    let session = Session::start();
    let loading = LoadingDialog::new("Uploading minutes");
    let id = loading.id();

    session.handle.enqueue(loading);
    session.handle.set_progress(id, Some(0.5));
    session.handle.set_progress(id, Some(1.0));
    settle().await;

    assert_eq!(session.render_count(), 3);
    assert_eq!(session.active(), Some(id));
}
