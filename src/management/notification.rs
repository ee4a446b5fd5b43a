use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use parking_lot::Mutex;
use tokio::{task::JoinHandle, time::sleep};

use crate::{
    config::Timings,
    render::{NotificationPhase, RenderPort, skip_missing},
    types::{Notification, Severity},
};

struct ActiveNotification {
    notification: Notification,
    timer: JoinHandle<()>,
}

/// Drives the notification tray. Only one notification is on screen at a
/// time: a new one removes its predecessor and cancels the old timer.
///
/// The `active` lock only guards the slot swap; the port is always called
/// with it released.
pub struct NotificationManager {
    port: Arc<dyn RenderPort>,
    timings: Timings,
    next_id: AtomicU64,
    active: Mutex<Option<ActiveNotification>>,
}

impl NotificationManager {
    pub fn new(port: Arc<dyn RenderPort>, timings: Timings) -> Self {
        Self {
            port,
            timings,
            next_id: AtomicU64::new(1),
            active: Mutex::new(None),
        }
    }

    /// Shows a notification for the default display duration.
    pub fn notify(&self, text: impl Into<String>, severity: Severity) -> Notification {
        self.notify_for(text, severity, self.timings.default_display)
    }

    pub fn notify_for(
        &self,
        text: impl Into<String>,
        severity: Severity,
        display_duration: Duration,
    ) -> Notification {
        let notification = Notification {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            text: text.into(),
            severity,
            display_duration,
        };

        let prev = self.active.lock().take();
        if let Some(prev) = prev {
            self.retire(prev);
        }

        skip_missing(
            self.port
                .render_notification(&notification, NotificationPhase::Created),
        );

        let timer = tokio::spawn(run_lifecycle(
            Arc::clone(&self.port),
            notification.clone(),
            self.timings,
        ));

        // Another notify may have filled the slot while the port was drawing.
        let raced = self.active.lock().replace(ActiveNotification {
            notification: notification.clone(),
            timer,
        });
        if let Some(raced) = raced {
            self.retire(raced);
        }

        notification
    }

    /// Removes the current notification right away, as the close button does.
    pub fn dismiss(&self) {
        let prev = self.active.lock().take();
        if let Some(prev) = prev {
            self.retire(prev);
        }
    }

    /// The notification whose lifecycle is still running, if any.
    pub fn current(&self) -> Option<Notification> {
        self.active
            .lock()
            .as_ref()
            .filter(|a| !a.timer.is_finished())
            .map(|a| a.notification.clone())
    }

    /// Cancels the pending timer without touching the display.
    pub fn shutdown(&self) {
        if let Some(prev) = self.active.lock().take() {
            prev.timer.abort();
        }
    }

    fn retire(&self, prev: ActiveNotification) {
        if prev.timer.is_finished() {
            return;
        }
        prev.timer.abort();
        skip_missing(
            self.port
                .render_notification(&prev.notification, NotificationPhase::Removed),
        );
    }
}

impl Drop for NotificationManager {
    fn drop(&mut self) {
        if let Some(prev) = self.active.get_mut().take() {
            prev.timer.abort();
        }
    }
}

/// Created -> Shown -> Hiding -> Removed. The hide point is measured from
/// creation, not from when the notification slid in.
async fn run_lifecycle(port: Arc<dyn RenderPort>, notification: Notification, timings: Timings) {
    sleep(timings.show_delay).await;
    skip_missing(port.render_notification(&notification, NotificationPhase::Shown));

    sleep(
        notification
            .display_duration
            .saturating_sub(timings.show_delay),
    )
    .await;
    skip_missing(port.render_notification(&notification, NotificationPhase::Hiding));

    sleep(timings.hide_transition).await;
    skip_missing(port.render_notification(&notification, NotificationPhase::Removed));
}
