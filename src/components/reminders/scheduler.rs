use lazy_static::lazy_static;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{interval, Duration as TokioDuration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::matcher::due_alarms;
use super::notifications::{check_due, DesktopNotifier, Notifier};
use crate::components::event_store::EventStoreHandle;
use crate::config::Config;
use crate::error::CalResult;
use crate::utils::scheduler::Scheduler;
use crate::utils::time::local_now_minute;

lazy_static! {
    static ref SCHEDULER_INSTANCES: AtomicU32 = AtomicU32::new(0);
    static ref SCHEDULER_TASK_RUNNING: AtomicBool = AtomicBool::new(false);
}

/// Scheduler for the reminder loop. Holds the cancellation token of the
/// running loop so `stop` can end it.
pub struct ReminderScheduler {
    token: CancellationToken,
}

impl ReminderScheduler {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }
}

impl Scheduler for ReminderScheduler {
    type Handle = EventStoreHandle;

    fn start(
        config: Arc<RwLock<Config>>,
        handle: Self::Handle,
        token: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = CalResult<()>> + Send>> {
        Box::pin(async move {
            let instance_count = SCHEDULER_INSTANCES.fetch_add(1, Ordering::SeqCst) + 1;
            if instance_count > 1 {
                warn!(
                    "Multiple reminder schedulers detected! Instance count: {}",
                    instance_count
                );
            }

            let (title, interval_secs) = {
                let config_read = config.read().await;
                (
                    config_read.notification_title.clone(),
                    config_read.check_interval_secs,
                )
            };

            if !SCHEDULER_TASK_RUNNING.swap(true, Ordering::SeqCst) {
                info!("Starting reminder task ({}s interval)", interval_secs);

                tokio::spawn(run_reminder_loop(
                    handle,
                    Arc::new(DesktopNotifier),
                    title,
                    interval_secs,
                    token,
                ));
            } else {
                warn!("Reminder task is already running, skipping initialization");
            }

            Ok(())
        })
    }

    fn stop(&self) -> Pin<Box<dyn Future<Output = CalResult<()>> + Send>> {
        let token = self.token.clone();
        Box::pin(async move {
            info!("Stopping reminder task");
            token.cancel();
            Ok(())
        })
    }
}

/// The reminder loop: every tick, capture the current date and minute
/// once, take a store snapshot and deliver whatever alarms are due. Runs
/// until the token is cancelled.
pub async fn run_reminder_loop(
    store: EventStoreHandle,
    notifier: Arc<dyn Notifier>,
    title: String,
    interval_secs: u64,
    token: CancellationToken,
) {
    let mut ticker = interval(TokioDuration::from_secs(interval_secs));
    // A minute that passes while the process is suspended is missed, not
    // replayed later
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                info!("Reminder task cancelled");
                break;
            }
            _ = ticker.tick() => {
                let (today, minute) = local_now_minute();

                let snapshot = match store.snapshot().await {
                    Ok(data) => data,
                    Err(e) => {
                        error!("Failed to read event store for alarm check: {}", e);
                        continue;
                    }
                };

                let due = due_alarms(&snapshot.events, today, &minute);
                check_due(notifier.as_ref(), &title, &due);
            }
        }
    }
}
