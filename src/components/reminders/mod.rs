//! Reminder service: a single background task that scans the event store
//! once per check interval and fires desktop notifications for due alarms.

pub mod matcher;
pub mod notifications;
pub mod scheduler;

use crate::components::event_store::EventStoreHandle;
use crate::config::Config;
use crate::error::CalResult;
use crate::utils::scheduler::Scheduler;
use async_trait::async_trait;
use lazy_static::lazy_static;
use scheduler::ReminderScheduler;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

lazy_static! {
    static ref SCHEDULER_STARTED: AtomicBool = AtomicBool::new(false);
}

/// Reminder service component
#[derive(Default)]
pub struct ReminderService {
    token: RwLock<Option<CancellationToken>>,
}

impl ReminderService {
    /// Create a new reminder service component
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
        }
    }
}

#[async_trait]
impl super::Component for ReminderService {
    fn name(&self) -> &'static str {
        "reminders"
    }

    async fn init(&self, config: Arc<RwLock<Config>>, store: EventStoreHandle) -> CalResult<()> {
        let token = CancellationToken::new();
        *self.token.write().await = Some(token.clone());

        // Start the reminder loop only if it hasn't been started yet
        if !SCHEDULER_STARTED.swap(true, Ordering::SeqCst) {
            info!("Starting reminder scheduler");
            ReminderScheduler::start(config, store, token).await?;
        } else {
            warn!("Reminder scheduler is already running, skipping initialization");
        }

        Ok(())
    }

    async fn shutdown(&self) -> CalResult<()> {
        let token_lock = self.token.read().await;
        if let Some(token) = &*token_lock {
            let scheduler = ReminderScheduler::new(token.clone());
            scheduler.stop().await?;
        }

        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
