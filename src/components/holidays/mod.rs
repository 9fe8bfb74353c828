//! Holiday calendar component: looks up the national holidays for the
//! current year and materializes them into the event store at startup.
//! Materialized holidays persist in the data file, so they stay visible
//! in sessions where the source has no table for the displayed year.

mod source;

pub use source::{HolidaySource, KoreanHolidays};

use crate::components::event_store::EventStoreHandle;
use crate::config::Config;
use crate::error::CalResult;
use async_trait::async_trait;
use chrono::{Datelike, Local};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Holiday calendar component
pub struct HolidayCalendar {
    source: Box<dyn HolidaySource>,
}

impl HolidayCalendar {
    /// Create the component with the bundled Korean holiday source
    pub fn new() -> Self {
        Self {
            source: Box::new(KoreanHolidays),
        }
    }

    /// Create the component with a custom holiday source
    pub fn with_source(source: Box<dyn HolidaySource>) -> Self {
        Self { source }
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl super::Component for HolidayCalendar {
    fn name(&self) -> &'static str {
        "holidays"
    }

    async fn init(&self, _config: Arc<RwLock<Config>>, store: EventStoreHandle) -> CalResult<()> {
        let year = Local::now().year();
        let holidays = self.source.holidays_for(year);
        let count = holidays.len();

        let inserted = store.materialize_holidays(holidays).await?;
        info!(
            "Materialized {} of {} holidays for {}",
            inserted, count, year
        );

        Ok(())
    }

    async fn shutdown(&self) -> CalResult<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
