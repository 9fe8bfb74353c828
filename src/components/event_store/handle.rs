use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::actor::{EventStoreActor, EventStoreActorHandle};
use super::models::{CalendarData, Event, EventDraft};
use crate::error::CalResult;

/// Handle for interacting with the event store.
///
/// Cloning is cheap; every clone talks to the same actor, which owns the
/// data and serializes all reads, mutations and file writes.
#[derive(Clone)]
pub struct EventStoreHandle {
    actor_handle: EventStoreActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl EventStoreHandle {
    /// Open the store: load the data file eagerly (an absent file starts
    /// the store empty, an unreadable one is an error) and spawn the actor
    pub fn open(path: impl Into<PathBuf>) -> CalResult<Self> {
        let (mut actor, handle) = EventStoreActor::new(path.into())?;

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Ok(Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        })
    }

    /// Get a consistent copy of the full calendar data
    pub async fn snapshot(&self) -> CalResult<CalendarData> {
        self.actor_handle.snapshot().await
    }

    /// Get the events recorded for one day, in insertion order
    pub async fn events_on(&self, date: NaiveDate) -> CalResult<Vec<Event>> {
        self.actor_handle.events_on(date).await
    }

    /// Add an event to a day and persist. Returns `false` (and changes
    /// nothing) when the draft fails validation.
    pub async fn add_event(&self, date: NaiveDate, draft: EventDraft) -> CalResult<bool> {
        self.actor_handle.add_event(date, draft).await
    }

    /// Replace the first structural match of `old` on `date` with an event
    /// built from the draft; the updated event moves to the end of the
    /// day's list. Returns `false` when `old` is absent or the draft fails
    /// validation.
    pub async fn update_event(
        &self,
        date: NaiveDate,
        old: Event,
        draft: EventDraft,
    ) -> CalResult<bool> {
        self.actor_handle.update_event(date, old, draft).await
    }

    /// Delete the first structural match of `event` on `date`. Deleting an
    /// absent event is a no-op returning `false`.
    pub async fn delete_event(&self, date: NaiveDate, event: Event) -> CalResult<bool> {
        self.actor_handle.delete_event(date, event).await
    }

    /// Replace the whole events map with one event per recorded holiday.
    /// Destructive and unconditional; confirmation is the caller's concern.
    pub async fn reset_events(&self) -> CalResult<()> {
        self.actor_handle.reset_events().await
    }

    /// Record holiday names and inject their pseudo-events at position 0 of
    /// each date's list. Idempotent; returns the number of events inserted.
    pub async fn materialize_holidays(
        &self,
        holidays: BTreeMap<NaiveDate, String>,
    ) -> CalResult<usize> {
        self.actor_handle.materialize_holidays(holidays).await
    }

    /// Replace the in-memory state from another data file. The store keeps
    /// persisting to the path it was opened with.
    pub async fn load_from(&self, path: impl Into<PathBuf>) -> CalResult<()> {
        self.actor_handle.load_from(path.into()).await
    }

    /// Write the current state to another file without changing the
    /// store's save target
    pub async fn save_as(&self, path: impl Into<PathBuf>) -> CalResult<()> {
        self.actor_handle.save_as(path.into()).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> CalResult<()> {
        self.actor_handle.shutdown().await
    }
}
