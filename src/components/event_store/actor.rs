use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;

use super::models::{CalendarData, Event, EventDraft};
use super::storage;
use crate::error::{store_error, CalResult};

/// The event store actor. It is the single owner of the calendar data:
/// both the interactive path and the reminder loop go through its mailbox,
/// so mutations, scans and file writes never interleave.
pub struct EventStoreActor {
    data: CalendarData,
    path: PathBuf,
    command_rx: mpsc::Receiver<StoreCommand>,
}

/// Commands that can be sent to the event store actor
pub enum StoreCommand {
    Snapshot(mpsc::Sender<CalResult<CalendarData>>),
    EventsOn(NaiveDate, mpsc::Sender<CalResult<Vec<Event>>>),
    AddEvent(NaiveDate, EventDraft, mpsc::Sender<CalResult<bool>>),
    UpdateEvent(NaiveDate, Event, EventDraft, mpsc::Sender<CalResult<bool>>),
    DeleteEvent(NaiveDate, Event, mpsc::Sender<CalResult<bool>>),
    ResetEvents(mpsc::Sender<CalResult<()>>),
    MaterializeHolidays(BTreeMap<NaiveDate, String>, mpsc::Sender<CalResult<usize>>),
    LoadFrom(PathBuf, mpsc::Sender<CalResult<()>>),
    SaveAs(PathBuf, mpsc::Sender<CalResult<()>>),
    Shutdown,
}

/// Handle for communicating with the event store actor
#[derive(Clone)]
pub struct EventStoreActorHandle {
    command_tx: mpsc::Sender<StoreCommand>,
}

impl EventStoreActorHandle {
    async fn request<T>(
        &self,
        command: StoreCommand,
        response_rx: &mut mpsc::Receiver<CalResult<T>>,
    ) -> CalResult<T> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Get a consistent copy of the full calendar data
    pub async fn snapshot(&self) -> CalResult<CalendarData> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.request(StoreCommand::Snapshot(response_tx), &mut response_rx)
            .await
    }

    /// Get the events recorded for one day
    pub async fn events_on(&self, date: NaiveDate) -> CalResult<Vec<Event>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.request(StoreCommand::EventsOn(date, response_tx), &mut response_rx)
            .await
    }

    /// Add an event to a day; returns whether the draft was accepted
    pub async fn add_event(&self, date: NaiveDate, draft: EventDraft) -> CalResult<bool> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.request(
            StoreCommand::AddEvent(date, draft, response_tx),
            &mut response_rx,
        )
        .await
    }

    /// Replace the first structural match of `old` with an event built from
    /// the draft; returns whether anything changed
    pub async fn update_event(
        &self,
        date: NaiveDate,
        old: Event,
        draft: EventDraft,
    ) -> CalResult<bool> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.request(
            StoreCommand::UpdateEvent(date, old, draft, response_tx),
            &mut response_rx,
        )
        .await
    }

    /// Delete the first structural match of `event` on `date`
    pub async fn delete_event(&self, date: NaiveDate, event: Event) -> CalResult<bool> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.request(
            StoreCommand::DeleteEvent(date, event, response_tx),
            &mut response_rx,
        )
        .await
    }

    /// Throw away every event and rebuild the map from recorded holidays
    pub async fn reset_events(&self) -> CalResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.request(StoreCommand::ResetEvents(response_tx), &mut response_rx)
            .await
    }

    /// Record holidays and inject their pseudo-events; returns how many
    /// events were inserted
    pub async fn materialize_holidays(
        &self,
        holidays: BTreeMap<NaiveDate, String>,
    ) -> CalResult<usize> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.request(
            StoreCommand::MaterializeHolidays(holidays, response_tx),
            &mut response_rx,
        )
        .await
    }

    /// Replace the in-memory state from another data file
    pub async fn load_from(&self, path: PathBuf) -> CalResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.request(
            StoreCommand::LoadFrom(path, response_tx),
            &mut response_rx,
        )
        .await
    }

    /// Write the current state to another file, leaving the default target
    /// untouched
    pub async fn save_as(&self, path: PathBuf) -> CalResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.request(StoreCommand::SaveAs(path, response_tx), &mut response_rx)
            .await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> CalResult<()> {
        let _ = self.command_tx.send(StoreCommand::Shutdown).await;
        Ok(())
    }
}

impl EventStoreActor {
    /// Load the data file eagerly and create the actor plus its handle
    pub fn new(path: PathBuf) -> CalResult<(Self, EventStoreActorHandle)> {
        let data = storage::load_data(&path)?;
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            data,
            path,
            command_rx,
        };

        let handle = EventStoreActorHandle { command_tx };

        Ok((actor, handle))
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Event store actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                StoreCommand::Snapshot(response_tx) => {
                    let _ = response_tx.send(Ok(self.data.clone())).await;
                }
                StoreCommand::EventsOn(date, response_tx) => {
                    let _ = response_tx.send(Ok(self.data.events_on(&date))).await;
                }
                StoreCommand::AddEvent(date, draft, response_tx) => {
                    let result = self.add_event(date, draft);
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::UpdateEvent(date, old, draft, response_tx) => {
                    let result = self.update_event(date, old, draft);
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::DeleteEvent(date, event, response_tx) => {
                    let result = self.delete_event(date, event);
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::ResetEvents(response_tx) => {
                    let result = self.reset_events();
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::MaterializeHolidays(holidays, response_tx) => {
                    let result = self.materialize_holidays(holidays);
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::LoadFrom(path, response_tx) => {
                    let result = self.load_from(path);
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::SaveAs(path, response_tx) => {
                    let result = storage::save_data(&path, &self.data);
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::Shutdown => {
                    info!("Event store actor shutting down");
                    break;
                }
            }
        }

        info!("Event store actor shut down");
    }

    fn add_event(&mut self, date: NaiveDate, draft: EventDraft) -> CalResult<bool> {
        let Some(event) = draft.into_event() else {
            // Invalid drafts are a silent no-op, not an error
            return Ok(false);
        };

        self.data.push_event(date, event);
        self.persist()?;
        Ok(true)
    }

    fn update_event(&mut self, date: NaiveDate, old: Event, draft: EventDraft) -> CalResult<bool> {
        let Some(event) = draft.into_event() else {
            return Ok(false);
        };

        if !self.data.remove_event(&date, &old) {
            return Ok(false);
        }

        // Remove-then-append: the updated event moves to the end of the
        // day's list
        self.data.push_event(date, event);
        self.persist()?;
        Ok(true)
    }

    fn delete_event(&mut self, date: NaiveDate, event: Event) -> CalResult<bool> {
        if !self.data.remove_event(&date, &event) {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    fn reset_events(&mut self) -> CalResult<()> {
        self.data.reset_to_holidays();
        self.persist()
    }

    fn materialize_holidays(
        &mut self,
        holidays: BTreeMap<NaiveDate, String>,
    ) -> CalResult<usize> {
        let inserted = self.data.materialize_holidays(&holidays);
        self.persist()?;
        Ok(inserted)
    }

    fn load_from(&mut self, path: PathBuf) -> CalResult<()> {
        // Same semantics as opening: an absent file yields an empty store,
        // a corrupt one is an error and the current state stays untouched
        self.data = storage::load_data(&path)?;
        Ok(())
    }

    fn persist(&self) -> CalResult<()> {
        storage::save_data(&self.path, &self.data)
    }
}
