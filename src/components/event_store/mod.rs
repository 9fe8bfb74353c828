//! The event store: per-day event lists and materialized holidays,
//! synchronized with a JSON data file through a single-owner actor.

mod actor;
mod handle;
pub mod models;
mod storage;

pub use handle::EventStoreHandle;
