//! Core types and logic for the agenda calendar backend.
//!
//! This crate provides everything below the HTTP layer:
//! - `EventRecord`/`UserRecord` and the `EventDraft` create payload
//! - read-time recurrence expansion (`recurrence`)
//! - the `RecordStore` abstraction and its MongoDB implementation (`store`)
//! - the user-scoped `EventService` orchestrating the above

pub mod date_range;
pub mod error;
pub mod event;
pub mod recurrence;
pub mod service;
pub mod store;
pub mod user;

// Re-export the main types at crate root for convenience
pub use date_range::DateRange;
pub use error::{AgendaError, AgendaResult};
pub use event::{EventDraft, EventRecord};
pub use recurrence::{Recurrence, expand_event};
pub use service::EventService;
pub use store::{MongoStore, RecordStore};
pub use user::UserRecord;
