//! Record store abstraction and its MongoDB implementation.
//!
//! Two collections, `events` and `users`. The store is handed to the event
//! service as an explicit constructor argument; nothing here is
//! process-global. Atomicity guarantees are per document: a
//! find-and-replace on a single id is atomic, cross-document sequences are
//! not.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Document, doc};
use futures::stream::TryStreamExt;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::date_range::DateRange;
use crate::error::{AgendaError, AgendaResult};
use crate::event::{EventDraft, EventRecord};
use crate::user::UserRecord;

const EVENTS_COLLECTION: &str = "events";
const USERS_COLLECTION: &str = "users";

/// Persistence operations the event service depends on.
///
/// All event operations take the owning user's id alongside the event id,
/// so one user can never observe or mutate another's events.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new event owned by `user_id`, returning the stored record
    /// with its assigned id.
    async fn insert_event(
        &self,
        draft: EventDraft,
        user_id: ObjectId,
    ) -> AgendaResult<EventRecord>;

    /// All events owned by `user_id`, optionally restricted to those whose
    /// stored `start_time` falls inside `window`.
    async fn events_for_user(
        &self,
        user_id: ObjectId,
        window: Option<DateRange>,
    ) -> AgendaResult<Vec<EventRecord>>;

    /// Atomically replace the event matching both `id` and `user_id`,
    /// returning the new value, or `None` when no such event exists.
    async fn replace_event(
        &self,
        id: ObjectId,
        user_id: ObjectId,
        draft: EventDraft,
    ) -> AgendaResult<Option<EventRecord>>;

    /// Delete the event matching both `id` and `user_id`.
    /// Returns the number of deleted records (0 or 1).
    async fn delete_event(&self, id: ObjectId, user_id: ObjectId) -> AgendaResult<u64>;

    async fn find_user_by_email(&self, email: &str) -> AgendaResult<Option<UserRecord>>;

    async fn insert_user(&self, email: &str) -> AgendaResult<UserRecord>;
}

/// MongoDB-backed record store.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to MongoDB and select the given database.
    pub async fn connect(url: &str, database: &str) -> AgendaResult<Self> {
        let client = Client::with_uri_str(url).await?;
        Ok(MongoStore {
            database: client.database(database),
        })
    }

    /// Create the unique index on `users.email`: the backstop that keeps
    /// concurrent first-time resolution of the same email from producing
    /// duplicate user records.
    pub async fn ensure_indexes(&self) -> AgendaResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users().create_index(index).await?;
        Ok(())
    }

    fn events(&self) -> Collection<EventRecord> {
        self.database.collection(EVENTS_COLLECTION)
    }

    fn users(&self) -> Collection<UserRecord> {
        self.database.collection(USERS_COLLECTION)
    }
}

/// Filter for a user's events: equality on `user_id`, half-open
/// `[from, to)` range on `start_time` when a window is given.
fn events_filter(user_id: ObjectId, window: Option<&DateRange>) -> Document {
    match window {
        Some(range) => doc! {
            "user_id": user_id,
            "start_time": {
                "$gte": bson::DateTime::from_chrono(range.from),
                "$lt": bson::DateTime::from_chrono(range.to),
            },
        },
        None => doc! { "user_id": user_id },
    }
}

#[async_trait]
impl RecordStore for MongoStore {
    async fn insert_event(
        &self,
        draft: EventDraft,
        user_id: ObjectId,
    ) -> AgendaResult<EventRecord> {
        let record = EventRecord::from_draft(draft, user_id);
        let result = self.events().insert_one(&record).await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AgendaError::Store("inserted event has no ObjectId".to_string()))?;

        // Read the document back so the caller sees exactly what was stored
        self.events()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| AgendaError::Store(format!("inserted event {} not found", id)))
    }

    async fn events_for_user(
        &self,
        user_id: ObjectId,
        window: Option<DateRange>,
    ) -> AgendaResult<Vec<EventRecord>> {
        let cursor = self
            .events()
            .find(events_filter(user_id, window.as_ref()))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn replace_event(
        &self,
        id: ObjectId,
        user_id: ObjectId,
        draft: EventDraft,
    ) -> AgendaResult<Option<EventRecord>> {
        let replacement = EventRecord::from_draft(draft, user_id);
        let updated = self
            .events()
            .find_one_and_replace(doc! { "_id": id, "user_id": user_id }, &replacement)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn delete_event(&self, id: ObjectId, user_id: ObjectId) -> AgendaResult<u64> {
        let result = self
            .events()
            .delete_one(doc! { "_id": id, "user_id": user_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn find_user_by_email(&self, email: &str) -> AgendaResult<Option<UserRecord>> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn insert_user(&self, email: &str) -> AgendaResult<UserRecord> {
        let user = UserRecord {
            id: None,
            email: email.to_string(),
        };
        let result = self.users().insert_one(&user).await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AgendaError::Store("inserted user has no ObjectId".to_string()))?;

        Ok(UserRecord {
            id: Some(id),
            email: email.to_string(),
        })
    }
}
