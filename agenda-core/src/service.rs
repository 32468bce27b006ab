//! User-scoped event operations.
//!
//! The service orchestrates user resolution, the record store and
//! recurrence expansion. It holds no shared mutable state of its own; the
//! store handle is injected at construction time.

use bson::oid::ObjectId;

use crate::date_range::DateRange;
use crate::error::{AgendaError, AgendaResult};
use crate::event::{EventDraft, EventRecord};
use crate::recurrence::expand_event;
use crate::store::RecordStore;
use crate::user::UserRecord;

pub struct EventService<S> {
    store: S,
}

impl<S: RecordStore> EventService<S> {
    pub fn new(store: S) -> Self {
        EventService { store }
    }

    /// Map an email address to its user record, creating the record on
    /// first sight.
    ///
    /// The lookup-then-insert sequence is not atomic; a concurrent request
    /// may create the user in between, in which case the insert is rejected
    /// by the unique email index and one more lookup recovers the winner's
    /// record.
    pub async fn resolve_user(&self, email: &str) -> AgendaResult<UserRecord> {
        if let Some(user) = self.store.find_user_by_email(email).await? {
            return Ok(user);
        }
        match self.store.insert_user(email).await {
            Ok(user) => Ok(user),
            Err(err) => match self.store.find_user_by_email(email).await? {
                Some(user) => Ok(user),
                None => Err(err),
            },
        }
    }

    /// Persist a new event for the user, returning the stored record.
    pub async fn create_event(&self, email: &str, draft: EventDraft) -> AgendaResult<EventRecord> {
        let user = self.resolve_user(email).await?;
        self.store.insert_event(draft, owner_id(&user)?).await
    }

    /// Expanded occurrences of the user's events whose stored `start_time`
    /// falls inside `range`.
    ///
    /// The range applies to the stored event only: a recurring event that
    /// matches on its stored start contributes all of its fixed-count
    /// occurrences, inside the range or not.
    pub async fn list_events_in_range(
        &self,
        email: &str,
        range: DateRange,
    ) -> AgendaResult<Vec<EventRecord>> {
        let user = self.resolve_user(email).await?;
        let events = self
            .store
            .events_for_user(owner_id(&user)?, Some(range))
            .await?;
        Ok(events.iter().flat_map(expand_event).collect())
    }

    /// Expanded occurrences of all the user's events.
    pub async fn list_all_user_events(&self, email: &str) -> AgendaResult<Vec<EventRecord>> {
        let user = self.resolve_user(email).await?;
        let events = self.store.events_for_user(owner_id(&user)?, None).await?;
        Ok(events.iter().flat_map(expand_event).collect())
    }

    /// Replace the event matching both `id` and the resolved user.
    ///
    /// A wrong id and an event owned by someone else both surface as
    /// `EventNotFound`; callers cannot tell the two apart.
    pub async fn update_event(
        &self,
        id: &str,
        email: &str,
        draft: EventDraft,
    ) -> AgendaResult<EventRecord> {
        let event_id = parse_event_id(id)?;
        let user = self.resolve_user(email).await?;
        self.store
            .replace_event(event_id, owner_id(&user)?, draft)
            .await?
            .ok_or_else(|| AgendaError::EventNotFound(id.to_string()))
    }

    /// Delete the event matching both `id` and the resolved user.
    pub async fn delete_event(&self, id: &str, email: &str) -> AgendaResult<()> {
        let event_id = parse_event_id(id)?;
        let user = self.resolve_user(email).await?;
        let deleted = self.store.delete_event(event_id, owner_id(&user)?).await?;
        if deleted == 0 {
            return Err(AgendaError::EventNotFound(id.to_string()));
        }
        Ok(())
    }
}

fn parse_event_id(raw: &str) -> AgendaResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AgendaError::InvalidId(raw.to_string()))
}

fn owner_id(user: &UserRecord) -> AgendaResult<ObjectId> {
    user.id
        .ok_or_else(|| AgendaError::Store("user record missing _id".to_string()))
}
