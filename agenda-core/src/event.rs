//! Event records and the create/update payload.
//!
//! The stored form and the occurrence form returned to callers share the
//! `EventRecord` type: an occurrence is a value copy of its source event
//! with shifted timestamps, and is never persisted.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_event_type() -> String {
    "task".to_string()
}

fn default_color() -> String {
    "#007BFF".to_string()
}

/// A calendar event as persisted in the `events` collection.
///
/// Records written by older revisions of the service may lack the `type`
/// and `color` tags; deserialization back-fills them with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user. Every read, replace and delete filters on this field
    /// in addition to the event id.
    pub user_id: ObjectId,
    pub title: String,
    pub description: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub end_time: DateTime<Utc>,
    #[serde(rename = "type", default = "default_event_type")]
    pub event_type: String,
    #[serde(default = "default_color")]
    pub color: String,
    /// Raw recurrence tag, interpreted case-insensitively at read time.
    /// Absent, empty and "none" all mean a single event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
}

impl EventRecord {
    /// Build the stored form of a draft for `user_id`.
    /// The id is assigned by the store on insert.
    pub fn from_draft(draft: EventDraft, user_id: ObjectId) -> Self {
        EventRecord {
            id: None,
            user_id,
            title: draft.title,
            description: draft.description,
            start_time: draft.start_time,
            end_time: draft.end_time,
            event_type: draft.event_type,
            color: draft.color,
            recurrence: draft.recurrence,
        }
    }
}

/// Payload for creating or replacing an event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "type", default = "default_event_type")]
    pub event_type: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub recurrence: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use chrono::TimeZone;

    #[test]
    fn missing_tags_are_backfilled_on_deserialization() {
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 15, 0, 0).unwrap();
        let doc = doc! {
            "_id": ObjectId::new(),
            "user_id": ObjectId::new(),
            "title": "Dentist",
            "description": "",
            "start_time": bson::DateTime::from_chrono(start),
            "end_time": bson::DateTime::from_chrono(start),
        };

        let record: EventRecord = bson::from_document(doc).unwrap();
        assert_eq!(record.event_type, "task");
        assert_eq!(record.color, "#007BFF");
        assert_eq!(record.recurrence, None);
    }

    #[test]
    fn draft_uses_the_wire_field_names() {
        let draft: EventDraft = serde_json::from_value(serde_json::json!({
            "title": "Standup",
            "description": "Daily sync",
            "start_time": "2024-01-01T09:00:00Z",
            "end_time": "2024-01-01T09:15:00Z",
            "type": "meeting",
            "color": "#28a745",
            "recurrence": "daily",
        }))
        .unwrap();

        assert_eq!(draft.event_type, "meeting");
        assert_eq!(draft.color, "#28a745");
        assert_eq!(draft.recurrence.as_deref(), Some("daily"));
    }

    #[test]
    fn draft_tags_default_when_omitted() {
        let draft: EventDraft = serde_json::from_value(serde_json::json!({
            "title": "Standup",
            "description": "",
            "start_time": "2024-01-01T09:00:00Z",
            "end_time": "2024-01-01T09:15:00Z",
        }))
        .unwrap();

        assert_eq!(draft.event_type, "task");
        assert_eq!(draft.color, "#007BFF");
        assert_eq!(draft.recurrence, None);
    }
}
