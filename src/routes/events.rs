//! Event endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agenda_core::{DateRange, EventDraft, EventRecord};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events/", post(create_event).get(list_events))
        .route("/user/events/", get(list_user_events))
        .route("/events/{id}", put(update_event).delete(delete_event))
}

/// Identifies the requesting user on every event endpoint
#[derive(Deserialize)]
struct UserQuery {
    email: String,
}

#[derive(Deserialize)]
struct RangeQuery {
    email: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

/// Event as returned by the API, with identifiers rendered as hex strings
#[derive(Serialize)]
pub struct EventResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub color: String,
    pub recurrence: Option<String>,
}

impl From<EventRecord> for EventResponse {
    fn from(record: EventRecord) -> Self {
        EventResponse {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: record.user_id.to_hex(),
            title: record.title,
            description: record.description,
            start_time: record.start_time,
            end_time: record.end_time,
            event_type: record.event_type,
            color: record.color,
            recurrence: record.recurrence,
        }
    }
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

/// POST /events/ - Create a new event for the user
async fn create_event(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
    Json(draft): Json<EventDraft>,
) -> Result<Json<EventResponse>, AppError> {
    let created = state.service.create_event(&query.email, draft).await?;
    Ok(Json(created.into()))
}

/// GET /events/ - Expanded occurrences of events whose stored start falls
/// inside [start_date, end_date)
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let range = DateRange::new(query.start_date, query.end_date);
    let events = state
        .service
        .list_events_in_range(&query.email, range)
        .await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

/// GET /user/events/ - All expanded occurrences for the user
async fn list_user_events(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = state.service.list_all_user_events(&query.email).await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

/// PUT /events/:id - Replace an event the user owns
async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<UserQuery>,
    Json(draft): Json<EventDraft>,
) -> Result<Json<EventResponse>, AppError> {
    let updated = state
        .service
        .update_event(&event_id, &query.email, draft)
        .await?;
    Ok(Json(updated.into()))
}

/// DELETE /events/:id - Delete an event the user owns
async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    state.service.delete_event(&event_id, &query.email).await?;
    Ok(Json(MessageResponse {
        message: "Event deleted successfully".to_string(),
    }))
}
