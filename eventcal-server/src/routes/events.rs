//! Event endpoints

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tracing::info;

use eventcal_core::event::parse_date;
use eventcal_core::{Event, EventDraft, events_on};

use crate::routes::extract::{ApiJson, ApiPath};
use crate::routes::{AppError, parse_id};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/api/events/on/{date}", get(list_events_on))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// GET /api/events - List all events
async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    let events = state.store()?.list()?;
    Ok(Json(events))
}

/// POST /api/events - Create a new event
async fn create_event(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<EventDraft>,
) -> Result<Json<Event>, AppError> {
    let new = draft.validate()?;
    let event = state.store()?.create(&new)?;

    info!(id = event.id, title = %event.title, "event created");
    Ok(Json(event))
}

/// GET /api/events/:id - Fetch one event
async fn get_event(
    State(state): State<AppState>,
    ApiPath(raw_id): ApiPath<String>,
) -> Result<Json<Event>, AppError> {
    let id = parse_id(&raw_id)?;
    let event = state
        .store()?
        .get(id)?
        .ok_or(eventcal_core::EventcalError::NotFound(id))?;

    Ok(Json(event))
}

/// PUT /api/events/:id - Replace an event
async fn update_event(
    State(state): State<AppState>,
    ApiPath(raw_id): ApiPath<String>,
    ApiJson(draft): ApiJson<EventDraft>,
) -> Result<Json<Event>, AppError> {
    let id = parse_id(&raw_id)?;
    let new = draft.validate()?;
    let event = state.store()?.update(id, &new)?;

    info!(id, title = %event.title, "event updated");
    Ok(Json(event))
}

/// DELETE /api/events/:id - Delete an event
async fn delete_event(
    State(state): State<AppState>,
    ApiPath(raw_id): ApiPath<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id(&raw_id)?;
    let event = state.store()?.delete(id)?;

    info!(id, title = %event.title, "event deleted");
    Ok(Json(DeleteResponse {
        message: "Event deleted successfully".to_string(),
    }))
}

/// GET /api/events/on/:date - Events occurring on a calendar date
async fn list_events_on(
    State(state): State<AppState>,
    ApiPath(raw_date): ApiPath<String>,
) -> Result<Json<Vec<Event>>, AppError> {
    let date = parse_date(&raw_date)?;
    let events = state.store()?.list()?;

    Ok(Json(events_on(&events, date).into_iter().cloned().collect()))
}
