//! Note HTTP Routes
//!
//! - `POST /note` stores a note and echoes it back
//! - `GET /note/:id` fetches a note from the data file
//! - `GET /note/` fetches the note stored under the empty id

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::note::{Note, NoteError, NoteStore};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

// ==================
// Shared State
// ==================

/// Note state shared across handlers
pub struct NoteState {
    pub store: NoteStore,
    pub metrics: Arc<MetricsRegistry>,
}

impl NoteState {
    pub fn new(store: NoteStore, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    fn record_failure(&self, op: &str, err: &NoteError) {
        match err {
            NoteError::NoteNotFound(_) => self.metrics.increment_notes_missing(),
            _ => {
                self.metrics.increment_store_errors();
                log_event_with_fields(
                    Event::StoreError,
                    &[
                        ("error", err.to_string().as_str()),
                        ("kind", err.kind().as_str()),
                        ("op", op),
                    ],
                );
            }
        }
    }
}

// ==================
// Error Response
// ==================

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&NoteError> for ErrorResponse {
    fn from(err: &NoteError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code(),
        }
    }
}

impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

// ==================
// Note Routes
// ==================

/// Create note routes
pub fn note_routes(state: Arc<NoteState>) -> Router {
    Router::new()
        .route("/note", post(save_note_handler))
        .route("/note/", get(get_empty_id_note_handler))
        .route("/note/:id", get(get_note_handler))
        .with_state(state)
}

async fn save_note_handler(
    State(state): State<Arc<NoteState>>,
    Json(note): Json<Note>,
) -> Result<Json<Note>, NoteError> {
    match state.store.put(note) {
        Ok(note) => {
            state.metrics.increment_notes_stored();
            Ok(Json(note))
        }
        Err(e) => {
            state.record_failure("put", &e);
            Err(e)
        }
    }
}

async fn get_note_handler(
    State(state): State<Arc<NoteState>>,
    Path(id): Path<String>,
) -> Result<Json<Note>, NoteError> {
    fetch_note(&state, &id)
}

// `:id` never matches an empty segment
async fn get_empty_id_note_handler(
    State(state): State<Arc<NoteState>>,
) -> Result<Json<Note>, NoteError> {
    fetch_note(&state, "")
}

fn fetch_note(state: &NoteState, id: &str) -> Result<Json<Note>, NoteError> {
    match state.store.get(id) {
        Ok(note) => {
            state.metrics.increment_notes_fetched();
            Ok(Json(note))
        }
        Err(e) => {
            state.record_failure("get", &e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_response_body() {
        let body = ErrorResponse::from(&NoteError::NoteNotFound("a1".into()));
        assert_eq!(body.error, "Note not found");
        assert_eq!(body.code, 404);
    }

    #[test]
    fn test_error_into_response_status() {
        let response = NoteError::FileNotFound(PathBuf::from("notes.json")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = NoteError::NoteNotFound("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_record_failure_counts() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = NoteState::new(
            NoteStore::new(dir.path().join("notes.json")),
            Arc::new(MetricsRegistry::new()),
        );

        state.record_failure("get", &NoteError::NoteNotFound("x".into()));
        state.record_failure("put", &NoteError::Io("disk full".into()));

        let snapshot = state.metrics.snapshot();
        assert_eq!(snapshot.notes_missing, 1);
        assert_eq!(snapshot.store_errors, 1);
    }
}
