//! Note CRUD routes.
//!
//! Every query is parameterized by the verified principal's tenant id —
//! never by anything the client sent. A note that exists under another
//! tenant is reported exactly like a missing one (404), so note ids leak
//! nothing across tenants. Creation runs the quota check first.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use notewise_core::{Principal, quota};
use notewise_storage::models::Note;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or updating a note.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NoteRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.title.is_empty() || self.content.is_empty() {
            return Err(ApiError::BadRequest(
                "title and content are required".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Build the notes router (behind the gate).
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
}

/// `GET /api/notes` — list the caller's tenant's notes, newest first.
async fn list_notes(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.store.list_notes(principal.tenant.id).await?;
    Ok(Json(notes))
}

/// `POST /api/notes` — create a note, subject to the tenant's quota.
async fn create_note(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<NoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    body.validate()?;

    quota::check_note_quota(state.store.as_ref(), &principal.tenant).await?;

    let note = state
        .store
        .create_note(
            principal.tenant.id,
            principal.user.id,
            &body.title,
            &body.content,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// `GET /api/notes/{id}` — fetch one note, tenant-scoped.
async fn get_note(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, ApiError> {
    state
        .store
        .get_note(id, principal.tenant.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("note not found".to_owned()))
}

/// `PUT /api/notes/{id}` — update one note, tenant-scoped.
async fn update_note(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(body): Json<NoteRequest>,
) -> Result<Json<Note>, ApiError> {
    body.validate()?;

    state
        .store
        .update_note(id, principal.tenant.id, &body.title, &body.content)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("note not found".to_owned()))
}

/// `DELETE /api/notes/{id}` — delete one note, tenant-scoped.
async fn delete_note(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.store.delete_note(id, principal.tenant.id).await?;
    if !deleted {
        return Err(ApiError::NotFound("note not found".to_owned()));
    }

    Ok(Json(serde_json::json!({ "message": "note deleted" })))
}
