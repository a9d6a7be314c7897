//! Note endpoints
//!
//! Handlers only translate between HTTP and the store; the store decides
//! what exists.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::context::RequestContext;
use crate::http::error::ApiError;
use crate::http::extractors::{NoteIdPath, ValidJson};
use crate::http::server::AppState;
use crate::model::{Note, NoteInput};

/// GET /api/v1/notes - list notes, newest first
async fn list_notes(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.store.get_all(&ctx).await?;
    Ok(Json(notes))
}

/// POST /api/v1/notes - create a note
async fn create_note(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidJson(input): ValidJson<NoteInput>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state.store.create(&ctx, input).await?;
    tracing::info!(note_id = note.id, "note created");
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/v1/notes/{id} - get a single note
async fn get_note(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    NoteIdPath(id): NoteIdPath,
) -> Result<Json<Note>, ApiError> {
    let note = state.store.get(&ctx, id).await?;
    Ok(Json(note))
}

/// PATCH|PUT /api/v1/notes/{id} - replace title and content
async fn update_note(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    NoteIdPath(id): NoteIdPath,
    ValidJson(input): ValidJson<NoteInput>,
) -> Result<Json<Note>, ApiError> {
    let note = state.store.update(&ctx, id, input).await?;
    Ok(Json(note))
}

/// DELETE /api/v1/notes/{id} - delete a note
async fn delete_note(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    NoteIdPath(id): NoteIdPath,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&ctx, id).await?;
    tracing::info!(note_id = id, "note deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Note routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/notes", get(list_notes).post(create_note))
        .route(
            "/api/v1/notes/{id}",
            get(get_note)
                .patch(update_note)
                .put(update_note)
                .delete(delete_note),
        )
}
