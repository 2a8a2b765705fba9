//! Editor event endpoint.
//!
//! POST /api/v1/events { "type": "cursor_moved" | "active_editor_changed" |
//!                       "document_changed" | "document_saved", ... }
//!
//! Returns the host messages the event produced, typically a decoration
//! update for the current line.
//!
//! Used by: the editor plugin's selection, focus, change and save listeners

use axum::{extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::extension::SharedExtension;
use crate::host::{EditorEvent, HostMessage, Outbox};
use crate::routes::lock;

pub fn routes(ext: SharedExtension) -> Router {
    Router::new()
        .route("/api/v1/events", post(post_event))
        .with_state(ext)
}

async fn post_event(
    State(ext): State<SharedExtension>,
    Json(event): Json<EditorEvent>,
) -> Result<Json<Vec<HostMessage>>> {
    let mut outbox = Outbox::default();
    lock(&ext)?.handle_event(event, &mut outbox);
    Ok(Json(outbox.into_messages()))
}
