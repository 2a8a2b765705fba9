//! File history endpoints.
//!
//! - POST /api/v1/history/show { scheme?, path? }
//!   Starts a history session for the given file, or the active editor's.
//! - POST /api/v1/history/previous, POST /api/v1/history/next
//!   Step to an older / newer commit.
//!
//!   All three return the host messages (diff request or notice) plus the
//!   navigator's position.
//!
//! - GET  /api/v1/history/tree          current tree rows
//! - POST /api/v1/history/tree/refresh  recompute rows for the active file
//! - POST /api/v1/history/tree/open { index }  run a row's action
//!
//! Used by: "Show File History" commands and the File History tree view

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::extension::{Extension, SharedExtension};
use crate::host::{DocumentRef, HostMessage, Outbox};
use crate::models::{CommitTreeItem, HistoryPosition};
use crate::routes::lock;

pub fn routes(ext: SharedExtension) -> Router {
    Router::new()
        .route("/api/v1/history/show", post(show_history))
        .route("/api/v1/history/previous", post(navigate_previous))
        .route("/api/v1/history/next", post(navigate_next))
        .route("/api/v1/history/tree", get(get_tree))
        .route("/api/v1/history/tree/refresh", post(refresh_tree))
        .route("/api/v1/history/tree/open", post(open_tree_item))
        .with_state(ext)
}

#[derive(Debug, Serialize)]
struct HistoryResponse {
    messages: Vec<HostMessage>,
    position: Option<HistoryPosition>,
}

impl HistoryResponse {
    fn new(ext: &Extension, outbox: Outbox) -> Self {
        Self {
            messages: outbox.into_messages(),
            position: ext.navigator().session().and_then(|s| s.position()),
        }
    }
}

/// Explicit target; without a path the active editor's file is used.
#[derive(Debug, Default, Deserialize)]
struct ShowRequest {
    scheme: Option<String>,
    path: Option<PathBuf>,
}

impl ShowRequest {
    fn document(self) -> Option<DocumentRef> {
        let path = self.path?;
        Some(DocumentRef {
            scheme: self.scheme.unwrap_or_else(|| "file".to_string()),
            path,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OpenRequest {
    index: usize,
}

#[derive(Debug, Serialize)]
struct OpenResponse {
    opened: bool,
    messages: Vec<HostMessage>,
}

async fn show_history(
    State(ext): State<SharedExtension>,
    body: Bytes,
) -> Result<Json<HistoryResponse>> {
    // An empty body means "the active editor's file"
    let request: ShowRequest = if body.is_empty() {
        ShowRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::InvalidRequest(e.to_string()))?
    };
    let target = request.document();
    let mut ext = lock(&ext)?;
    let mut outbox = Outbox::default();
    ext.show_file_history(target.as_ref(), &mut outbox);
    Ok(Json(HistoryResponse::new(&ext, outbox)))
}

async fn navigate_previous(State(ext): State<SharedExtension>) -> Result<Json<HistoryResponse>> {
    let mut ext = lock(&ext)?;
    let mut outbox = Outbox::default();
    ext.navigate_previous(&mut outbox);
    Ok(Json(HistoryResponse::new(&ext, outbox)))
}

async fn navigate_next(State(ext): State<SharedExtension>) -> Result<Json<HistoryResponse>> {
    let mut ext = lock(&ext)?;
    let mut outbox = Outbox::default();
    ext.navigate_next(&mut outbox);
    Ok(Json(HistoryResponse::new(&ext, outbox)))
}

async fn get_tree(State(ext): State<SharedExtension>) -> Result<Json<Vec<CommitTreeItem>>> {
    let items = lock(&ext)?.tree_items().to_vec();
    Ok(Json(items))
}

async fn refresh_tree(State(ext): State<SharedExtension>) -> Result<Json<Vec<CommitTreeItem>>> {
    let items = lock(&ext)?.refresh_tree().to_vec();
    Ok(Json(items))
}

async fn open_tree_item(
    State(ext): State<SharedExtension>,
    Json(request): Json<OpenRequest>,
) -> Result<Json<OpenResponse>> {
    let mut outbox = Outbox::default();
    let opened = lock(&ext)?.open_tree_item(request.index, &mut outbox);
    Ok(Json(OpenResponse {
        opened,
        messages: outbox.into_messages(),
    }))
}
