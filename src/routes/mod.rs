//! Editor bridge route handlers - maps HTTP endpoints to extension operations.
//!
//! Each submodule defines routes for a feature area:
//! - `workspace`: Workspace folders (GET /api/v1/workspace)
//! - `events`: Editor notifications (cursor, focus, edit, save)
//! - `blame`: Per-line attribution, inline label and hover
//! - `history`: History navigation and the file history tree
//! - `content`: Virtual `git-history:` documents

pub mod blame;
pub mod content;
pub mod events;
pub mod history;
pub mod workspace;

use std::sync::MutexGuard;

use axum::Router;

use crate::error::{AppError, Result};
use crate::extension::{Extension, SharedExtension};

pub fn create_router(ext: SharedExtension) -> Router {
    Router::new()
        .merge(workspace::routes(ext.clone()))
        .merge(events::routes(ext.clone()))
        .merge(blame::routes(ext.clone()))
        .merge(history::routes(ext.clone()))
        .merge(content::routes(ext))
}

pub(crate) fn lock(ext: &SharedExtension) -> Result<MutexGuard<'_, Extension>> {
    ext.lock().map_err(|_| AppError::Internal("Lock poisoned".to_string()))
}
