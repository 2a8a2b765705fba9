//! Virtual document endpoint.
//!
//! GET /api/v1/content?uri=git-history:<relativePath>?ref=<revision>&path=<workspaceRoot>
//!
//! Returns the document body as plain text: a commit banner followed by the
//! file at that revision. Unresolvable revisions return an empty body.
//!
//! Used by: the editor's text document content provider for the diff panes

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::extension::SharedExtension;
use crate::routes::lock;

pub fn routes(ext: SharedExtension) -> Router {
    Router::new()
        .route("/api/v1/content", get(get_content))
        .with_state(ext)
}

#[derive(Debug, Deserialize)]
struct ContentQuery {
    uri: String,
}

async fn get_content(
    State(ext): State<SharedExtension>,
    Query(query): Query<ContentQuery>,
) -> Result<String> {
    let body = lock(&ext)?.document_content(&query.uri);
    Ok(body)
}
