//! Blame endpoints.
//!
//! GET /api/v1/blame?path=<absolute path>&line=<zero-based>&scheme=<optional>
//!   Attribution record, inline label and hover markdown for one line.
//!   All three are null when the line has no attribution.
//!
//! GET /api/v1/hover?path=&line=&scheme=
//!   Hover card only; 204 when there is nothing to show.
//!
//! Used by: inline decoration and hover provider

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Result;
use crate::extension::SharedExtension;
use crate::host::DocumentRef;
use crate::models::BlameResponse;
use crate::routes::lock;

pub fn routes(ext: SharedExtension) -> Router {
    Router::new()
        .route("/api/v1/blame", get(get_blame))
        .route("/api/v1/hover", get(get_hover))
        .with_state(ext)
}

#[derive(Debug, Deserialize)]
struct LineQuery {
    path: PathBuf,
    line: u32,
    scheme: Option<String>,
}

impl LineQuery {
    fn document(&self) -> DocumentRef {
        DocumentRef {
            scheme: self.scheme.clone().unwrap_or_else(|| "file".to_string()),
            path: self.path.clone(),
        }
    }
}

async fn get_blame(
    State(ext): State<SharedExtension>,
    Query(query): Query<LineQuery>,
) -> Result<Json<BlameResponse>> {
    let response = lock(&ext)?.blame_line(&query.document(), query.line);
    Ok(Json(response))
}

async fn get_hover(
    State(ext): State<SharedExtension>,
    Query(query): Query<LineQuery>,
) -> Result<Response> {
    let card = lock(&ext)?.hover(&query.document(), query.line);
    Ok(match card {
        Some(card) => Json(card).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::Extension;
    use crate::git::Workspace;
    use crate::git::testing::{FakeGit, porcelain};
    use std::sync::{Arc, Mutex};

    fn shared() -> SharedExtension {
        let git = Arc::new(FakeGit::with_blame(&porcelain(2)));
        Arc::new(Mutex::new(Extension::activate(Workspace::new(["/work"]), git)))
    }

    fn query(line: u32) -> Query<LineQuery> {
        Query(LineQuery {
            path: PathBuf::from("/work/src/lib.rs"),
            line,
            scheme: None,
        })
    }

    #[tokio::test]
    async fn test_hover_without_attribution_is_no_content() {
        let response = get_hover(State(shared()), query(40)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_hover_with_attribution() {
        let response = get_hover(State(shared()), query(1)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_blame_fields_absent_together() {
        let ext = shared();

        let Json(found) = get_blame(State(ext.clone()), query(0)).await.unwrap();
        assert_eq!(found.record.unwrap().author, "Alice");
        assert!(found.inline.unwrap().starts_with("Alice, "));
        assert!(found.hover.is_some());

        let Json(missing) = get_blame(State(ext), query(40)).await.unwrap();
        assert!(missing.record.is_none());
        assert!(missing.inline.is_none());
        assert!(missing.hover.is_none());
    }

    #[tokio::test]
    async fn test_non_file_scheme_has_no_attribution() {
        let Query(mut q) = query(0);
        q.scheme = Some("untitled".to_string());
        let response = get_hover(State(shared()), Query(q)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
