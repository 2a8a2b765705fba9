use axum::{extract::State, routing::get, Json, Router};

use crate::error::Result;
use crate::extension::SharedExtension;
use crate::git::repository::WorkspaceFolder;
use crate::routes::lock;

pub fn routes(ext: SharedExtension) -> Router {
    Router::new()
        .route("/api/v1/workspace", get(get_workspace))
        .with_state(ext)
}

async fn get_workspace(State(ext): State<SharedExtension>) -> Result<Json<Vec<WorkspaceFolder>>> {
    let folders = lock(&ext)?.workspace_folders();
    Ok(Json(folders))
}
