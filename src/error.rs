//! Application error types and HTTP response mapping.
//!
//! - `AppError`: conditions surfaced to the user or the bridge client
//! - `GitError`: failures of the external `git` process, always degraded
//!   to an empty result by the caller
//!
//! Error mappings for the bridge:
//! - `NoFileSelected`, `NotLocalFile`, `FileNotInWorkspace`, `InvalidRequest` → 400
//! - `Internal` → 500

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file selected or open in the editor.")]
    NoFileSelected,

    #[error("The selected file is not a local file.")]
    NotLocalFile,

    #[error("The selected file is not in a workspace.")]
    FileNotInWorkspace,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NoFileSelected
            | AppError::NotLocalFile
            | AppError::FileNotInWorkspace
            | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failure of a `git` invocation.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run `git {command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`git {command}` exited with {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`git {command}` produced more than {limit} bytes of output")]
    OutputTooLarge { command: String, limit: usize },

    #[error("`git {command}` produced output that is not valid UTF-8")]
    InvalidUtf8 { command: String },

    #[error("I/O error while reading git output: {0}")]
    Io(#[from] std::io::Error),
}
