//! Diff-related DTOs.
//!
//! - `RevisionUri`: address of a file at a revision, served as a virtual
//!   document under the `git-history:` scheme
//! - `DiffRequest`: two revision URIs and a title for the host's diff pane
//!
//! Used by: History navigator, tree actions, content provider

use serde::{Deserialize, Serialize};
use std::fmt;

/// URI scheme the editor registers for virtual documents.
pub const URI_SCHEME: &str = "git-history";

/// `git-history:<relativePath>?ref=<revision>&path=<workspaceRoot>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RevisionUri {
    pub relative_path: String,
    pub revision: String,
    pub workspace_root: String,
}

impl RevisionUri {
    pub fn new(
        relative_path: impl Into<String>,
        revision: impl Into<String>,
        workspace_root: impl Into<String>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            revision: revision.into(),
            workspace_root: workspace_root.into(),
        }
    }

    /// Parse a URI in the shape produced by `Display`.
    ///
    /// The workspace root is everything after `&path=` so roots containing
    /// `&` survive. Returns `None` if the scheme, `ref` or `path` is missing
    /// or empty.
    pub fn parse(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix(URI_SCHEME)?.strip_prefix(':')?;
        let (relative_path, query) = rest.split_once("?ref=")?;
        let (revision, workspace_root) = query.split_once("&path=")?;

        if revision.is_empty() || workspace_root.is_empty() {
            return None;
        }

        Some(Self::new(relative_path, revision, workspace_root))
    }
}

impl fmt::Display for RevisionUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}?ref={}&path={}",
            URI_SCHEME, self.relative_path, self.revision, self.workspace_root
        )
    }
}

impl From<RevisionUri> for String {
    fn from(uri: RevisionUri) -> Self {
        uri.to_string()
    }
}

impl TryFrom<String> for RevisionUri {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RevisionUri::parse(&value).ok_or_else(|| format!("invalid {} URI: {}", URI_SCHEME, value))
    }
}

/// Request for the host to open a side-by-side diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRequest {
    /// Older revision ("before")
    pub left: RevisionUri,
    /// Selected revision ("after")
    pub right: RevisionUri,
    pub title: String,
}
