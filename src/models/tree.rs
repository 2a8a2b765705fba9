//! Tree view DTOs.
//!
//! - `CommitTreeItem`: one row in the file history tree
//! - `TreeAction`: what the host runs when the row is clicked
//!
//! Used by: the source-control "File History" tree view

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTreeItem {
    /// Commit summary
    pub label: String,
    /// `author - compact age`
    pub description: String,
    pub tooltip: String,
    pub icon: String,
    pub action: TreeAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum TreeAction {
    /// Open the diff for the commit at `index` out of `total`
    ShowCommitDiff { index: usize, total: usize },
}
