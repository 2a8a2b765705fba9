use serde::{Deserialize, Serialize};

/// One commit from `git log --follow` for a file, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub author: String,
    /// Author date as printed by `%ai`
    pub date: String,
    /// Subject line, may contain `|`
    pub summary: String,
}

impl CommitRecord {
    /// Abbreviated id used in titles.
    pub fn short_id(&self) -> &str {
        self.id.get(..7).unwrap_or(&self.id)
    }
}

/// Where the history navigator currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryPosition {
    pub path: String,
    /// Zero-based, 0 is the newest commit
    pub index: usize,
    pub total: usize,
    pub commit: CommitRecord,
}
