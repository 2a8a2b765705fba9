//! Blame data transfer objects.
//!
//! Provides per-line attribution for the working copy of a file, as reported
//! by `git blame --line-porcelain`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribution for a single source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionRecord {
    /// First 8 characters of the commit id
    pub short_id: String,
    /// Full 40-character commit id
    pub full_id: String,
    pub author: String,
    /// Author email without angle brackets
    pub author_email: String,
    /// Relative age at parse time, e.g. "3 days ago"
    pub relative_date: String,
    /// Author time as RFC 3339 UTC with milliseconds
    pub date_iso: String,
    /// Author time as Unix seconds
    pub author_time: i64,
    /// First line of the commit message
    pub summary: String,
    pub committer: String,
    pub committer_email: String,
}

/// Zero-based line number → attribution for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAttributionTable {
    lines: HashMap<u32, AttributionRecord>,
}

impl FileAttributionTable {
    pub fn insert(&mut self, line: u32, record: AttributionRecord) {
        self.lines.insert(line, record);
    }

    pub fn get(&self, line: u32) -> Option<&AttributionRecord> {
        self.lines.get(&line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Response for a blame request on one line of a file.
#[derive(Debug, Serialize)]
pub struct BlameResponse {
    pub path: String,
    /// Zero-based line number
    pub line: u32,
    pub record: Option<AttributionRecord>,
    /// Inline label, absent when no attribution is available
    pub inline: Option<String>,
    /// Hover markdown, absent when no attribution is available
    pub hover: Option<String>,
}
