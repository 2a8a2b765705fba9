//! Blame cache for fast per-line lookups.
//!
//! Keeps one parsed attribution table per file so cursor moves and hovers
//! don't re-run `git blame`.
//! - Tables are built lazily on the first lookup for a file
//! - Invalidation drops the whole table; the next lookup rebuilds it
//! - A failed `git blame` stores an empty table ("no attribution")
//!
//! Used by: `Extension` for decorations and hovers

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::git::blame::parse_blame_output;
use crate::git::command::GitQuery;
use crate::git::repository::ResolvedFile;
use crate::models::{AttributionRecord, FileAttributionTable};

pub struct AttributionCache {
    git: Arc<dyn GitQuery>,
    /// absolute path -> parsed blame table
    tables: HashMap<PathBuf, FileAttributionTable>,
}

impl AttributionCache {
    pub fn new(git: Arc<dyn GitQuery>) -> Self {
        Self {
            git,
            tables: HashMap::new(),
        }
    }

    /// Attribution for a zero-based `line` of `file`, building the file's
    /// table if it is not cached.
    pub fn get(&mut self, file: &ResolvedFile, line: u32) -> Option<&AttributionRecord> {
        self.table(file).get(line)
    }

    /// Drop the cached table for `file`.
    pub fn invalidate(&mut self, file: &Path) {
        if self.tables.remove(file).is_some() {
            tracing::debug!("Invalidated blame cache for {}", file.display());
        }
    }

    #[cfg(test)]
    pub fn is_cached(&self, file: &Path) -> bool {
        self.tables.contains_key(file)
    }

    fn table(&mut self, file: &ResolvedFile) -> &FileAttributionTable {
        if !self.tables.contains_key(&file.absolute) {
            let table = self.compute(file);
            self.tables.insert(file.absolute.clone(), table);
        }

        &self.tables[&file.absolute]
    }

    fn compute(&self, file: &ResolvedFile) -> FileAttributionTable {
        let start = Instant::now();
        let relative = file.relative_str();

        match self.git.blame(&file.workspace_root, &relative) {
            Ok(output) => {
                let table = parse_blame_output(&output);
                if table.is_empty() {
                    tracing::debug!("No attributed lines in {}", relative);
                }
                tracing::info!(
                    "Blame table built for {}: {} lines in {:?}",
                    relative,
                    table.len(),
                    start.elapsed()
                );
                table
            }
            Err(e) => {
                tracing::warn!("No blame for {}: {}", relative, e);
                FileAttributionTable::default()
            }
        }
    }
}
