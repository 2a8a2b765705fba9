use std::time::Instant;

use crate::git::command::GitQuery;
use crate::git::repository::ResolvedFile;
use crate::models::CommitRecord;

/// Commits that touched `file`, newest first, following renames.
///
/// A failed query yields an empty list, which callers treat as "no history".
pub fn get_file_commits(git: &dyn GitQuery, file: &ResolvedFile) -> Vec<CommitRecord> {
    let start = Instant::now();
    let relative = file.relative_str();

    match git.log_file(&file.workspace_root, &relative) {
        Ok(output) => {
            let commits = parse_log_output(&output);
            tracing::info!(
                "History for {}: {} commits in {:?}",
                relative,
                commits.len(),
                start.elapsed()
            );
            commits
        }
        Err(e) => {
            tracing::warn!("Failed to get file history for {}: {}", relative, e);
            Vec::new()
        }
    }
}

/// Parse `%H|%an|%ai|%s` lines. Blank lines are skipped.
pub fn parse_log_output(output: &str) -> Vec<CommitRecord> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_log_line)
        .collect()
}

/// Split one log line on `|`. The subject is everything after the third
/// delimiter, so pipes inside it are kept.
pub fn parse_log_line(line: &str) -> CommitRecord {
    let mut fields = line.splitn(4, '|');
    let mut next = || fields.next().unwrap_or_default().to_string();

    CommitRecord {
        id: next(),
        author: next(),
        date: next(),
        summary: next(),
    }
}
