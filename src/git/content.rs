//! Virtual document content for `git-history:` URIs.
//!
//! The body is a short commit banner followed by the file as it was at the
//! URI's revision. Unresolvable revisions (such as the synthesized parent of
//! a root commit) produce an empty body, which the diff pane shows as an
//! empty file.

use std::path::Path;

use crate::git::command::GitQuery;
use crate::git::history::parse_log_line;
use crate::git::repository::format_log_date;
use crate::models::RevisionUri;

/// Resolve a raw URI string. Malformed URIs resolve to an empty body.
pub fn provide_content_for(git: &dyn GitQuery, uri: &str) -> String {
    match RevisionUri::parse(uri) {
        Some(uri) => provide_content(git, &uri),
        None => {
            tracing::debug!("Ignoring malformed virtual document URI: {}", uri);
            String::new()
        }
    }
}

pub fn provide_content(git: &dyn GitQuery, uri: &RevisionUri) -> String {
    let root = Path::new(&uri.workspace_root);
    let mut body = commit_banner(git, root, &uri.revision);

    match git.show_file(root, &uri.revision, &uri.relative_path) {
        Ok(content) => {
            body.push('\n');
            body.push_str(&content);
        }
        Err(e) => {
            tracing::debug!("No content for {}: {}", uri, e);
        }
    }

    body
}

fn commit_banner(git: &dyn GitQuery, root: &Path, revision: &str) -> String {
    let output = match git.show_commit(root, revision) {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!("No commit metadata for {}: {}", revision, e);
            return String::new();
        }
    };

    let Some(line) = output.lines().find(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let commit = parse_log_line(line);

    format!(
        "\n// ---\n// Commit: {}\n// Author: {}\n// Date: {}\n// Message: {}\n",
        commit.id,
        commit.author,
        format_log_date(&commit.date),
        commit.summary.trim()
    )
}
