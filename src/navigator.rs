//! File history navigation.
//!
//! Holds at most one session: the file, its commits (newest first) and a
//! cursor into them. "Previous" walks toward older commits, "next" toward
//! newer ones, and every move asks the host to diff the selected commit
//! against the one before it.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::git::GitQuery;
use crate::git::history::get_file_commits;
use crate::git::repository::{ResolvedFile, Workspace};
use crate::host::{DocumentRef, HostSurface};
use crate::models::{CommitRecord, DiffRequest, HistoryPosition, RevisionUri};

const NO_HISTORY: &str = "No Git history found for this file.";

#[derive(Debug, Clone)]
pub struct HistorySession {
    pub file: ResolvedFile,
    pub commits: Vec<CommitRecord>,
    /// Index into `commits`; 0 is the newest
    pub cursor: usize,
}

impl HistorySession {
    pub fn position(&self) -> Option<HistoryPosition> {
        Some(HistoryPosition {
            path: self.file.relative_str(),
            index: self.cursor,
            total: self.commits.len(),
            commit: self.commits.get(self.cursor)?.clone(),
        })
    }
}

pub struct HistoryNavigator {
    git: Arc<dyn GitQuery>,
    session: Option<HistorySession>,
}

impl HistoryNavigator {
    pub fn new(git: Arc<dyn GitQuery>) -> Self {
        Self { git, session: None }
    }

    pub fn session(&self) -> Option<&HistorySession> {
        self.session.as_ref()
    }

    /// Start a session for `target`, falling back to the active document.
    ///
    /// On success the newest commit's diff is requested. An empty history
    /// shows a notice and leaves the navigator idle.
    pub fn show_history(
        &mut self,
        target: Option<&DocumentRef>,
        active: Option<&DocumentRef>,
        workspace: &Workspace,
        host: &mut dyn HostSurface,
    ) -> Result<()> {
        let document = target.or(active).ok_or(AppError::NoFileSelected)?;
        if !document.is_local() {
            return Err(AppError::NotLocalFile);
        }
        let file = workspace
            .resolve(&document.path)
            .ok_or(AppError::FileNotInWorkspace)?;

        let commits = get_file_commits(self.git.as_ref(), &file);
        if commits.is_empty() {
            self.session = None;
            host.show_info(NO_HISTORY);
            return Ok(());
        }

        tracing::debug!(
            "History session for {} with {} commits",
            file.relative_str(),
            commits.len()
        );
        self.session = Some(HistorySession {
            file,
            commits,
            cursor: 0,
        });
        self.request_diff(host);
        Ok(())
    }

    /// Step to the next-older commit. No-op at the oldest or when idle.
    pub fn navigate_previous(&mut self, host: &mut dyn HostSurface) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.cursor + 1 < session.commits.len() {
            session.cursor += 1;
            self.request_diff(host);
        }
    }

    /// Step to the next-newer commit. No-op at the newest or when idle.
    pub fn navigate_next(&mut self, host: &mut dyn HostSurface) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.cursor > 0 {
            session.cursor -= 1;
            self.request_diff(host);
        }
    }

    fn request_diff(&self, host: &mut dyn HostSurface) {
        if let Some(session) = &self.session {
            if let Some(request) = diff_request(&session.file, &session.commits, session.cursor) {
                host.show_diff(request);
            }
        }
    }
}

/// Diff for the commit at `index` in a newest-first list.
///
/// "Before" is the next-older commit, or `<id>~1` for the oldest one, which
/// resolves to an empty document when the commit is a root.
pub fn diff_request(
    file: &ResolvedFile,
    commits: &[CommitRecord],
    index: usize,
) -> Option<DiffRequest> {
    let commit = commits.get(index)?;
    let before = match commits.get(index + 1) {
        Some(older) => older.id.clone(),
        None => format!("{}~1", commit.id),
    };

    let relative = file.relative_str();
    let root = file.root_str();

    Some(DiffRequest {
        left: RevisionUri::new(relative.as_str(), before, root.as_str()),
        right: RevisionUri::new(relative, commit.id.as_str(), root),
        title: format!(
            "{} - {} ({}/{})",
            file.file_name(),
            commit.short_id(),
            index + 1,
            commits.len()
        ),
    })
}
