//! "File History" tree for the active editor.
//!
//! Lists the active file's commits as tree rows. Rows are rebuilt when the
//! active editor changes or on an explicit refresh, and clicking a row opens
//! the same diff the history navigator would show for that commit.

use chrono::Utc;
use std::sync::Arc;

use crate::git::GitQuery;
use crate::git::history::get_file_commits;
use crate::git::repository::{ResolvedFile, Workspace, format_compact_age, format_log_date};
use crate::host::{DocumentRef, HostSurface};
use crate::models::{CommitRecord, CommitTreeItem, TreeAction};
use crate::navigator::diff_request;

pub struct HistoryTree {
    git: Arc<dyn GitQuery>,
    file: Option<ResolvedFile>,
    commits: Vec<CommitRecord>,
    items: Vec<CommitTreeItem>,
}

impl HistoryTree {
    pub fn new(git: Arc<dyn GitQuery>) -> Self {
        Self {
            git,
            file: None,
            commits: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[CommitTreeItem] {
        &self.items
    }

    /// Rebuild rows for `active`. Non-local documents, files outside the
    /// workspace and files without history give an empty tree.
    pub fn refresh(&mut self, active: Option<&DocumentRef>, workspace: &Workspace) -> &[CommitTreeItem] {
        self.file = active
            .filter(|doc| doc.is_local())
            .and_then(|doc| workspace.resolve(&doc.path));

        self.commits = match &self.file {
            Some(file) => get_file_commits(self.git.as_ref(), file),
            None => Vec::new(),
        };

        let now = Utc::now().timestamp();
        let total = self.commits.len();
        self.items = self
            .commits
            .iter()
            .enumerate()
            .map(|(index, commit)| tree_item(commit, index, total, now))
            .collect();

        &self.items
    }

    /// Run the action attached to the row at `index`.
    pub fn open(&self, index: usize, host: &mut dyn HostSurface) -> bool {
        let Some(item) = self.items.get(index) else {
            return false;
        };
        let Some(file) = &self.file else {
            return false;
        };

        match item.action {
            TreeAction::ShowCommitDiff { index, .. } => {
                match diff_request(file, &self.commits, index) {
                    Some(request) => {
                        host.show_diff(request);
                        true
                    }
                    None => false,
                }
            }
        }
    }
}

fn tree_item(commit: &CommitRecord, index: usize, total: usize, now: i64) -> CommitTreeItem {
    CommitTreeItem {
        label: commit.summary.clone(),
        description: format!("{} - {}", commit.author, format_compact_age(&commit.date, now)),
        tooltip: format!(
            "{}\n{}\n{}\n\n{}",
            commit.id,
            commit.author,
            format_log_date(&commit.date),
            commit.summary
        ),
        icon: "git-commit".to_string(),
        action: TreeAction::ShowCommitDiff { index, total },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::FakeGit;
    use crate::host::Outbox;
    use std::sync::atomic::Ordering;

    const LOG: &str = "b2b2b2b2b2|Bob|2024-01-02 00:00:00 +0000|add feature\n\
                       a1a1a1a1a1|Alice|2024-01-01 00:00:00 +0000|fix a|b bug\n";

    fn tree_for(log: &str) -> (HistoryTree, Arc<FakeGit>) {
        let git = Arc::new(FakeGit::with_log(log));
        (HistoryTree::new(git.clone()), git)
    }

    #[test]
    fn test_rows_per_commit() {
        let (mut tree, _) = tree_for(LOG);
        let items = tree.refresh(Some(&DocumentRef::file("/work/a.rs")), &Workspace::new(["/work"]));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "add feature");
        assert!(items[0].description.starts_with("Bob - "));
        assert_eq!(items[1].label, "fix a|b bug");
        assert_eq!(items[1].icon, "git-commit");
        assert_eq!(items[1].action, TreeAction::ShowCommitDiff { index: 1, total: 2 });
        assert!(items[1].tooltip.starts_with("a1a1a1a1a1\nAlice\n"));
    }

    #[test]
    fn test_tree_item_description_age() {
        let commit = CommitRecord {
            id: "a1".to_string(),
            author: "Alice".to_string(),
            date: "2024-01-01 00:00:00 +0000".to_string(),
            summary: "fix".to_string(),
        };
        let item = tree_item(&commit, 0, 1, 1_704_067_200 + 7200);
        assert_eq!(item.description, "Alice - 2h ago");
    }

    #[test]
    fn test_open_uses_item_position() {
        let (mut tree, _) = tree_for(LOG);
        tree.refresh(Some(&DocumentRef::file("/work/src/a.rs")), &Workspace::new(["/work"]));
        let mut outbox = Outbox::default();

        assert!(tree.open(0, &mut outbox));
        let diff = outbox.last_diff().unwrap();
        assert_eq!(diff.left.revision, "a1a1a1a1a1");
        assert_eq!(diff.right.revision, "b2b2b2b2b2");
        assert_eq!(diff.title, "a.rs - b2b2b2b (1/2)");

        assert!(tree.open(1, &mut outbox));
        assert_eq!(outbox.last_diff().unwrap().left.revision, "a1a1a1a1a1~1");

        assert!(!tree.open(2, &mut outbox));
    }

    #[test]
    fn test_no_active_file_is_empty() {
        let (mut tree, git) = tree_for(LOG);
        let workspace = Workspace::new(["/work"]);

        assert!(tree.refresh(None, &workspace).is_empty());
        assert!(tree.refresh(Some(&DocumentRef::file("/other/a.rs")), &workspace).is_empty());
        let remote = DocumentRef {
            scheme: "vscode-remote".to_string(),
            path: "/work/a.rs".into(),
        };
        assert!(tree.refresh(Some(&remote), &workspace).is_empty());
        assert_eq!(git.log_calls.load(Ordering::SeqCst), 0);
        assert!(!tree.open(0, &mut Outbox::default()));
    }

    #[test]
    fn test_refresh_replaces_rows() {
        let (mut tree, git) = tree_for(LOG);
        let workspace = Workspace::new(["/work"]);
        let doc = DocumentRef::file("/work/a.rs");

        tree.refresh(Some(&doc), &workspace);
        *git.log_output.lock().unwrap() = Some("c3|Carol|2024-01-03 00:00:00 +0000|third\n".to_string());
        let items = tree.refresh(Some(&doc), &workspace);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "third");
        assert_eq!(git.log_calls.load(Ordering::SeqCst), 2);
    }
}
