//! The activated extension.
//!
//! `Extension` owns every piece of per-session state: the blame cache, the
//! history navigator and the history tree. It is created once at activation
//! and dropped at shutdown; all editor events and commands go through it, so
//! the caller serializes access (the bridge keeps it behind a mutex).

use std::sync::{Arc, Mutex};

use crate::annotation::{HoverCard, hover_card, inline_annotation, inline_label};
use crate::git::content::provide_content_for;
use crate::git::repository::{Workspace, WorkspaceFolder};
use crate::git::{AttributionCache, GitQuery};
use crate::host::{DocumentRef, EditorEvent, HostSurface};
use crate::models::{AttributionRecord, BlameResponse, CommitTreeItem};
use crate::navigator::HistoryNavigator;
use crate::tree::HistoryTree;

pub type SharedExtension = Arc<Mutex<Extension>>;

pub struct Extension {
    git: Arc<dyn GitQuery>,
    workspace: Workspace,
    blame: AttributionCache,
    navigator: HistoryNavigator,
    tree: HistoryTree,
    active: Option<DocumentRef>,
    cursor_line: u32,
}

impl Extension {
    pub fn activate(workspace: Workspace, git: Arc<dyn GitQuery>) -> Self {
        tracing::info!("Git history activated");
        Self {
            blame: AttributionCache::new(git.clone()),
            navigator: HistoryNavigator::new(git.clone()),
            tree: HistoryTree::new(git.clone()),
            git,
            workspace,
            active: None,
            cursor_line: 0,
        }
    }

    pub fn workspace_folders(&self) -> Vec<WorkspaceFolder> {
        self.workspace.folders()
    }

    pub fn navigator(&self) -> &HistoryNavigator {
        &self.navigator
    }

    pub fn handle_event(&mut self, event: EditorEvent, host: &mut dyn HostSurface) {
        match event {
            EditorEvent::CursorMoved { document, line } => {
                self.active = Some(document.clone());
                self.cursor_line = line;
                self.update_decoration(&document, line, host);
            }
            EditorEvent::ActiveEditorChanged { document, line } => {
                self.active = document.clone();
                self.cursor_line = line;
                if let Some(document) = &document {
                    self.update_decoration(document, line, host);
                }
                self.tree.refresh(self.active.as_ref(), &self.workspace);
            }
            EditorEvent::DocumentChanged { document } => {
                self.invalidate(&document);
            }
            EditorEvent::DocumentSaved { document } => {
                self.invalidate(&document);
                if self.active.as_ref() == Some(&document) {
                    self.update_decoration(&document, self.cursor_line, host);
                }
            }
        }
    }

    /// Attribution, inline label and hover for one line. All three are
    /// absent when the file has no attribution.
    pub fn blame_line(&mut self, document: &DocumentRef, line: u32) -> BlameResponse {
        let record = self.attribution(document, line);

        BlameResponse {
            path: document.path.to_string_lossy().to_string(),
            line,
            inline: record.as_ref().map(inline_label),
            hover: record.as_ref().map(|r| hover_card(r).markdown),
            record,
        }
    }

    pub fn hover(&mut self, document: &DocumentRef, line: u32) -> Option<HoverCard> {
        self.attribution(document, line).as_ref().map(hover_card)
    }

    /// Start a history session. User-input problems become an error notice.
    pub fn show_file_history(&mut self, target: Option<&DocumentRef>, host: &mut dyn HostSurface) {
        let active = self.active.clone();
        if let Err(e) = self
            .navigator
            .show_history(target, active.as_ref(), &self.workspace, host)
        {
            host.show_error(&e.to_string());
        }
    }

    pub fn navigate_previous(&mut self, host: &mut dyn HostSurface) {
        self.navigator.navigate_previous(host);
    }

    pub fn navigate_next(&mut self, host: &mut dyn HostSurface) {
        self.navigator.navigate_next(host);
    }

    pub fn tree_items(&self) -> &[CommitTreeItem] {
        self.tree.items()
    }

    pub fn refresh_tree(&mut self) -> &[CommitTreeItem] {
        self.tree.refresh(self.active.as_ref(), &self.workspace)
    }

    pub fn open_tree_item(&mut self, index: usize, host: &mut dyn HostSurface) -> bool {
        self.tree.open(index, host)
    }

    /// Body of a `git-history:` virtual document.
    pub fn document_content(&self, uri: &str) -> String {
        provide_content_for(self.git.as_ref(), uri)
    }

    fn attribution(&mut self, document: &DocumentRef, line: u32) -> Option<AttributionRecord> {
        if !document.is_local() {
            return None;
        }
        let file = self.workspace.resolve(&document.path)?;
        self.blame.get(&file, line).cloned()
    }

    /// Drop the cached table under the same key lookups use, which is the
    /// canonical path when the editor's path goes through a symlink.
    fn invalidate(&mut self, document: &DocumentRef) {
        match self.workspace.resolve(&document.path) {
            Some(file) => self.blame.invalidate(&file.absolute),
            None => self.blame.invalidate(&document.path),
        }
    }

    fn update_decoration(&mut self, document: &DocumentRef, line: u32, host: &mut dyn HostSurface) {
        if !document.is_local() {
            return;
        }
        let record = self.attribution(document, line);
        host.set_decoration(document, inline_annotation(line, record.as_ref()));
    }
}
