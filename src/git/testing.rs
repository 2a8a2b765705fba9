//! Fakes and throwaway repositories shared by unit tests.

use git2::{Oid, Repository, Signature, Time};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::GitError;
use crate::git::command::GitQuery;
use crate::git::repository::ResolvedFile;

pub const ID: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";

/// Serves canned output and counts invocations.
#[derive(Default)]
pub struct FakeGit {
    pub blame_output: Mutex<Option<String>>,
    pub log_output: Mutex<Option<String>>,
    /// revision -> file content
    pub files: Mutex<HashMap<String, String>>,
    /// revision -> `%H|%an|%ai|%s` line
    pub commits: Mutex<HashMap<String, String>>,
    pub blame_calls: AtomicUsize,
    pub log_calls: AtomicUsize,
}

impl FakeGit {
    pub fn with_blame(output: &str) -> Self {
        let fake = Self::default();
        *fake.blame_output.lock().unwrap() = Some(output.to_string());
        fake
    }

    pub fn with_log(output: &str) -> Self {
        let fake = Self::default();
        *fake.log_output.lock().unwrap() = Some(output.to_string());
        fake
    }

    fn canned(slot: &Mutex<Option<String>>, command: &str) -> Result<String, GitError> {
        slot.lock().unwrap().clone().ok_or_else(|| GitError::Failed {
            command: command.to_string(),
            code: Some(128),
            stderr: "fatal: no such path".to_string(),
        })
    }
}

impl GitQuery for FakeGit {
    fn blame(&self, _: &Path, _: &str) -> Result<String, GitError> {
        self.blame_calls.fetch_add(1, Ordering::SeqCst);
        Self::canned(&self.blame_output, "blame")
    }

    fn log_file(&self, _: &Path, _: &str) -> Result<String, GitError> {
        self.log_calls.fetch_add(1, Ordering::SeqCst);
        Self::canned(&self.log_output, "log")
    }

    fn show_file(&self, _: &Path, revision: &str, _: &str) -> Result<String, GitError> {
        let found = self.files.lock().unwrap().get(revision).cloned();
        Self::canned(&Mutex::new(found), "show")
    }

    fn show_commit(&self, _: &Path, revision: &str) -> Result<String, GitError> {
        let found = self.commits.lock().unwrap().get(revision).cloned();
        Self::canned(&Mutex::new(found), "log -1")
    }
}

pub fn porcelain(lines: u32) -> String {
    (1..=lines)
        .map(|n| {
            format!(
                "{ID} {n} {n} 1\nauthor Alice\nauthor-mail <alice@example.com>\n\
                 author-time 1704067200\ncommitter Alice\n\
                 committer-mail <alice@example.com>\nsummary fix bug\n\tline {n}\n"
            )
        })
        .collect()
}

pub fn resolved(path: &str) -> ResolvedFile {
    ResolvedFile {
        absolute: PathBuf::from("/work").join(path),
        workspace_root: PathBuf::from("/work"),
        relative: PathBuf::from(path),
    }
}

pub struct FixtureRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl FixtureRepo {
    pub fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let repo = Repository::init(dir.path())?;
        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;
        Ok(Self { dir, repo })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `path` and commit it as `author` at `time`.
    pub fn commit_file(
        &self,
        path: &str,
        contents: &str,
        message: &str,
        author: &str,
        time: i64,
    ) -> anyhow::Result<Oid> {
        std::fs::write(self.root().join(path), contents)?;

        let mut index = self.repo.index()?;
        index.add_path(Path::new(path))?;
        index.write()?;
        let tree = self.repo.find_tree(index.write_tree()?)?;

        let sig = Signature::new(author, "author@example.com", &Time::new(time, 0))?;
        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit()?],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        Ok(self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)?)
    }
}
