//! External `git` invocations.
//!
//! Every query the core needs from version control goes through the
//! `GitQuery` trait, so the blame cache, history fetcher and content provider
//! can be exercised against fakes. `GitCli` is the real implementation: it
//! runs the `git` binary synchronously in the workspace root and caps how
//! much stdout it will buffer.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use crate::error::GitError;

/// Default stdout ceiling for a single invocation.
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// `%H|%an|%ai|%s`: id, author name, ISO-like author date, subject.
pub const LOG_FORMAT: &str = "--format=%H|%an|%ai|%s";

pub trait GitQuery: Send + Sync {
    /// `git blame --line-porcelain -- <relative_path>`
    fn blame(&self, workspace_root: &Path, relative_path: &str) -> Result<String, GitError>;

    /// `git log --follow --format=%H|%an|%ai|%s -- <relative_path>`
    fn log_file(&self, workspace_root: &Path, relative_path: &str) -> Result<String, GitError>;

    /// `git show <revision>:<relative_path>`
    fn show_file(
        &self,
        workspace_root: &Path,
        revision: &str,
        relative_path: &str,
    ) -> Result<String, GitError>;

    /// `git log -1 --format=%H|%an|%ai|%s <revision> --`
    fn show_commit(&self, workspace_root: &Path, revision: &str) -> Result<String, GitError>;
}

#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
    max_output_bytes: usize,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git", DEFAULT_MAX_OUTPUT_BYTES)
    }
}

impl GitCli {
    pub fn new(binary: impl Into<PathBuf>, max_output_bytes: usize) -> Self {
        Self {
            binary: binary.into(),
            max_output_bytes,
        }
    }

    fn run(&self, cwd: &Path, args: &[&str]) -> Result<String, GitError> {
        let command = args.join(" ");
        tracing::debug!("git {} (in {})", command, cwd.display());

        let mut child = Command::new(&self.binary)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        // stderr is drained on its own thread while stdout is read here
        let stderr_reader = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });

        let mut stdout = Vec::new();
        if let Some(pipe) = child.stdout.take() {
            // Read one byte past the ceiling to detect overflow
            pipe.take(self.max_output_bytes as u64 + 1)
                .read_to_end(&mut stdout)?;
        }

        if stdout.len() > self.max_output_bytes {
            let _ = child.kill();
            let _ = child.wait();
            join_stderr(stderr_reader);
            return Err(GitError::OutputTooLarge {
                command,
                limit: self.max_output_bytes,
            });
        }

        let status = child.wait()?;
        let stderr = join_stderr(stderr_reader);
        if !status.success() {
            return Err(GitError::Failed {
                command,
                code: status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        String::from_utf8(stdout).map_err(|_| GitError::InvalidUtf8 { command })
    }
}

fn join_stderr(reader: Option<JoinHandle<Vec<u8>>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).to_string())
        .unwrap_or_default()
}

impl GitQuery for GitCli {
    fn blame(&self, workspace_root: &Path, relative_path: &str) -> Result<String, GitError> {
        self.run(
            workspace_root,
            &["blame", "--line-porcelain", "--", relative_path],
        )
    }

    fn log_file(&self, workspace_root: &Path, relative_path: &str) -> Result<String, GitError> {
        self.run(
            workspace_root,
            &["log", "--follow", LOG_FORMAT, "--", relative_path],
        )
    }

    fn show_file(
        &self,
        workspace_root: &Path,
        revision: &str,
        relative_path: &str,
    ) -> Result<String, GitError> {
        let spec = format!("{}:{}", revision, relative_path);
        self.run(workspace_root, &["show", &spec])
    }

    fn show_commit(&self, workspace_root: &Path, revision: &str) -> Result<String, GitError> {
        self.run(workspace_root, &["log", "-1", LOG_FORMAT, revision, "--"])
    }
}
