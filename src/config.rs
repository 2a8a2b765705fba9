use std::path::PathBuf;

use crate::git::command::DEFAULT_MAX_OUTPUT_BYTES;

/// Runtime settings, built from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Workspace folders supplied by the editor
    pub workspace_folders: Vec<PathBuf>,
    /// `git` executable to invoke
    pub git_binary: PathBuf,
    /// Stdout ceiling for a single git invocation
    pub max_output_bytes: usize,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_folders: Vec::new(),
            git_binary: PathBuf::from("git"),
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            port: 3001,
        }
    }
}

impl Config {
    /// Absolute workspace folders; relative ones are resolved against the
    /// current directory, which is also the default folder.
    pub fn resolved_workspace_folders(&self) -> Vec<PathBuf> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        if self.workspace_folders.is_empty() {
            return vec![canonical(cwd)];
        }

        self.workspace_folders
            .iter()
            .map(|folder| canonical(cwd.join(folder)))
            .collect()
    }
}

fn canonical(path: PathBuf) -> PathBuf {
    std::fs::canonicalize(&path).unwrap_or(path)
}
