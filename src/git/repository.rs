use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use git2::Repository;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A file mapped onto the workspace folder that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub absolute: PathBuf,
    pub workspace_root: PathBuf,
    /// Path relative to `workspace_root`, as passed to git
    pub relative: PathBuf,
}

impl ResolvedFile {
    pub fn relative_str(&self) -> String {
        self.relative.to_string_lossy().replace('\\', "/")
    }

    pub fn root_str(&self) -> String {
        self.workspace_root.to_string_lossy().to_string()
    }

    pub fn file_name(&self) -> String {
        self.absolute
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.relative_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceFolder {
    pub path: String,
    pub is_git_repo: bool,
}

/// The workspace folders supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    folders: Vec<PathBuf>,
}

impl Workspace {
    pub fn new<I, P>(folders: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            folders: folders.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the workspace and log which folders are not inside a repository.
    pub fn open<I, P>(folders: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let workspace = Self::new(folders);
        for folder in &workspace.folders {
            if is_git_repo(folder) {
                tracing::info!("Workspace folder: {}", folder.display());
            } else {
                tracing::warn!(
                    "Workspace folder {} is not inside a git repository; no history will be shown",
                    folder.display()
                );
            }
        }
        workspace
    }

    pub fn folders(&self) -> Vec<WorkspaceFolder> {
        self.folders
            .iter()
            .map(|f| WorkspaceFolder {
                path: f.to_string_lossy().to_string(),
                is_git_repo: is_git_repo(f),
            })
            .collect()
    }

    /// Map `path` to the deepest workspace folder that contains it, retrying
    /// with the canonical path when the editor's path goes through a symlink.
    pub fn resolve(&self, path: &Path) -> Option<ResolvedFile> {
        self.resolve_exact(path).or_else(|| {
            let canonical = std::fs::canonicalize(path).ok()?;
            self.resolve_exact(&canonical)
        })
    }

    fn resolve_exact(&self, path: &Path) -> Option<ResolvedFile> {
        self.folders
            .iter()
            .filter(|folder| path.starts_with(folder))
            .max_by_key(|folder| folder.components().count())
            .and_then(|folder| {
                let relative = path.strip_prefix(folder).ok()?;
                if relative.as_os_str().is_empty() {
                    return None;
                }
                Some(ResolvedFile {
                    absolute: path.to_path_buf(),
                    workspace_root: folder.clone(),
                    relative: relative.to_path_buf(),
                })
            })
    }
}

pub fn is_git_repo(path: &Path) -> bool {
    Repository::discover(path).is_ok()
}

pub fn format_relative_time_since(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 2592000 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if diff < 31536000 {
        let months = diff / 2592000;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = diff / 31536000;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}

/// Absolute date in the local zone, e.g. "5 March 2024 14:02".
pub fn format_local_date(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format("%-d %B %Y %H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

pub fn format_iso_date(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Parse an author date from `git log`: `%ai` ("2024-01-01 10:00:00 +0100"),
/// RFC 3339, or a zone-less ISO timestamp read as UTC.
pub fn parse_log_date(date: &str) -> Option<DateTime<FixedOffset>> {
    let date = date.trim();
    DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z")
        .or_else(|_| DateTime::parse_from_rfc3339(date))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        })
}

/// Local absolute date for a log date, or the input verbatim if unparseable.
pub fn format_log_date(date: &str) -> String {
    parse_log_date(date)
        .map(|dt| format_local_date(dt.timestamp()))
        .unwrap_or_else(|| date.to_string())
}

/// Compact age for tree rows: "5m ago", "3h ago", "12d ago", else the date.
pub fn format_compact_age(date: &str, now: i64) -> String {
    let Some(dt) = parse_log_date(date) else {
        return date.to_string();
    };

    let diff = (now - dt.timestamp()).max(0);
    if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86400 {
        format!("{}h ago", diff / 3600)
    } else if diff < 2592000 {
        format!("{}d ago", diff / 86400)
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
