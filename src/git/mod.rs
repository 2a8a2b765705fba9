pub mod blame;
pub mod cache;
pub mod command;
pub mod content;
pub mod history;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::AttributionCache;
pub use command::{GitCli, GitQuery};
pub use repository::{ResolvedFile, Workspace};
