//! Data transfer objects shared by the core and the editor bridge.
//!
//! These structs are serialized to JSON for the editor client.
//! - `blame`: AttributionRecord, FileAttributionTable, BlameResponse
//! - `commit`: CommitRecord for per-file history
//! - `diff`: RevisionUri for virtual documents, DiffRequest for the diff pane
//! - `tree`: CommitTreeItem and its attached action

pub mod blame;
pub mod commit;
pub mod diff;
pub mod tree;

pub use blame::*;
pub use commit::*;
pub use diff::*;
pub use tree::*;
