//! Editor host contract.
//!
//! The core never talks to an editor directly. It reacts to `EditorEvent`s
//! and pushes its output through a `HostSurface`. `Outbox` is the surface
//! used by the HTTP bridge: it records messages so the handler can return
//! them to the editor client.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::annotation::InlineAnnotation;
use crate::models::DiffRequest;

/// A document as the editor identifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// URI scheme, `file` for on-disk documents
    #[serde(default = "default_scheme")]
    pub scheme: String,
    pub path: PathBuf,
}

fn default_scheme() -> String {
    "file".to_string()
}

impl DocumentRef {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            scheme: default_scheme(),
            path: path.into(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.scheme == "file"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Cursor moved to a zero-based line
    CursorMoved { document: DocumentRef, line: u32 },
    /// Focus moved to another editor, or to none
    ActiveEditorChanged {
        document: Option<DocumentRef>,
        #[serde(default)]
        line: u32,
    },
    /// Unsaved edit
    DocumentChanged { document: DocumentRef },
    DocumentSaved { document: DocumentRef },
}

pub trait HostSurface {
    /// Open a side-by-side diff.
    fn show_diff(&mut self, request: DiffRequest);

    /// Replace the blame decoration on `document`; `None` clears it.
    fn set_decoration(&mut self, document: &DocumentRef, annotation: Option<InlineAnnotation>);

    fn show_info(&mut self, message: &str);

    fn show_error(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostMessage {
    Diff(DiffRequest),
    Decoration {
        document: DocumentRef,
        annotation: Option<InlineAnnotation>,
    },
    Info { message: String },
    Error { message: String },
}

/// Collects host messages in the order they were produced.
#[derive(Debug, Default)]
pub struct Outbox {
    messages: Vec<HostMessage>,
}

impl Outbox {
    #[cfg(test)]
    pub fn messages(&self) -> &[HostMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<HostMessage> {
        self.messages
    }

    /// The most recent diff request, if any.
    #[cfg(test)]
    pub fn last_diff(&self) -> Option<&DiffRequest> {
        self.messages.iter().rev().find_map(|m| match m {
            HostMessage::Diff(request) => Some(request),
            _ => None,
        })
    }
}

impl HostSurface for Outbox {
    fn show_diff(&mut self, request: DiffRequest) {
        self.messages.push(HostMessage::Diff(request));
    }

    fn set_decoration(&mut self, document: &DocumentRef, annotation: Option<InlineAnnotation>) {
        self.messages.push(HostMessage::Decoration {
            document: document.clone(),
            annotation,
        });
    }

    fn show_info(&mut self, message: &str) {
        self.messages.push(HostMessage::Info {
            message: message.to_string(),
        });
    }

    fn show_error(&mut self, message: &str) {
        self.messages.push(HostMessage::Error {
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_json_shape() {
        let event: EditorEvent = serde_json::from_value(json!({
            "type": "cursor_moved",
            "document": { "path": "/work/a.rs" },
            "line": 4
        }))
        .unwrap();
        assert_eq!(
            event,
            EditorEvent::CursorMoved {
                document: DocumentRef::file("/work/a.rs"),
                line: 4
            }
        );

        let event: EditorEvent =
            serde_json::from_value(json!({ "type": "active_editor_changed", "document": null }))
                .unwrap();
        assert_eq!(event, EditorEvent::ActiveEditorChanged { document: None, line: 0 });
    }

    #[test]
    fn test_untitled_document_is_not_local() {
        let doc = DocumentRef {
            scheme: "untitled".to_string(),
            path: PathBuf::from("Untitled-1"),
        };
        assert!(!doc.is_local());
        assert!(DocumentRef::file("/a").is_local());
    }

    #[test]
    fn test_outbox_keeps_order() {
        let mut outbox = Outbox::default();
        outbox.show_info("first");
        outbox.show_error("second");
        assert!(outbox.last_diff().is_none());

        let value = serde_json::to_value(outbox.into_messages()).unwrap();
        assert_eq!(value[0], json!({ "kind": "info", "message": "first" }));
        assert_eq!(value[1], json!({ "kind": "error", "message": "second" }));
    }
}
