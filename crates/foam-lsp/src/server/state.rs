//! Document state management.

use foam_analyzer::text::char_index_at;
use lsp_types::{TextDocumentContentChangeEvent, Url};
use ropey::Rope;

/// A document we're tracking (an open file in the editor).
#[derive(Debug, Clone)]
pub struct Document {
    /// The document content, stored as a rope for cheap incremental edits.
    pub content: Rope,

    /// Document version (incremented by editor on each change).
    pub version: i32,
}

impl Document {
    pub fn new(text: &str, version: i32) -> Self {
        Self {
            content: Rope::from_str(text),
            version,
        }
    }

    /// Apply one change from `textDocument/didChange`.
    ///
    /// Ranged changes are positioned in UTF-16 units; a change without a
    /// range replaces the whole text. An end past the last line, such as the
    /// start of the line after it, means the end of the document.
    pub fn apply_change(&mut self, change: &TextDocumentContentChangeEvent) {
        let Some(range) = change.range else {
            self.content = Rope::from_str(&change.text);
            return;
        };

        let start = match char_index_at(&self.content, range.start) {
            Ok(start) => start,
            Err(err) => {
                tracing::warn!("Dropping edit: {}", err);
                return;
            }
        };
        let end = char_index_at(&self.content, range.end)
            .unwrap_or_else(|_| self.content.len_chars())
            .max(start);

        self.content.remove(start..end);
        self.content.insert(start, &change.text);
    }
}

/// Read a document the editor has not opened.
///
/// Only `file://` URIs are read. Failures are logged and yield `None`.
pub fn load_from_disk(uri: &Url) -> Option<String> {
    let path = match uri.to_file_path() {
        Ok(path) => path,
        Err(()) => {
            tracing::debug!("Not a file URI: {}", uri);
            return None;
        }
    };

    match std::fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!("Failed to read {}: {}", path.display(), err);
            None
        }
    }
}
