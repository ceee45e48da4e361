//! Settings negotiated with the client during `initialize`.

use foam_analyzer::DocFormat;
use lsp_types::{InitializeParams, Url};

/// What the client told us it can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Format of hover content.
    pub hover_format: DocFormat,
    /// Format of documentation attached to completion items.
    pub completion_doc_format: DocFormat,
    /// Whether snippet proposals may be offered.
    pub snippet_support: bool,
    /// Workspace root, for logging.
    pub workspace_root: Option<Url>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hover_format: DocFormat::Markdown,
            completion_doc_format: DocFormat::PlainText,
            snippet_support: false,
            workspace_root: None,
        }
    }
}

impl ServerConfig {
    // `root_uri` is deprecated but still the only root some clients send.
    #[allow(deprecated)]
    pub fn from_params(params: &InitializeParams) -> Self {
        let defaults = Self::default();
        let text_document = params.capabilities.text_document.as_ref();

        let hover_format = text_document
            .and_then(|td| td.hover.as_ref())
            .and_then(|hover| hover.content_format.as_ref())
            .and_then(|formats| formats.first())
            .map(DocFormat::from)
            .unwrap_or(defaults.hover_format);

        let completion_item = text_document
            .and_then(|td| td.completion.as_ref())
            .and_then(|completion| completion.completion_item.as_ref());

        let completion_doc_format = completion_item
            .and_then(|item| item.documentation_format.as_ref())
            .and_then(|formats| formats.first())
            .map(DocFormat::from)
            .unwrap_or(defaults.completion_doc_format);

        let snippet_support = completion_item
            .and_then(|item| item.snippet_support)
            .unwrap_or(false);

        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .map(|folder| folder.uri.clone())
            .or_else(|| params.root_uri.clone());

        Self {
            hover_format,
            completion_doc_format,
            snippet_support,
            workspace_root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> InitializeParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_without_capabilities() {
        let config = ServerConfig::from_params(&params(json!({ "capabilities": {} })));
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_formats_from_capabilities() {
        let config = ServerConfig::from_params(&params(json!({
            "capabilities": {
                "textDocument": {
                    "hover": { "contentFormat": ["plaintext", "markdown"] },
                    "completion": {
                        "completionItem": {
                            "snippetSupport": true,
                            "documentationFormat": ["markdown"]
                        }
                    }
                }
            }
        })));
        assert_eq!(config.hover_format, DocFormat::PlainText);
        assert_eq!(config.completion_doc_format, DocFormat::Markdown);
        assert!(config.snippet_support);
    }

    #[test]
    fn test_workspace_root_prefers_folders() {
        let config = ServerConfig::from_params(&params(json!({
            "capabilities": {},
            "rootUri": "file:///old",
            "workspaceFolders": [{ "uri": "file:///case", "name": "case" }]
        })));
        assert_eq!(config.workspace_root.unwrap().as_str(), "file:///case");

        let config = ServerConfig::from_params(&params(json!({
            "capabilities": {},
            "rootUri": "file:///old"
        })));
        assert_eq!(config.workspace_root.unwrap().as_str(), "file:///old");
    }
}
