//! Type definitions for the parser module.

use lsp_types::Range;

use crate::docs::DocFormat;

/// Hover information result.
#[derive(Debug, Clone)]
pub struct HoverInfo {
    /// The content to display.
    pub content: String,
    /// Whether `content` is Markdown or plain text.
    pub format: DocFormat,
    /// The range of the hovered element.
    pub range: Option<Range>,
}

/// Parameter information for signature help.
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    /// Parameter label (e.g., "type").
    pub label: String,
    /// Plain-text documentation for the parameter.
    pub documentation: Option<String>,
}

/// Signature information result.
#[derive(Debug, Clone)]
pub struct SignatureInfo {
    /// The full signature label (e.g., "Keyword: type").
    pub label: String,
    /// Plain-text documentation, empty when the keyword has none.
    pub documentation: String,
    /// Parameters with their labels.
    pub parameters: Vec<ParameterInfo>,
    /// The index of the active parameter (0-based).
    pub active_parameter: u32,
}

/// What a completion proposal stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalKind {
    /// An entry a macro can refer to.
    Variable,
    /// A `#` directive.
    Module,
    Keyword,
    Snippet,
}

/// A completion proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    /// The text shown in the completion list.
    pub label: String,
    /// The kind of proposal.
    pub kind: ProposalKind,
    /// Text inserted instead of the label.
    pub insert_text: Option<String>,
    /// True if `insert_text` uses snippet syntax.
    pub is_snippet: bool,
    /// Key for resolving documentation later.
    pub data: String,
}

impl Proposal {
    pub(crate) fn new(label: &str, kind: ProposalKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            insert_text: None,
            is_snippet: false,
            data: label.to_string(),
        }
    }
}
