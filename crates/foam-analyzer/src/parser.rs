// This file is part of foam-lsp.
// Copyright (C) 2025 The foam-lsp Authors
// SPDX-License-Identifier: Apache-2.0

//! Tree-sitter parser wrapper for OpenFOAM dictionaries.
//!
//! Provides parsing capabilities for:
//! - Document and workspace symbols
//! - Go to definition of macros
//! - Hover, signature help and completion

mod types;

pub use types::*;

use lsp_types::{Position, Range, SymbolInformation, Url};
use tree_sitter::{Node, Parser};

use crate::definition::{self, Resolution};
use crate::docs::{self, DocFormat};
use crate::tree::SourceTree;
use crate::{completion, locator, symbols, text};

/// Parser engine wrapping tree-sitter-foam.
///
/// Nothing is cached between calls: each one reparses the source it is
/// given.
pub struct ParserEngine {
    parser: Parser,
}

impl Default for ParserEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserEngine {
    /// Create a new parser engine.
    pub fn new() -> Self {
        let mut parser = Parser::new();
        parser
            .set_language(tree_sitter_foam::language())
            .expect("Failed to load OpenFOAM grammar");
        Self { parser }
    }

    /// Parse source code and return the syntax tree.
    pub fn parse(&mut self, source: &str) -> Option<SourceTree> {
        let tree = self.parser.parse(source, None)?;
        Some(SourceTree::new(source, tree))
    }

    /// Every `key_value` and `dict` in the document, in document order.
    pub fn document_symbols(&mut self, source: &str, uri: &Url) -> Vec<SymbolInformation> {
        let tree = match self.parse(source) {
            Some(tree) => tree,
            None => return vec![],
        };
        symbols::document_symbols(&tree, uri)
    }

    /// The node under `position`, or `None` if the position is off the end.
    fn locate(tree: &SourceTree, position: Position) -> Option<Node<'_>> {
        match locator::node_at_position(tree, position) {
            Ok(node) => Some(node),
            Err(err) => {
                tracing::debug!("{}", err);
                None
            }
        }
    }

    /// Get hover information for a position in the source code.
    pub fn hover_info(
        &mut self,
        source: &str,
        position: Position,
        format: DocFormat,
    ) -> Option<HoverInfo> {
        let tree = self.parse(source)?;
        let node = Self::locate(&tree, position)?;

        let content = docs::lookup(tree.text(node), format)?;
        Some(HoverInfo {
            content: content.to_string(),
            format,
            range: Some(tree.range(node)),
        })
    }

    /// Signature help for the token under the cursor.
    pub fn signature_help(&mut self, source: &str, position: Position) -> Option<SignatureInfo> {
        let tree = self.parse(source)?;
        let node = Self::locate(&tree, position)?;
        if node.child_count() > 0 || !node.is_named() {
            return None;
        }

        let text = tree.text(node);
        let documentation = docs::plain_text(&format!("signature_{text}")).unwrap_or_default();
        let parameters = docs::plain_text(&format!("signature_param_{text}"))
            .map(|doc| ParameterInfo {
                label: text.to_string(),
                documentation: Some(doc.to_string()),
            })
            .into_iter()
            .collect();

        Some(SignatureInfo {
            label: format!("Keyword: {text}"),
            documentation: documentation.to_string(),
            parameters,
            active_parameter: 0,
        })
    }

    /// Go to the definition of the macro under the cursor.
    ///
    /// Anything that does not resolve yields the zero-width range at
    /// `position` itself.
    pub fn goto_definition(&mut self, source: &str, position: Position) -> Range {
        let here = Range::new(position, position);
        let tree = match self.parse(source) {
            Some(tree) => tree,
            None => return here,
        };
        let offset = match text::offset_at(tree.rope(), position) {
            Ok(offset) => offset,
            Err(err) => {
                tracing::debug!("{}", err);
                return here;
            }
        };

        match definition::resolve(&tree, offset) {
            Resolution::Target(node) => tree.range(node),
            Resolution::NotAMacro | Resolution::Unresolved => here,
        }
    }

    /// Completion proposals at `position`.
    pub fn completion_proposals(
        &mut self,
        source: &str,
        uri: &Url,
        position: Position,
        snippet_support: bool,
    ) -> Vec<Proposal> {
        let tree = match self.parse(source) {
            Some(tree) => tree,
            None => return Vec::new(),
        };
        let line = match text::line_prefix(tree.rope(), position) {
            Ok(line) => line,
            Err(err) => {
                tracing::debug!("{}", err);
                return Vec::new();
            }
        };

        completion::proposals(&tree, uri, &line, snippet_support)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp_types::SymbolKind;

    const SOURCE: &str = "\
FoamFile
{
    version 2.0;
    object  controlDict;
}
application icoFoam;
deltaT 0.005;
writeControl timeStep;
purgeWrite 0;
runTimeModifiable true;
endTime $deltaT;
";

    fn uri() -> Url {
        Url::parse("file:///cavity/system/controlDict").unwrap()
    }

    #[test]
    fn test_document_symbols() {
        let mut engine = ParserEngine::new();
        let symbols = engine.document_symbols(SOURCE, &uri());
        let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "FoamFile",
                "FoamFile.version",
                "FoamFile.object",
                "application",
                "deltaT",
                "writeControl",
                "purgeWrite",
                "runTimeModifiable",
                "endTime"
            ]
        );
        assert_eq!(symbols[0].kind, SymbolKind::STRUCT);
        assert_eq!(symbols[7].kind, SymbolKind::BOOLEAN);
        assert_eq!(symbols[8].kind, SymbolKind::CONSTANT);
    }

    #[test]
    fn test_hover_formats() {
        let mut engine = ParserEngine::new();
        let source = "inlet\n{\n    type fixedValue;\n}\n";

        let info = engine
            .hover_info(source, Position::new(2, 5), DocFormat::Markdown)
            .unwrap();
        assert!(info.content.contains("```"));
        assert_eq!(info.range, Some(Range::new(Position::new(2, 4), Position::new(2, 8))));

        let info = engine
            .hover_info(source, Position::new(2, 5), DocFormat::PlainText)
            .unwrap();
        assert!(info.content.starts_with("Choose the type of the object."));
        assert_eq!(info.format, DocFormat::PlainText);
    }

    #[test]
    fn test_hover_miss() {
        let mut engine = ParserEngine::new();
        assert!(engine
            .hover_info(SOURCE, Position::new(5, 2), DocFormat::Markdown)
            .is_none());
        assert!(engine
            .hover_info(SOURCE, Position::new(99, 0), DocFormat::Markdown)
            .is_none());
    }

    #[test]
    fn test_signature_help() {
        let mut engine = ParserEngine::new();
        let info = engine
            .signature_help("type fixedValue;", Position::new(0, 1))
            .unwrap();
        assert_eq!(info.label, "Keyword: type");
        assert!(info.documentation.starts_with("type <boundaryCondition:word>;"));
        assert_eq!(info.parameters.len(), 1);

        let info = engine
            .signature_help("deltaT 0.005;", Position::new(0, 1))
            .unwrap();
        assert_eq!(info.label, "Keyword: deltaT");
        assert!(info.documentation.is_empty());
        assert!(info.parameters.is_empty());
    }

    #[test]
    fn test_signature_help_skips_containers() {
        let mut engine = ParserEngine::new();
        assert!(engine
            .signature_help("  deltaT 0.005;", Position::new(0, 0))
            .is_none());
    }

    #[test]
    fn test_goto_definition() {
        let mut engine = ParserEngine::new();
        let range = engine.goto_definition(SOURCE, Position::new(10, 9));
        assert_eq!(range, Range::new(Position::new(6, 7), Position::new(6, 12)));
    }

    #[test]
    fn test_goto_definition_single_line() {
        let mut engine = ParserEngine::new();
        let source = "tool { list (1 2 3); deeper { index $:tool.list; } }";
        let range = engine.goto_definition(source, Position::new(0, 38));
        assert_eq!(range, Range::new(Position::new(0, 12), Position::new(0, 19)));
    }

    #[test]
    fn test_deeply_nested_input() {
        let mut engine = ParserEngine::new();
        let depth = 100_000;
        let source = format!("a {}{};\nb $a;", "(".repeat(depth), ")".repeat(depth));

        let symbols = engine.document_symbols(&source, &uri());
        assert_eq!(symbols.len(), 2);

        let range = engine.goto_definition(&source, Position::new(1, 3));
        assert_eq!(range.start, Position::new(0, 2));
        assert_eq!(range.end, Position::new(0, 2 + 2 * depth as u32));

        let inner = Position::new(0, 2 + depth as u32);
        assert!(engine
            .hover_info(&source, inner, DocFormat::Markdown)
            .is_none());
    }

    #[test]
    fn test_goto_definition_falls_back_to_position() {
        let mut engine = ParserEngine::new();
        let here = Position::new(7, 14);
        assert_eq!(engine.goto_definition(SOURCE, here), Range::new(here, here));

        let past_end = Position::new(50, 3);
        assert_eq!(
            engine.goto_definition(SOURCE, past_end),
            Range::new(past_end, past_end)
        );
    }

    #[test]
    fn test_completion_proposals() {
        let mut engine = ParserEngine::new();
        let source = "FoamFile { version 2.0; }\nty";
        let proposals = engine.completion_proposals(source, &uri(), Position::new(1, 2), false);
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].label, "type");
        assert_eq!(proposals[0].kind, ProposalKind::Keyword);
    }
}
