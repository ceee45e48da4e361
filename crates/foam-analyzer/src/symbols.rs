// This file is part of foam-lsp.
// Copyright (C) 2025 The foam-lsp Authors
// SPDX-License-Identifier: Apache-2.0

//! Symbol table builder.
//!
//! Every `key_value` and `dict` in a document becomes a symbol named by its
//! dotted path, e.g. `tool.deeper.index`. Symbols come out in document order
//! and duplicates are kept.

use lsp_types::{Location, SymbolInformation, SymbolKind, Url};
use tree_sitter::{Node, TreeCursor};

use crate::tree::SourceTree;

/// Identifiers that read as booleans. The grammar only tokenizes some of
/// them as `boolean`.
const BOOLEAN_WORDS: [&str; 6] = ["on", "off", "true", "false", "yes", "no"];

/// Lazy pre-order walk over a tree yielding one symbol per entry.
///
/// In referable mode the walk does not enter lists, so nothing nested in a
/// list literal is yielded. Those entries cannot be addressed by a macro.
pub struct SymbolWalker<'t> {
    tree: &'t SourceTree,
    cursor: TreeCursor<'t>,
    uri: Url,
    only_referable: bool,
    done: bool,
}

impl<'t> SymbolWalker<'t> {
    pub fn new(tree: &'t SourceTree, uri: Url, only_referable: bool) -> Self {
        Self {
            tree,
            cursor: tree.walk(),
            uri,
            only_referable,
            done: false,
        }
    }

    fn advance(&mut self, visited: Node) {
        let enter = !(self.only_referable && visited.kind() == "list");
        if enter && self.cursor.goto_first_child() {
            return;
        }
        loop {
            if self.cursor.goto_next_sibling() {
                return;
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return;
            }
        }
    }

    fn symbol_for(&self, node: Node) -> Option<SymbolInformation> {
        let key = node.named_child(0)?;
        let tree = self.tree;
        let (name, kind, range) = match node.kind() {
            "key_value" => {
                let value = node.named_child(1).unwrap_or(key);
                let name = qualified_name(tree, node, key, !self.only_referable);
                (name, classify(tree, value), tree.range(value))
            }
            "dict" => (
                qualified_name(tree, node, key, false),
                SymbolKind::STRUCT,
                tree.range(node),
            ),
            _ => return None,
        };

        #[allow(deprecated)]
        Some(SymbolInformation {
            name,
            kind,
            tags: None,
            deprecated: Some(false),
            location: Location::new(self.uri.clone(), range),
            container_name: None,
        })
    }
}

impl Iterator for SymbolWalker<'_> {
    type Item = SymbolInformation;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let node = self.cursor.node();
            let symbol = self.symbol_for(node);
            self.advance(node);
            if symbol.is_some() {
                return symbol;
            }
        }
        None
    }
}

/// Every symbol in the document, list contents included.
pub fn document_symbols(tree: &SourceTree, uri: &Url) -> Vec<SymbolInformation> {
    SymbolWalker::new(tree, uri.clone(), false).collect()
}

/// Symbols a macro can point at.
pub fn referable_symbols(tree: &SourceTree, uri: &Url) -> Vec<SymbolInformation> {
    SymbolWalker::new(tree, uri.clone(), true).collect()
}

/// Workspace symbol filter: case-insensitive substring match.
pub fn matches_query(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

/// Join the names of the enclosing dictionaries, innermost last, with `key`.
///
/// With `through_lists`, a list contributes the key that owns it.
fn qualified_name(tree: &SourceTree, node: Node, key: Node, through_lists: bool) -> String {
    let mut segments = vec![tree.text(key)];
    let mut ancestor = node.parent();
    while let Some(current) = ancestor {
        let segment = match current.kind() {
            "dict" => current.named_child(0),
            "list" if through_lists => current
                .parent()
                .filter(|owner| owner.kind() == "key_value")
                .and_then(|owner| owner.named_child(0)),
            _ => None,
        };
        if let Some(segment) = segment {
            segments.push(tree.text(segment));
        }
        ancestor = current.parent();
    }
    segments.reverse();
    segments.join(".")
}

/// Symbol kind of an entry, judged by its value node.
pub fn classify(tree: &SourceTree, value: Node) -> SymbolKind {
    match value.kind() {
        "list" => SymbolKind::ARRAY,
        "macro" => SymbolKind::CONSTANT,
        "code" => SymbolKind::MODULE,
        "number_literal" => SymbolKind::NUMBER,
        "string_literal" => SymbolKind::STRING,
        "boolean" => SymbolKind::BOOLEAN,
        "identifier" if BOOLEAN_WORDS.contains(&tree.text(value)) => SymbolKind::BOOLEAN,
        _ => SymbolKind::KEY,
    }
}
