// This file is part of foam-lsp.
// Copyright (C) 2025 The foam-lsp Authors
// SPDX-License-Identifier: Apache-2.0

//! A parsed document: the source, its rope and the tree-sitter tree.
//!
//! Tree-sitter reports columns in bytes, LSP wants UTF-16 code units, so
//! every range handed out goes through the rope.

use lsp_types::Range;
use ropey::Rope;
use tree_sitter::{Node, Tree, TreeCursor};

use crate::text::position_at;

pub struct SourceTree {
    source: String,
    rope: Rope,
    tree: Tree,
}

impl SourceTree {
    pub(crate) fn new(source: &str, tree: Tree) -> Self {
        Self {
            source: source.to_string(),
            rope: Rope::from_str(source),
            tree,
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn walk(&self) -> TreeCursor<'_> {
        self.tree.walk()
    }

    /// Source text of `node`.
    pub fn text<'t>(&'t self, node: Node<'t>) -> &'t str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// The LSP range covered by `node`.
    pub fn range(&self, node: Node) -> Range {
        Range::new(
            position_at(&self.rope, node.start_byte()),
            position_at(&self.rope, node.end_byte()),
        )
    }
}
