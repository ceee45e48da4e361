// This file is part of foam-lsp.
// Copyright (C) 2025 The foam-lsp Authors
// SPDX-License-Identifier: Apache-2.0

//! Maps a document offset to the syntax node under it.

use lsp_types::Position;
use tree_sitter::Node;

use crate::error::Result;
use crate::tree::SourceTree;

/// The deepest node whose start is closest to `offset` without passing it.
///
/// Starting at the root, each level keeps the child with the smallest
/// `offset - start_byte` among children starting at or before `offset`,
/// preferring the later child on a tie. An offset before every child
/// returns the node itself.
pub fn node_at_offset(tree: &SourceTree, offset: usize) -> Node<'_> {
    let mut node = tree.root_node();
    let mut cursor = node.walk();
    loop {
        let mut best: Option<(usize, Node)> = None;
        for child in node.children(&mut cursor) {
            if child.start_byte() > offset {
                continue;
            }
            let distance = offset - child.start_byte();
            if best.map_or(true, |(closest, _)| distance <= closest) {
                best = Some((distance, child));
            }
        }
        match best {
            Some((_, child)) => node = child,
            None => return node,
        }
    }
}

/// Like [`node_at_offset`] for an LSP position.
pub fn node_at_position(tree: &SourceTree, position: Position) -> Result<Node<'_>> {
    let offset = crate::text::offset_at(tree.rope(), position)?;
    Ok(node_at_offset(tree, offset))
}
