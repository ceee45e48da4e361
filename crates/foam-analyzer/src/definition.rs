// This file is part of foam-lsp.
// Copyright (C) 2025 The foam-lsp Authors
// SPDX-License-Identifier: Apache-2.0

//! Macro resolution for go-to-definition.
//!
//! A macro such as `$:tool.list` names a path of dictionaries ending in a
//! key. Resolving it walks the tree from the search scope, entering only
//! dictionaries whose name matches the next segment.
//!
//! Paths come in three forms:
//! - `$:a.b` and `$a.b` start at the document root;
//! - `$.a` starts at the dictionary enclosing the macro;
//! - `$..a`, `$...a`: each extra dot climbs one more dictionary level.

use tree_sitter::Node;

use crate::error::{AnalyzerError, Result};
use crate::locator::node_at_offset;
use crate::tree::SourceTree;

/// Where a macro path starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Absolute,
    /// Number of leading dots.
    Relative { levels: usize },
}

/// A parsed macro reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroPath {
    pub scope: Scope,
    pub segments: Vec<String>,
}

impl MacroPath {
    pub fn parse(text: &str) -> Result<Self> {
        let body = text
            .strip_prefix('$')
            .ok_or_else(|| AnalyzerError::NotAMacro(text.to_string()))?;
        let body = body
            .strip_prefix('{')
            .and_then(|inner| inner.strip_suffix('}'))
            .unwrap_or(body);

        let (scope, rest) = match body.strip_prefix(':') {
            Some(rest) => (Scope::Absolute, rest),
            None => {
                let rest = body.trim_start_matches('.');
                let levels = body.len() - rest.len();
                if levels == 0 {
                    (Scope::Absolute, rest)
                } else {
                    (Scope::Relative { levels }, rest)
                }
            }
        };

        if rest.is_empty() || rest.split('.').any(str::is_empty) {
            return Err(AnalyzerError::MalformedMacro(text.to_string()));
        }

        Ok(Self {
            scope,
            segments: rest.split('.').map(str::to_string).collect(),
        })
    }
}

/// Outcome of resolving the macro under a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'t> {
    /// The cursor is not on a macro.
    NotAMacro,
    /// The node the macro refers to.
    Target(Node<'t>),
    /// A macro whose path is malformed or matches nothing.
    Unresolved,
}

/// Resolve the macro at byte `offset`.
///
/// The cursor may sit on any part of the macro: the `$`, the scope marker
/// or the name.
pub fn resolve(tree: &SourceTree, offset: usize) -> Resolution<'_> {
    let mut node = Some(node_at_offset(tree, offset));
    let macro_node = loop {
        match node {
            Some(current) if current.kind() == "macro" => break current,
            Some(current) => node = current.parent(),
            None => return Resolution::NotAMacro,
        }
    };

    let text = tree.text(macro_node);
    let path = match MacroPath::parse(text) {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!("{}", err);
            return Resolution::Unresolved;
        }
    };

    let scope = search_scope(tree, macro_node, path.scope);
    match find_in_scope(tree, scope, &path.segments) {
        Some(target) => Resolution::Target(target),
        None => {
            tracing::debug!("no definition for {} in {}", text, scope.kind());
            Resolution::Unresolved
        }
    }
}

fn search_scope<'t>(tree: &'t SourceTree, macro_node: Node<'t>, scope: Scope) -> Node<'t> {
    let Scope::Relative { levels } = scope else {
        return tree.root_node();
    };

    let mut remaining = levels;
    let mut ancestor = macro_node.parent();
    while let Some(current) = ancestor {
        if current.kind() == "dict" {
            remaining -= 1;
            if remaining == 0 {
                return current;
            }
        }
        ancestor = current.parent();
    }
    tree.root_node()
}

/// Depth-first search below `scope` that only enters dictionaries named by
/// the leading segments, then looks for an entry named by the last one.
fn find_in_scope<'t>(tree: &'t SourceTree, scope: Node<'t>, segments: &[String]) -> Option<Node<'t>> {
    let (target, dicts) = segments.split_last()?;
    let mut cursor = scope.walk();
    if !cursor.goto_first_child() {
        return None;
    }

    // Levels below `scope`, and how many of `dicts` the cursor is inside.
    let mut depth = 1;
    let mut matched = 0;
    loop {
        let node = cursor.node();
        let name = node.named_child(0).map(|key| tree.text(key));

        let enter = match node.kind() {
            "dict_core" => true,
            "dict" if matched < dicts.len() && name == Some(dicts[matched].as_str()) => {
                matched += 1;
                true
            }
            "key_value" if matched == dicts.len() && name == Some(target.as_str()) => {
                return node.named_child(1).or_else(|| node.named_child(0));
            }
            "dict" if matched == dicts.len() && name == Some(target.as_str()) => {
                return Some(node);
            }
            _ => false,
        };
        if enter && cursor.goto_first_child() {
            depth += 1;
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
            depth -= 1;
            if depth == 0 {
                return None;
            }
            if cursor.node().kind() == "dict" {
                matched -= 1;
            }
        }
    }
}
