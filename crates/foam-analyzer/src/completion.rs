// This file is part of foam-lsp.
// Copyright (C) 2025 The foam-lsp Authors
// SPDX-License-Identifier: Apache-2.0

//! Completion proposals from the text before the cursor.

use std::sync::LazyLock;

use lsp_types::Url;
use regex::Regex;

use crate::docs::{DIRECTIVES, KEYWORDS, SNIPPETS};
use crate::parser::{Proposal, ProposalKind};
use crate::symbols::SymbolWalker;
use crate::tree::SourceTree;

/// A word followed by whitespace: the cursor is past the entry's key.
static PAST_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S\s+\S?").expect("valid regex"));

/// The last whitespace-separated token of `line`.
pub fn current_word(line: &str) -> &str {
    line.rsplit(char::is_whitespace).next().unwrap_or("")
}

/// Proposals for a cursor whose line reads `line` up to the cursor.
pub fn proposals(tree: &SourceTree, uri: &Url, line: &str, snippet_support: bool) -> Vec<Proposal> {
    let word = current_word(line);
    if word.starts_with(['(', ')']) {
        return Vec::new();
    }

    let mut proposals = Vec::new();

    if word.starts_with('$') {
        for symbol in SymbolWalker::new(tree, uri.clone(), true) {
            let mut proposal = Proposal::new(&symbol.name, ProposalKind::Variable);
            proposal.insert_text = Some(format!(":{}", symbol.name));
            proposals.push(proposal);
        }
    }

    if word.starts_with('#') {
        proposals.extend(
            DIRECTIVES
                .iter()
                .map(|directive| Proposal::new(directive, ProposalKind::Module)),
        );
    }

    if !line.is_empty() && !PAST_KEY.is_match(line) {
        proposals.extend(
            KEYWORDS
                .iter()
                .filter(|keyword| keyword.starts_with(word))
                .map(|keyword| Proposal::new(keyword, ProposalKind::Keyword)),
        );
    }

    if snippet_support {
        for snippet in SNIPPETS {
            let mut proposal = Proposal::new(snippet.label, ProposalKind::Snippet);
            proposal.insert_text = Some(snippet.body.to_string());
            proposal.is_snippet = true;
            proposals.push(proposal);
        }
    }

    proposals
}
