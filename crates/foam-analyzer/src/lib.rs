// This file is part of foam-lsp.
// Copyright (C) 2025 The foam-lsp Authors
// SPDX-License-Identifier: Apache-2.0

//! Foam Analyzer - Analysis engine for the OpenFOAM LSP
//!
//! This crate provides:
//! - Syntax tree: tree-sitter-foam parses, [`SourceTree`] maps nodes to LSP ranges
//! - Symbol table: dotted names for every entry and dictionary
//! - Macro resolver: go to the entry a `$macro` refers to
//! - Parser engine: hover, signature help and completion on top of the above

pub mod completion;
pub mod definition;
pub mod docs;
pub mod error;
pub mod locator;
pub mod parser;
pub mod symbols;
pub mod text;
pub mod tree;

pub use docs::DocFormat;
pub use error::AnalyzerError;
pub use parser::{HoverInfo, ParserEngine, Proposal, ProposalKind, SignatureInfo};
pub use tree::SourceTree;
