// This file is part of foam-lsp.
// Copyright (C) 2025 The foam-lsp Authors
// SPDX-License-Identifier: Apache-2.0

//! Errors raised inside the analysis engine.
//!
//! None of these reach the editor: [`crate::ParserEngine`] maps them to an
//! absent result and logs them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    #[error("position {line}:{character} is past the end of the document")]
    PositionOutOfRange { line: u32, character: u32 },

    #[error("not a macro: {0:?}")]
    NotAMacro(String),

    #[error("malformed macro path: {0:?}")]
    MalformedMacro(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
