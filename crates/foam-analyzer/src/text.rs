// This file is part of foam-lsp.
// Copyright (C) 2025 The foam-lsp Authors
// SPDX-License-Identifier: Apache-2.0

//! Conversions between LSP positions and rope indices.
//!
//! LSP counts characters in UTF-16 code units. A character past the end of
//! its line is clamped to the line end; a line past the end of the document
//! is an error.

use lsp_types::Position;
use ropey::Rope;

use crate::error::{AnalyzerError, Result};

/// Char index of `position` in `rope`.
pub fn char_index_at(rope: &Rope, position: Position) -> Result<usize> {
    let line_idx = position.line as usize;
    if line_idx >= rope.len_lines() {
        return Err(AnalyzerError::PositionOutOfRange {
            line: position.line,
            character: position.character,
        });
    }

    let line = rope.line(line_idx);
    let mut content_chars = line.len_chars();
    while content_chars > 0 && matches!(line.char(content_chars - 1), '\n' | '\r') {
        content_chars -= 1;
    }
    let max_units = line.char_to_utf16_cu(content_chars);
    let units = (position.character as usize).min(max_units);

    Ok(rope.line_to_char(line_idx) + line.utf16_cu_to_char(units))
}

/// Byte offset of `position` in `rope`.
pub fn offset_at(rope: &Rope, position: Position) -> Result<usize> {
    let char_idx = char_index_at(rope, position)?;
    Ok(rope.char_to_byte(char_idx))
}

/// The text of `position`'s line up to `position`.
pub fn line_prefix(rope: &Rope, position: Position) -> Result<String> {
    let end = char_index_at(rope, position)?;
    let start = rope.line_to_char(position.line as usize);
    Ok(rope.slice(start..end).to_string())
}

/// LSP position of byte offset `byte`.
pub fn position_at(rope: &Rope, byte: usize) -> Position {
    let char_idx = rope.byte_to_char(byte);
    let line = rope.char_to_line(char_idx);
    let line_start = rope.line_to_char(line);
    let character = rope.char_to_utf16_cu(char_idx) - rope.char_to_utf16_cu(line_start);
    Position::new(line as u32, character as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_ascii() {
        let rope = Rope::from_str("PS 10;\nMP 1;\n");
        assert_eq!(offset_at(&rope, Position::new(0, 0)).unwrap(), 0);
        assert_eq!(offset_at(&rope, Position::new(1, 3)).unwrap(), 10);
    }

    #[test]
    fn test_offset_multibyte() {
        let rope = Rope::from_str("a \"é😀\";\nb 1;");
        // After the emoji: 1 + 1 + 1 + 2 UTF-16 units.
        assert_eq!(offset_at(&rope, Position::new(0, 5)).unwrap(), 9);
        assert_eq!(offset_at(&rope, Position::new(1, 0)).unwrap(), 12);
    }

    #[test]
    fn test_character_clamped_to_line_end() {
        let rope = Rope::from_str("ab\r\ncd");
        assert_eq!(offset_at(&rope, Position::new(0, 40)).unwrap(), 2);
        assert_eq!(offset_at(&rope, Position::new(1, 40)).unwrap(), 6);
    }

    #[test]
    fn test_line_out_of_range() {
        let rope = Rope::from_str("ab");
        assert_eq!(
            offset_at(&rope, Position::new(3, 0)),
            Err(AnalyzerError::PositionOutOfRange {
                line: 3,
                character: 0
            })
        );
    }

    #[test]
    fn test_position_at() {
        let rope = Rope::from_str("a \"é😀\";\nb 1;");
        assert_eq!(position_at(&rope, 0), Position::new(0, 0));
        // `"` after the emoji: bytes 2 + 1 + 2 + 4, units 2 + 1 + 1 + 2.
        assert_eq!(position_at(&rope, 9), Position::new(0, 6));
        assert_eq!(position_at(&rope, 12), Position::new(1, 0));
        assert_eq!(position_at(&rope, rope.len_bytes()), Position::new(1, 4));
    }

    #[test]
    fn test_line_prefix() {
        let rope = Rope::from_str("tool {\n    index $:to\n}");
        assert_eq!(
            line_prefix(&rope, Position::new(1, 14)).unwrap(),
            "    index $:to"
        );
    }
}
