// This file is part of foam-lsp.
// Copyright (C) 2025 The foam-lsp Authors
// SPDX-License-Identifier: Apache-2.0

//! Built-in documentation for common OpenFOAM keywords, directives and
//! snippets, in Markdown and plain text.

use lsp_types::{MarkupContent, MarkupKind};

/// Keywords offered at the start of an entry.
pub const KEYWORDS: [&str; 2] = ["type", "value"];

/// Directives offered after `#`.
pub const DIRECTIVES: [&str; 10] = [
    "include",
    "includeEtc",
    "includeFunc",
    "includeIfPresent",
    "calc",
    "if",
    "else",
    "end",
    "codeStream",
    "neg",
];

/// An LSP snippet with tab stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    pub label: &'static str,
    pub body: &'static str,
}

pub const SNIPPETS: [Snippet; 1] = [Snippet {
    label: "boundaryCondition",
    body: "$1\n{\n\ttype ${2:someType};\n\tvalue ${3:someValue};\n$0}",
}];

/// How documentation is rendered for the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocFormat {
    #[default]
    Markdown,
    PlainText,
}

impl DocFormat {
    pub fn markup_kind(self) -> MarkupKind {
        match self {
            DocFormat::Markdown => MarkupKind::Markdown,
            DocFormat::PlainText => MarkupKind::PlainText,
        }
    }
}

impl From<&MarkupKind> for DocFormat {
    fn from(kind: &MarkupKind) -> Self {
        match kind {
            MarkupKind::Markdown => DocFormat::Markdown,
            MarkupKind::PlainText => DocFormat::PlainText,
        }
    }
}

/// Documentation for `key` as Markdown.
pub fn markdown(key: &str) -> Option<&'static str> {
    let doc = match key {
        "type" => "Choose the type of the object.\n\n```\ntype fixedValue;\ntype wall;\n```",
        "value" => "Choose the value assigned to the object.\n\n```\nvalue uniform 0;\nvalue nonuniform List<scalar> 3(0 2 1);\n```",
        "boundaryCondition" => "Handle a boundary patch for this field.\n\n```\ninlet {\n   type fixedValue;\n   value uniform 1;\n}\n```",
        "include" => "Include OpenFOAM dictionaries here.\n\n```\n#include \"functionCfg\"\n```",
        "FoamFile" => "**FoamFile**\n\nFile header read before anything else in the dictionary.\n\n```\nFoamFile\n{\n    version     2.0;\n    format      ascii;\n    class       dictionary;\n    object      controlDict;\n}\n```",
        "uniform" => "**uniform**\n\nThe same value for every face or cell.\n\n```\nvalue uniform (0 0 0);\n```",
        "nonuniform" => "**nonuniform**\n\nOne value per face or cell, given as a sized list.\n\n```\nvalue nonuniform List<scalar> 3(0 2 1);\n```",
        _ => return None,
    };
    Some(doc)
}

/// Documentation for `key` as plain text, including signature entries.
pub fn plain_text(key: &str) -> Option<&'static str> {
    let doc = match key {
        "type" => "Choose the type of the object.\n\ntype fixedValue;\ntype wall;",
        "value" => "Choose the value assigned to the object.\n\nvalue uniform 0;\nvalue nonuniform List<scalar> 3(0 2 1);",
        "boundaryCondition" => "Handle a boundary patch for this field.\n\ninlet {\n   type fixedValue;\n   value uniform 1;\n}",
        "include" => "Include OpenFOAM dictionaries here.\n\n#include \"functionCfg\"",
        "FoamFile" => "FoamFile\n\nFile header read before anything else in the dictionary.",
        "uniform" => "uniform\n\nThe same value for every face or cell.",
        "nonuniform" => "nonuniform\n\nOne value per face or cell, given as a sized list.",
        "signature_type" => "type <boundaryCondition:word>;\ntype <patch:word>;\ntype <rheologyMode:word>;",
        "signature_param_type" => "A word (usually)\n",
        _ => return None,
    };
    Some(doc)
}

pub fn lookup(key: &str, format: DocFormat) -> Option<&'static str> {
    match format {
        DocFormat::Markdown => markdown(key),
        DocFormat::PlainText => plain_text(key),
    }
}

/// Documentation attached to a completion item when the client resolves it.
pub fn completion_documentation(data: &str, format: DocFormat) -> Option<MarkupContent> {
    lookup(data, format).map(|value| MarkupContent {
        kind: format.markup_kind(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_documented() {
        for keyword in KEYWORDS {
            assert!(markdown(keyword).is_some(), "{keyword}");
            assert!(plain_text(keyword).is_some(), "{keyword}");
        }
        for snippet in SNIPPETS {
            assert!(markdown(snippet.label).is_some());
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("type", DocFormat::Markdown).is_some());
        assert!(lookup("Type", DocFormat::Markdown).is_none());
    }

    #[test]
    fn test_plain_text_has_no_fences() {
        let doc = plain_text("type").unwrap();
        assert!(!doc.contains("```"));
        assert!(markdown("type").unwrap().contains("```"));
    }

    #[test]
    fn test_signature_entries_are_plain_only() {
        assert!(plain_text("signature_type").is_some());
        assert!(markdown("signature_type").is_none());
    }

    #[test]
    fn test_completion_documentation() {
        let doc = completion_documentation("include", DocFormat::PlainText).unwrap();
        assert_eq!(doc.kind, MarkupKind::PlainText);
        assert!(doc.value.starts_with("Include OpenFOAM dictionaries"));
        assert!(completion_documentation("calc", DocFormat::Markdown).is_none());
    }
}
