//! Conversions from analyzer results to LSP types.

use foam_analyzer::{HoverInfo, Proposal, ProposalKind, SignatureInfo};
use lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, Hover, HoverContents, InsertTextFormat,
    MarkupContent, ParameterInformation, ParameterLabel, SignatureHelp, SignatureInformation,
};

pub fn completion_kind(kind: ProposalKind) -> CompletionItemKind {
    match kind {
        ProposalKind::Variable => CompletionItemKind::VARIABLE,
        ProposalKind::Module => CompletionItemKind::MODULE,
        ProposalKind::Keyword => CompletionItemKind::KEYWORD,
        ProposalKind::Snippet => CompletionItemKind::SNIPPET,
    }
}

pub fn completion_item(proposal: Proposal) -> CompletionItem {
    let insert_text_format = if proposal.is_snippet {
        InsertTextFormat::SNIPPET
    } else {
        InsertTextFormat::PLAIN_TEXT
    };

    CompletionItem {
        label: proposal.label,
        kind: Some(completion_kind(proposal.kind)),
        insert_text: proposal.insert_text,
        insert_text_format: Some(insert_text_format),
        data: Some(serde_json::Value::String(proposal.data)),
        ..Default::default()
    }
}

pub fn hover(info: HoverInfo) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: info.format.markup_kind(),
            value: info.content,
        }),
        range: info.range,
    }
}

/// Build a SignatureHelp response from SignatureInfo.
pub fn signature_help(info: SignatureInfo) -> SignatureHelp {
    let parameters = info
        .parameters
        .into_iter()
        .map(|p| ParameterInformation {
            label: ParameterLabel::Simple(p.label),
            documentation: p.documentation.map(Documentation::String),
        })
        .collect();

    let documentation = if info.documentation.is_empty() {
        None
    } else {
        Some(Documentation::String(info.documentation))
    };

    SignatureHelp {
        signatures: vec![SignatureInformation {
            label: info.label,
            documentation,
            parameters: Some(parameters),
            active_parameter: Some(info.active_parameter),
        }],
        active_signature: Some(0),
        active_parameter: Some(info.active_parameter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foam_analyzer::{DocFormat, ParserEngine};
    use lsp_types::{MarkupKind, Position, Url};
    use rstest::rstest;

    #[rstest]
    #[case(ProposalKind::Variable, CompletionItemKind::VARIABLE)]
    #[case(ProposalKind::Module, CompletionItemKind::MODULE)]
    #[case(ProposalKind::Keyword, CompletionItemKind::KEYWORD)]
    #[case(ProposalKind::Snippet, CompletionItemKind::SNIPPET)]
    fn test_completion_kind(#[case] kind: ProposalKind, #[case] expected: CompletionItemKind) {
        assert_eq!(completion_kind(kind), expected);
    }

    #[test]
    fn test_snippet_item() {
        let uri = Url::parse("file:///case/0/U").unwrap();
        let proposals =
            ParserEngine::new().completion_proposals("x ", &uri, Position::new(0, 2), true);
        let item = completion_item(proposals.into_iter().next().unwrap());
        assert_eq!(item.label, "boundaryCondition");
        assert_eq!(item.insert_text_format, Some(InsertTextFormat::SNIPPET));
        assert_eq!(
            item.data,
            Some(serde_json::Value::String("boundaryCondition".to_string()))
        );
    }

    #[test]
    fn test_hover_uses_format() {
        let info = ParserEngine::new()
            .hover_info("value 0;", Position::new(0, 1), DocFormat::PlainText)
            .unwrap();
        match hover(info).contents {
            HoverContents::Markup(markup) => assert_eq!(markup.kind, MarkupKind::PlainText),
            other => panic!("unexpected contents: {other:?}"),
        }
    }

    #[test]
    fn test_signature_help() {
        let info = ParserEngine::new()
            .signature_help("type wall;", Position::new(0, 2))
            .unwrap();
        let help = signature_help(info);
        let signature = &help.signatures[0];
        assert_eq!(signature.label, "Keyword: type");
        assert!(signature.documentation.is_some());
        assert_eq!(signature.parameters.as_ref().unwrap().len(), 1);
    }
}
