//! The main Language Server implementation.
//!
//! # LSP Lifecycle
//!
//! 1. Editor starts our binary and sends `initialize` request
//! 2. We respond with our capabilities (what features we support)
//! 3. Editor sends `initialized` notification (handshake complete)
//! 4. Normal operation: file events and requests
//! 5. Editor sends `shutdown` request, we respond, then `exit` notification
//!
//! Every request reparses the document from scratch with the one shared
//! tree-sitter parser. Nothing derived from a document is cached between
//! requests.

mod config;
mod state;
mod utils;

pub use config::ServerConfig;
pub use state::Document;

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use foam_analyzer::{docs, symbols, ParserEngine};
use lsp_types::*;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::{Client, LanguageServer};

/// The OpenFOAM Language Server.
///
/// This struct holds all the state needed by the server:
/// - `client`: Used to send messages TO the editor
/// - `documents`: Map of open files (Uri -> Document)
/// - `parser_engine`: The tree-sitter parser, shared between requests
/// - `config`: What the client can render, set during `initialize`
pub struct FoamLanguageServer {
    /// The LSP client - used to send messages TO the editor.
    client: Client,

    /// Open documents, keyed by their URI.
    documents: Arc<DashMap<String, Document>>,

    /// The parser engine for syntax-tree based features.
    parser_engine: Arc<Mutex<ParserEngine>>,

    /// Settings negotiated with the client.
    config: Arc<RwLock<ServerConfig>>,
}

impl FoamLanguageServer {
    /// Create a new language server instance.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(DashMap::new()),
            parser_engine: Arc::new(Mutex::new(ParserEngine::new())),
            config: Arc::new(RwLock::new(ServerConfig::default())),
        }
    }

    /// Current text of `uri`, read from disk if the editor has not opened it.
    fn document_text(&self, uri: &Url) -> Option<String> {
        match self.documents.get(uri.as_str()) {
            Some(doc) => Some(doc.content.to_string()),
            None => state::load_from_disk(uri),
        }
    }

    /// Run `f` with exclusive use of the parser.
    ///
    /// The lock never outlives `f`, so it is not held across an `.await`.
    fn with_parser<T>(&self, f: impl FnOnce(&mut ParserEngine) -> T) -> T {
        let mut parser = self
            .parser_engine
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut *parser)
    }
}

/// Implementation of the Language Server Protocol.
#[tower_lsp::async_trait]
impl LanguageServer for FoamLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("Received initialize request");

        let config = ServerConfig::from_params(&params);
        match &config.workspace_root {
            Some(root) => tracing::info!("Workspace root: {}", root),
            None => tracing::warn!("No workspace root provided by client"),
        }
        tracing::debug!("Client settings: {:?}", config);
        *self.config.write().await = config;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(
                        ["=", " ", "$", "#", "-"].map(String::from).to_vec(),
                    ),
                    resolve_provider: Some(true),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                signature_help_provider: Some(SignatureHelpOptions {
                    trigger_characters: Some(
                        ["-", "[", ",", " ", "{", "\t", "="]
                            .map(String::from)
                            .to_vec(),
                    ),
                    retrigger_characters: None,
                    work_done_progress_options: Default::default(),
                }),
                definition_provider: Some(OneOf::Left(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                workspace_symbol_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "foam-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        tracing::info!("Server initialized - handshake complete");
        self.client
            .log_message(MessageType::INFO, "OpenFOAM LSP server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutdown requested");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.to_string();
        tracing::debug!("Document opened: {}", uri);

        self.documents.insert(
            uri,
            Document::new(&params.text_document.text, params.text_document.version),
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        match self.documents.get_mut(&uri) {
            Some(mut doc) => {
                for change in &params.content_changes {
                    doc.apply_change(change);
                }
                doc.version = params.text_document.version;
                tracing::debug!("Document changed: {} (version {})", uri, doc.version);
            }
            None => tracing::warn!("Change for unopened document: {}", uri),
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri.to_string();
        tracing::debug!("Document closed: {}", uri);
        self.documents.remove(&uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let content = match self.document_text(&uri) {
            Some(content) => content,
            None => return Ok(None),
        };
        let snippet_support = self.config.read().await.snippet_support;

        let items: Vec<CompletionItem> = self
            .with_parser(|parser| {
                parser.completion_proposals(&content, &uri, position, snippet_support)
            })
            .into_iter()
            .map(utils::completion_item)
            .collect();
        tracing::debug!("{} completion items at {:?}", items.len(), position);

        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn completion_resolve(&self, mut item: CompletionItem) -> Result<CompletionItem> {
        let format = self.config.read().await.completion_doc_format;
        let documentation = item
            .data
            .as_ref()
            .and_then(|data| data.as_str())
            .and_then(|data| docs::completion_documentation(data, format));

        if let Some(markup) = documentation {
            item.documentation = Some(Documentation::MarkupContent(markup));
        }
        Ok(item)
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let content = match self.document_text(&uri) {
            Some(content) => content,
            None => return Ok(None),
        };
        let format = self.config.read().await.hover_format;

        Ok(self
            .with_parser(|parser| parser.hover_info(&content, position, format))
            .map(utils::hover))
    }

    async fn signature_help(&self, params: SignatureHelpParams) -> Result<Option<SignatureHelp>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let content = match self.document_text(&uri) {
            Some(content) => content,
            None => return Ok(None),
        };

        Ok(self
            .with_parser(|parser| parser.signature_help(&content, position))
            .map(utils::signature_help))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let content = match self.document_text(&uri) {
            Some(content) => content,
            None => return Ok(None),
        };

        let range = self.with_parser(|parser| parser.goto_definition(&content, position));
        tracing::debug!("Definition for {:?}: {:?}", position, range);

        Ok(Some(GotoDefinitionResponse::Scalar(Location { uri, range })))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;

        let content = match self.document_text(&uri) {
            Some(content) => content,
            None => return Ok(None),
        };

        let symbols = self.with_parser(|parser| parser.document_symbols(&content, &uri));
        Ok(Some(DocumentSymbolResponse::Flat(symbols)))
    }

    async fn symbol(
        &self,
        params: WorkspaceSymbolParams,
    ) -> Result<Option<Vec<SymbolInformation>>> {
        let open: Vec<(String, String)> = self
            .documents
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().content.to_string()))
            .collect();

        let mut matches = Vec::new();
        for (key, content) in open {
            let uri = match Url::parse(&key) {
                Ok(uri) => uri,
                Err(err) => {
                    tracing::warn!("Skipping {}: {}", key, err);
                    continue;
                }
            };
            matches.extend(
                self.with_parser(|parser| parser.document_symbols(&content, &uri))
                    .into_iter()
                    .filter(|symbol| symbols::matches_query(&symbol.name, &params.query)),
            );
        }

        tracing::debug!("{} workspace symbols for {:?}", matches.len(), params.query);
        Ok(Some(matches))
    }
}
