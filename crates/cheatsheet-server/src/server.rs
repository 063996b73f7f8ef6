/// MCP server over a cheat-sheet catalog.
///
/// Exposes four tools:
/// - `search_cheatsheets`: Substring search over cards, sections and examples
/// - `list_cards`: Landing-page cards with their navigation paths
/// - `list_documents`: Documents in registration order
/// - `catalog_info`: Catalog totals and content fingerprint
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use cheatsheet_core::api::{
    CardInfo, CardListResponse, CatalogInfoResponse, DocumentInfo, DocumentListResponse,
    SearchCheatsheetsParams, SearchCheatsheetsResponse,
};
use cheatsheet_core::catalog::Catalog;
use cheatsheet_core::search::search;

#[derive(Clone)]
pub struct CheatsheetServer {
    catalog: Arc<Catalog>,
    tool_router: ToolRouter<CheatsheetServer>,
}

impl CheatsheetServer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl CheatsheetServer {
    #[tool(description = "Search the cheat-sheet catalog. Case-insensitive substring match over card names, section titles and example titles. Cards come first, then document hits in catalog order.")]
    async fn search_cheatsheets(
        &self,
        Parameters(params): Parameters<SearchCheatsheetsParams>,
    ) -> Result<Json<SearchCheatsheetsResponse>, String> {
        let results = search(&params.query, &self.catalog);
        info!(query = %params.query, results = results.len(), "search_cheatsheets");
        Ok(Json(SearchCheatsheetsResponse { results }))
    }

    #[tool(description = "List every landing-page card with its navigation path.")]
    async fn list_cards(&self) -> Result<Json<CardListResponse>, String> {
        let cards = self.catalog.cards().iter().map(CardInfo::from).collect();
        Ok(Json(CardListResponse { cards }))
    }

    #[tool(description = "List every cheat-sheet document in catalog order with section and example counts.")]
    async fn list_documents(&self) -> Result<Json<DocumentListResponse>, String> {
        let documents = self
            .catalog
            .documents()
            .iter()
            .map(DocumentInfo::from)
            .collect();
        Ok(Json(DocumentListResponse { documents }))
    }

    #[tool(description = "Report catalog totals and the content fingerprint of the loaded catalog.")]
    async fn catalog_info(&self) -> Result<Json<CatalogInfoResponse>, String> {
        Ok(Json(CatalogInfoResponse::from(self.catalog.as_ref())))
    }
}

#[tool_handler]
impl ServerHandler for CheatsheetServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "cheatsheet-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Cheat-sheet catalog MCP server. Use search_cheatsheets to find cards, \
                 sections and examples by title, list_cards and list_documents to browse, \
                 and catalog_info to identify the loaded catalog."
                    .to_string(),
            ),
        }
    }
}
