use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::{CardEntry, Catalog, Document};
use crate::search::SearchResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchCheatsheetsParams {
    /// Text to look for in card names, section titles and example titles.
    /// Matching is case-insensitive substring containment.
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchCheatsheetsResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CardInfo {
    pub name: String,
    pub path: String,
}

impl From<&CardEntry> for CardInfo {
    fn from(card: &CardEntry) -> Self {
        Self {
            name: card.name.clone(),
            path: card.path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CardListResponse {
    pub cards: Vec<CardInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentInfo {
    pub key: String,
    pub title: String,
    pub path: String,
    pub section_count: usize,
    pub example_count: usize,
}

impl From<&Document> for DocumentInfo {
    fn from(document: &Document) -> Self {
        Self {
            key: document.key.clone(),
            title: document.title.clone(),
            path: document.path(),
            section_count: document.sections.len(),
            example_count: document.example_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentListResponse {
    /// Documents in registration order.
    pub documents: Vec<DocumentInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogInfoResponse {
    pub cards: usize,
    pub documents: usize,
    pub sections: usize,
    pub examples: usize,
    /// Hex SHA-256 of the catalog's searchable content.
    pub fingerprint: String,
}

impl From<&Catalog> for CatalogInfoResponse {
    fn from(catalog: &Catalog) -> Self {
        Self {
            cards: catalog.cards().len(),
            documents: catalog.documents().len(),
            sections: catalog.section_count(),
            examples: catalog.example_count(),
            fingerprint: catalog.fingerprint(),
        }
    }
}
