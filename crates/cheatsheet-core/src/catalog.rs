//! Read-only content catalog: landing-page cards plus per-technology documents.
//!
//! A catalog is built once at startup, either programmatically or from the JSON form
//! below, and never mutated afterwards.
//!
//! ```json
//! {
//!   "cards": [{ "name": "C++" }],
//!   "documents": [{ "key": "cpp", "title": "C++", "sections": [
//!     { "id": "intro", "title": "Introduction", "examples": [{ "title": "Hello" }] }
//!   ]}]
//! }
//! ```
//!
//! `documents` is an array so that registration order survives deserialization.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CatalogError;
use crate::slug::slugify;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEntry {
    pub name: String,
}

impl CardEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Navigation target for this card. Search results and card listings both go
    /// through here so the two can never disagree.
    pub fn path(&self) -> String {
        format!("/{}", slugify(&self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            examples: Vec::new(),
        }
    }

    pub fn with_example(mut self, title: impl Into<String>) -> Self {
        self.examples.push(Example {
            title: title.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Path of a section anchor inside this document.
    pub fn section_path(&self, section_id: &str) -> String {
        format!("/{}#{}", self.key, section_id)
    }

    pub fn path(&self) -> String {
        format!("/{}", self.key)
    }

    pub fn example_count(&self) -> usize {
        self.sections.iter().map(|s| s.examples.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    cards: Vec<CardEntry>,
    #[serde(default)]
    documents: Vec<Document>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder methods do not validate; finish with [`build`](Self::build).
    pub fn with_card(mut self, name: impl Into<String>) -> Self {
        self.cards.push(CardEntry::new(name));
        self
    }

    /// Registers a document after all previously registered ones. Search visits
    /// documents in this order.
    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    /// Finishes a programmatically built catalog, applying the same checks as
    /// [`from_json`](Self::from_json).
    pub fn build(self) -> Result<Self, CatalogError> {
        self.validate()?;
        Ok(self)
    }

    pub fn cards(&self) -> &[CardEntry] {
        &self.cards
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, key: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.key == key)
    }

    pub fn section_count(&self) -> usize {
        self.documents.iter().map(|d| d.sections.len()).sum()
    }

    pub fn example_count(&self) -> usize {
        self.documents.iter().map(Document::example_count).sum()
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Checks the structural invariants the search engine relies on for meaningful
    /// paths. Missing `sections`/`examples` are not errors.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if let Some(pos) = self.cards.iter().position(|c| c.name.is_empty()) {
            return Err(CatalogError::Invalid(format!(
                "card at position {pos} has an empty name"
            )));
        }

        let mut keys = HashSet::new();
        for document in &self.documents {
            if document.key.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "document '{}' has an empty key",
                    document.title
                )));
            }
            if !keys.insert(document.key.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "document key registered twice: {}",
                    document.key
                )));
            }

            let mut ids = HashSet::new();
            for section in &document.sections {
                if !ids.insert(section.id.as_str()) {
                    return Err(CatalogError::Invalid(format!(
                        "duplicate section id '{}' in document '{}'",
                        section.id, document.key
                    )));
                }
            }
        }

        Ok(())
    }

    /// Hex SHA-256 over every searchable field, in catalog order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for card in &self.cards {
            hasher.update(b"c|");
            hasher.update(card.name.as_bytes());
            hasher.update(b"\n");
        }
        for document in &self.documents {
            hasher.update(b"d|");
            hasher.update(document.key.as_bytes());
            hasher.update(b"|");
            hasher.update(document.title.as_bytes());
            hasher.update(b"\n");
            for section in &document.sections {
                hasher.update(b"s|");
                hasher.update(section.id.as_bytes());
                hasher.update(b"|");
                hasher.update(section.title.as_bytes());
                hasher.update(b"\n");
                for example in &section.examples {
                    hasher.update(b"e|");
                    hasher.update(example.title.as_bytes());
                    hasher.update(b"\n");
                }
            }
        }
        format!("{:x}", hasher.finalize())
    }
}
