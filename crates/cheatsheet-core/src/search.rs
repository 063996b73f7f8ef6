use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Card,
    Section,
}

/// One search hit. Section hits (section titles and example titles alike) always
/// point at the owning section's anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub title: String,
    pub path: String,
    /// Document title, or "<document> > <section>" for example hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_title: Option<String>,
    /// Section anchor id the presenter activates after navigating to `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Case-insensitive substring search over cards, then documents.
///
/// Cards match on their name or their slug; sections on their title; examples on
/// their title.
///
/// Results come out in catalog order: every card hit first, then per document (in
/// registration order) per section the section-title hit followed by its example
/// hits. Nothing is deduplicated, ranked or truncated. An empty query yields nothing;
/// whitespace is not trimmed.
pub fn search(query: &str, catalog: &Catalog) -> Vec<SearchResult> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let matches = |candidate: &str| candidate.to_lowercase().contains(&needle);
    let mut results = Vec::new();

    for card in catalog.cards() {
        let path = card.path();
        // The slug is searchable too, so "cplusplus" finds "C++".
        if matches(&card.name) || path[1..].contains(&needle) {
            results.push(SearchResult {
                kind: ResultKind::Card,
                title: card.name.clone(),
                path,
                parent_title: None,
                id: None,
            });
        }
    }

    for document in catalog.documents() {
        for section in &document.sections {
            let path = document.section_path(&section.id);

            if matches(&section.title) {
                results.push(SearchResult {
                    kind: ResultKind::Section,
                    title: section.title.clone(),
                    path: path.clone(),
                    parent_title: Some(document.title.clone()),
                    id: Some(section.id.clone()),
                });
            }

            for example in &section.examples {
                if matches(&example.title) {
                    results.push(SearchResult {
                        kind: ResultKind::Section,
                        title: example.title.clone(),
                        path: path.clone(),
                        parent_title: Some(format!("{} > {}", document.title, section.title)),
                        id: Some(section.id.clone()),
                    });
                }
            }
        }
    }

    debug!(query, results = results.len(), "catalog search");
    results
}

/// Same as [`search`], with an absent query treated like an empty one.
pub fn search_opt(query: Option<&str>, catalog: &Catalog) -> Vec<SearchResult> {
    query.map(|q| search(q, catalog)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Document, Section};

    fn javascript_doc() -> Document {
        Document::new("javascript", "JavaScript")
            .with_section(Section::new("intro", "Introduction").with_example("Hello World"))
    }

    fn sample_catalog() -> Catalog {
        Catalog::new()
            .with_card("C++")
            .with_card("JavaScript")
            .with_card("Java")
            .with_document(javascript_doc())
            .with_document(
                Document::new("java", "Java")
                    .with_section(
                        Section::new("basics", "Basics")
                            .with_example("Java Hello")
                            .with_example("Variables"),
                    )
                    .with_section(Section::new("classes", "Classes").with_example("Basic class")),
            )
    }

    #[test]
    fn empty_query_returns_nothing() {
        let catalog = sample_catalog();
        assert!(search("", &catalog).is_empty());
        assert!(search_opt(None, &catalog).is_empty());
        assert!(search_opt(Some(""), &catalog).is_empty());
    }

    #[test]
    fn card_matched_by_slug_text() {
        let catalog = Catalog::new().with_card("C++");
        assert_eq!(search("c++", &catalog), search("cplusplus", &catalog));

        let results = search("cplusplus", &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, ResultKind::Card);
        assert_eq!(results[0].path, "/cplusplus");
        assert_eq!(results[0].parent_title, None);
        assert_eq!(results[0].id, None);
    }

    #[test]
    fn example_title_hit() {
        let catalog = Catalog::new().with_document(javascript_doc());
        let results = search("hello", &catalog);
        assert_eq!(
            results,
            vec![SearchResult {
                kind: ResultKind::Section,
                title: "Hello World".to_string(),
                path: "/javascript#intro".to_string(),
                parent_title: Some("JavaScript > Introduction".to_string()),
                id: Some("intro".to_string()),
            }]
        );
    }

    #[test]
    fn section_title_hit() {
        let catalog = Catalog::new().with_document(javascript_doc());
        let results = search("introduction", &catalog);
        assert_eq!(
            results,
            vec![SearchResult {
                kind: ResultKind::Section,
                title: "Introduction".to_string(),
                path: "/javascript#intro".to_string(),
                parent_title: Some("JavaScript".to_string()),
                id: Some("intro".to_string()),
            }]
        );
    }

    #[test]
    fn no_match() {
        assert!(search("zzz-no-match", &sample_catalog()).is_empty());
    }

    #[test]
    fn registration_order_beats_alphabetical() {
        let catalog = Catalog::new()
            .with_document(Document::new("python", "Python").with_section(Section::new("b", "Basics")))
            .with_document(Document::new("java", "Java").with_section(Section::new("b", "Basics")));

        let results = search("basics", &catalog);
        let paths: Vec<&str> = results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/python#b", "/java#b"]);
    }

    #[test]
    fn case_insensitive() {
        let catalog = sample_catalog();
        assert_eq!(search("JAVASCRIPT", &catalog), search("javascript", &catalog));
        assert!(search("JAVASCRIPT", &catalog)
            .iter()
            .any(|r| r.kind == ResultKind::Card && r.title == "JavaScript"));
    }

    #[test]
    fn ordering_cards_then_sections_then_examples() {
        let results = search("java", &sample_catalog());
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["JavaScript", "Java", "Java Hello"]);

        let results = search("basic", &sample_catalog());
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Basics", "Basic class"]);
        assert_eq!(results[1].parent_title.as_deref(), Some("Java > Classes"));
        assert_eq!(results[1].path, "/java#classes");
    }

    #[test]
    fn section_and_example_both_reported() {
        let catalog = Catalog::new().with_document(
            Document::new("go", "Go")
                .with_section(Section::new("maps", "Maps").with_example("Maps literal")),
        );
        let results = search("map", &catalog);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].parent_title.as_deref(), Some("Go"));
        assert_eq!(results[1].parent_title.as_deref(), Some("Go > Maps"));
        assert_eq!(results[0].path, results[1].path);
    }

    #[test]
    fn whitespace_query_is_literal() {
        let catalog = sample_catalog();
        let results = search(" ", &catalog);
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.title.contains(' ')));
    }

    #[test]
    fn duplicates_are_kept() {
        let catalog = Catalog::new().with_card("Rust").with_card("Rust");
        assert_eq!(search("rust", &catalog).len(), 2);
    }

    #[test]
    fn deterministic_and_substring_law() {
        let catalog = sample_catalog();
        for query in ["a", "Java", "hello", "s", "C"] {
            let first = search(query, &catalog);
            assert_eq!(first, search(query, &catalog));
            for result in &first {
                let needle = query.to_lowercase();
                assert!(
                    result.title.to_lowercase().contains(&needle)
                        || (result.kind == ResultKind::Card && result.path.contains(&needle))
                );
                assert!(result.path.starts_with('/'));
                if result.kind == ResultKind::Section {
                    assert_eq!(result.path.matches('#').count(), 1);
                }
            }
            let first_section = first.iter().position(|r| r.kind == ResultKind::Section);
            if let Some(idx) = first_section {
                assert!(first[idx..].iter().all(|r| r.kind == ResultKind::Section));
            }
        }
    }

    #[test]
    fn serializes_like_the_presenter_expects() {
        let results = search("hello", &Catalog::new().with_document(javascript_doc()));
        let json = serde_json::to_value(&results[0]).expect("serialize");
        assert_eq!(json["type"], "section");
        assert_eq!(json["parentTitle"], "JavaScript > Introduction");

        let card = search("c++", &Catalog::new().with_card("C++"));
        let json = serde_json::to_value(&card[0]).expect("serialize");
        assert_eq!(json["type"], "card");
        assert!(json.get("parentTitle").is_none());
        assert!(json.get("id").is_none());
    }
}
