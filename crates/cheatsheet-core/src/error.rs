/// Errors raised while building a catalog from its on-disk form.
///
/// Searching a catalog never fails; these only surface at load time, before the
/// catalog is handed to the search engine.

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(String),
}
