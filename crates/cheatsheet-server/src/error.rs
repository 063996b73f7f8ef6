#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Catalog(#[from] cheatsheet_core::error::CatalogError),
}
