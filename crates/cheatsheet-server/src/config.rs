use std::path::{Path, PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: String,
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Required:
    /// - `CHEATSHEET_CATALOG_PATH` (catalog JSON file)
    ///
    /// Optional:
    /// - `MCP_TCP_LISTEN_ADDR` (serve on TCP instead of stdio)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let catalog_path = lookup("CHEATSHEET_CATALOG_PATH").ok_or_else(|| {
            AppError::Config("CHEATSHEET_CATALOG_PATH environment variable is required".to_string())
        })?;

        if !Path::new(&catalog_path).is_file() {
            return Err(AppError::Config(format!(
                "catalog file not found: {catalog_path}"
            )));
        }

        Ok(Self {
            catalog_path,
            tcp_listen_addr: lookup("MCP_TCP_LISTEN_ADDR"),
        })
    }

    pub fn catalog_path(&self) -> PathBuf {
        Path::new(&self.catalog_path).to_path_buf()
    }
}
