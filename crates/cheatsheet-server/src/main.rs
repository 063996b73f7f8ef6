mod config;
mod error;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cheatsheet_core::catalog::Catalog;
use config::Config;
use error::AppError;
use server::CheatsheetServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting cheatsheet MCP server");

    let config = Config::from_env()?;
    info!(
        catalog_path = %config.catalog_path,
        tcp = config.tcp_listen_addr.is_some(),
        "configuration loaded"
    );

    let catalog = Catalog::load(&config.catalog_path()).map_err(AppError::from)?;
    info!(
        cards = catalog.cards().len(),
        documents = catalog.documents().len(),
        sections = catalog.section_count(),
        examples = catalog.example_count(),
        fingerprint = %catalog.fingerprint(),
        "catalog loaded"
    );

    let server = CheatsheetServer::new(Arc::new(catalog));
    match config.tcp_listen_addr.as_deref() {
        Some(addr) => serve_tcp(server, addr).await,
        None => serve_stdio(server).await,
    }
}

/// Accepts MCP clients on `addr`, one task per connection, until the listener fails.
async fn serve_tcp(server: CheatsheetServer, addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(listen_addr = %addr, "serving catalog search on TCP");
    loop {
        let (stream, peer) = listener.accept().await?;
        let server = server.clone();
        tokio::spawn(async move {
            info!(peer = %peer, "client connected");
            match server.serve(stream).await {
                Ok(service) => {
                    if let Err(e) = service.waiting().await {
                        error!(peer = %peer, error = %e, "session task failed");
                    }
                }
                Err(e) => error!(peer = %peer, error = %e, "session initialization failed"),
            }
            info!(peer = %peer, "client disconnected");
        });
    }
}

async fn serve_stdio(server: CheatsheetServer) -> anyhow::Result<()> {
    info!("serving catalog search on stdio");
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    info!("stdio session closed");
    Ok(())
}
