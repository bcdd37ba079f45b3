//! # HTTP Server
//!
//! Binds the catalogue routes to a socket and serves them.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use bookstand_core::{Database, ServerConfig};

use crate::routes::{CatalogState, catalog_routes};

pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default host/port over the given store.
    pub fn new(db: Database) -> Self {
        Self::with_config(db, ServerConfig::default())
    }

    pub fn with_config(db: Database, config: ServerConfig) -> Self {
        let router = Self::build_router(db);
        Self { config, router }
    }

    fn build_router(db: Database) -> Router {
        let state = Arc::new(CatalogState::new(db));
        catalog_routes(state).layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        info!("bookstand listening on http://{addr}");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
