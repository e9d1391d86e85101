//! Web server for gitgallery.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::{Config, ServerConfig};
use crate::gallery::{GalleryService, RepositoryRef};
use crate::store::{ContentStore, GitHubContentStore};
use crate::{GalleryError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router, create_swagger_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Server configuration.
    server_config: ServerConfig,
}

impl WebServer {
    /// Create a new web server over an arbitrary content store.
    pub fn new(config: &Config, store: Arc<dyn ContentStore>) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| GalleryError::Config(format!("invalid server address: {e}")))?;

        let gallery = GalleryService::new(store, RepositoryRef::from_config(&config.github));

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(gallery)),
            server_config: config.server.clone(),
        })
    }

    /// Create a new web server backed by the configured GitHub repository.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = GitHubContentStore::new(&config.github)?;
        Self::new(config, Arc::new(store))
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn router(&self) -> Router {
        create_router(self.app_state.clone(), &self.server_config)
            .merge(create_health_router())
            .merge(create_swagger_router())
    }

    async fn bind(&self) -> Result<(TcpListener, SocketAddr)> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        let repo = self.app_state.gallery.repository();
        tracing::info!(
            "Serving {}/{} (branch {})",
            repo.owner,
            repo.repo,
            repo.branch
        );
        tracing::info!("Backend running on http://{}", local_addr);

        Ok((listener, local_addr))
    }

    /// Run the web server.
    pub async fn run(self) -> Result<()> {
        let router = self.router();
        let (listener, _) = self.bind().await?;

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = self.router();
        let (listener, local_addr) = self.bind().await?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
