//! Web server for Bookmarl.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::{Config, ServerConfig};
use crate::{BookmarlError, Database, Result};

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
    /// Create a new web server from the full configuration.
    ///
    /// Fails if the configuration is invalid, e.g. no JWT secret is set.
    pub fn new(config: &Config, db: &Database) -> Result<Self> {
        config.validate()?;

        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| BookmarlError::Config(format!("invalid server address: {e}")))?;

        let app_state = AppState::new(db, &config.auth.jwt_secret);

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            server_config: config.server.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn into_router(self) -> Router {
        let mut router = create_router(self.app_state, &self.server_config.cors_origins)
            .merge(create_health_router());

        if self.server_config.swagger {
            router = router.merge(create_swagger_router());
        }

        router
    }

    async fn bind(self) -> Result<(TcpListener, SocketAddr, Router)> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        Ok((listener, local_addr, self.into_router()))
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> Result<()> {
        let (listener, _, router) = self.bind().await?;
        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server in the background and return the bound address.
    ///
    /// Useful for tests binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let (listener, local_addr, router) = self.bind().await?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
