//! Breach check server

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use hibp_range::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, RangeClient};
use tokio::net::TcpListener;

use crate::error::{Result, ServerError};
use crate::routes::create_router;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Serves an already-built router on one address.
pub struct CheckServer {
    router: Router,
    addr: SocketAddr,
}

impl CheckServer {
    pub fn new(router: Router, addr: SocketAddr) -> Self {
        Self { router, addr }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an existing listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Server starting on {}", listener.local_addr()?);

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Builder for CheckServer
pub struct ServerBuilder {
    addr: SocketAddr,
    static_dir: PathBuf,
    range_url: String,
    timeout: Duration,
    padding: bool,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            addr: ([0, 0, 0, 0], DEFAULT_PORT).into(),
            static_dir: PathBuf::from("./dist"),
            range_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            padding: false,
        }
    }

    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.addr = ([0, 0, 0, 0], port).into();
        self
    }

    /// Directory served for every path outside `/api`
    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn range_url(mut self, url: impl Into<String>) -> Self {
        self.range_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn padding(mut self, padding: bool) -> Self {
        self.padding = padding;
        self
    }

    pub fn build(self) -> Result<CheckServer> {
        let client = RangeClient::builder()
            .base_url(self.range_url)
            .timeout(self.timeout)
            .padding(self.padding)
            .build()
            .map_err(ServerError::Client)?;

        if !self.static_dir.is_dir() {
            tracing::warn!("static directory {:?} does not exist", self.static_dir);
        }

        let router = create_router(client, &self.static_dir);
        Ok(CheckServer::new(router, self.addr))
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
