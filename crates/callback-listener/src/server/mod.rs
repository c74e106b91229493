//! Callback listener server.
//!
//! One server object owns the route table and, once bound, the listening
//! socket. Each accepted connection is served on its own tokio task by
//! `axum::serve`; the only state shared between requests is stdout.

pub mod callback;

use std::io::Write;
use std::net::SocketAddr;

use axum::{Router, routing::any};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ListenerConfig;
use crate::error::{ListenerError, ListenerResult};

/// Create the router with the single callback route.
///
/// The route accepts every HTTP method. Other paths fall through to
/// axum's default 404.
pub fn create_router(callback_path: &str) -> Router {
    Router::new()
        .route(callback_path, any(callback::handle_callback))
        .layer(TraceLayer::new_for_http())
}

/// Local HTTP listener for OAuth authorization-code redirects.
pub struct CallbackServer {
    config: ListenerConfig,
    router: Router,
}

impl CallbackServer {
    /// Create a new callback server with its route table.
    #[must_use]
    pub fn new(config: ListenerConfig) -> Self {
        let router = create_router(&config.callback_path);
        Self { config, router }
    }

    /// The route table, for serving in-process.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Acquire the listening socket.
    ///
    /// There is no retry and no fallback port. When the configured port is
    /// `0`, the returned server's config carries the port actually bound.
    pub async fn bind(self) -> ListenerResult<BoundServer> {
        let addr = self.config.socket_addr();
        let listener =
            TcpListener::bind(addr).await.map_err(|e| ListenerError::bind(addr, e))?;

        let mut config = self.config;
        config.port = listener.local_addr()?.port();

        tracing::info!(addr = %addr, port = config.port, path = %config.callback_path, "Callback listener bound");

        Ok(BoundServer { listener, router: self.router, config })
    }

    /// Bind, print the banner and serve until the process is terminated.
    pub async fn run(self) -> ListenerResult<()> {
        let bound = self.bind().await?;
        bound.print_banner();
        bound.serve().await
    }
}

impl std::fmt::Debug for CallbackServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackServer").field("config", &self.config).finish_non_exhaustive()
    }
}

/// A server holding its listening socket.
#[derive(Debug)]
pub struct BoundServer {
    listener: TcpListener,
    router: Router,
    config: ListenerConfig,
}

impl BoundServer {
    /// Address the socket is bound to.
    pub fn local_addr(&self) -> ListenerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Configuration with the bound port filled in.
    #[must_use]
    pub const fn config(&self) -> &ListenerConfig {
        &self.config
    }

    /// Startup lines written to stdout.
    #[must_use]
    pub fn banner(&self) -> [String; 3] {
        [
            format!("Starting callback server on port {}", self.config.port),
            format!("Listening on {}", self.config.redirect_uri()),
            "Press Ctrl+C to exit".to_string(),
        ]
    }

    /// Write the banner to `out`; a failed write is logged, not fatal.
    pub fn write_banner(&self, out: &mut impl Write) {
        for line in self.banner() {
            if let Err(e) = writeln!(out, "{line}") {
                tracing::warn!(error = %e, "Failed to write banner to stdout");
                return;
            }
        }
    }

    pub fn print_banner(&self) {
        self.write_banner(&mut std::io::stdout().lock());
    }

    /// Accept connections until the process ends.
    pub async fn serve(self) -> ListenerResult<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }
}
