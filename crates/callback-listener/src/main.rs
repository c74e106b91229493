//! Callback Listener - Entry Point

use std::io::Write;
use std::net::IpAddr;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use callback_listener::{AuthorizeRequest, CallbackServer, ListenerConfig, config::defaults};

#[derive(Parser, Debug)]
#[command(name = "callback-listener")]
#[command(about = "Capture OAuth authorization codes on a local callback URL")]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value_t = defaults::HOST, env = "CALLBACK_HOST")]
    host: IpAddr,

    /// Port to bind (must match the redirect URI registered with the provider)
    #[arg(long, default_value_t = defaults::PORT, env = "CALLBACK_PORT")]
    port: u16,

    /// OAuth client ID; when set, the authorize URL is printed at startup
    #[arg(long, env = "OAUTH_CLIENT_ID")]
    client_id: Option<String>,

    /// Scope to request (repeatable)
    #[arg(long = "scope")]
    scopes: Vec<String>,

    /// Provider authorization endpoint
    #[arg(long, default_value = defaults::AUTHORIZE_ENDPOINT)]
    authorize_endpoint: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

/// Diagnostics go to stderr; stdout carries the banner and callback lines.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), host = %cli.host, port = cli.port, "Starting");

    let config = ListenerConfig::new(cli.host, cli.port);
    let bound = CallbackServer::new(config).bind().await?;
    bound.print_banner();

    // Built after bind so `--port 0` advertises the port actually taken
    if let Some(client_id) = cli.client_id {
        let url = AuthorizeRequest::new(client_id, bound.config())
            .with_endpoint(cli.authorize_endpoint)
            .with_scopes(cli.scopes)
            .url()?;
        if let Err(e) = writeln!(std::io::stdout().lock(), "Authorize at: {url}") {
            tracing::warn!(error = %e, "Failed to write authorize URL to stdout");
        }
    }

    bound.serve().await?;

    Ok(())
}
