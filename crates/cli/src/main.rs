use std::{io::IsTerminal, path::PathBuf, sync::Arc};

use {
    clap::Parser,
    courier_mcp::{McpServer, ToolRouter},
    courier_telegram::{ClientProvider, LatestSenderResolver},
    courier_tools::TransferDispatcher,
    tracing::{info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "courier",
    version,
    about = "MCP stdio server that sends local files to Telegram"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Config file to load instead of searching ./ and ~/.config/courier/.
    #[arg(long, env = "COURIER_CONFIG")]
    config: Option<PathBuf>,
}

/// Logs go to stderr; stdout carries the protocol.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "courier starting");

    let config = courier_config::load_or_discover(cli.config.as_deref())?;

    let provider = Arc::new(ClientProvider::from_config(&config.telegram));
    if !provider.is_configured() {
        // Not fatal: the server still lists its tools, and each call reports
        // the missing credential.
        warn!(
            "{} is not set; tool calls will fail until it is",
            courier_config::loader::TOKEN_ENV
        );
    }
    let resolver = Arc::new(LatestSenderResolver::new(
        Arc::clone(&provider),
        config.telegram.updates_limit,
    ));
    let dispatcher = Arc::new(TransferDispatcher::new(provider, resolver));
    let server = McpServer::new(ToolRouter::new(dispatcher), config.server.name);

    server.serve_stdio().await?;

    info!("courier stopped");
    Ok(())
}
