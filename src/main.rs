//! Folio Chat
//!
//! Entry point: serves the personal page, or chats from the terminal.

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use mimalloc::MiMalloc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use folio_chat::config::{AppConfig, Cli, Command, LogFormat};
use folio_chat::{server, terminal};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;

    init_tracing(config.logging.format);

    match cli.command() {
        Command::Serve => server::start_server(Arc::new(config)).await,
        Command::Chat => terminal::run(&config.chat.endpoint).await,
    }
}

/// Initialize tracing (M-LOG-STRUCTURED).
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
    }
}
