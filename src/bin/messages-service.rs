use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use message_relay::config;
use message_relay::observability::logging;
use message_relay::{MessagesService, Shutdown};

/// Stub secondary message source returning a fixed text body.
#[derive(Parser)]
#[command(name = "messages-service", version)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Body served on GET /messages.
    #[arg(long)]
    body: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mut config = config::load_or_default(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.secondary.bind_address = bind;
    }
    if let Some(body) = args.body {
        config.secondary.body = body;
    }
    let config = config::finalize(config)?;

    logging::init_logging(&config.observability.log_level);

    let listener = TcpListener::bind(&config.secondary.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    MessagesService::new(config.secondary.body)
        .run(listener, shutdown.subscribe())
        .await?;

    Ok(())
}
