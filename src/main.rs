use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use message_relay::config::{self, RelayConfig};
use message_relay::observability::{logging, metrics};
use message_relay::{HttpServer, Shutdown};

/// Aggregation facade over the log store and the messages service.
#[derive(Parser)]
#[command(name = "message-relay", version)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Log store host.
    #[arg(long)]
    store_host: Option<String>,

    /// Log store gRPC port.
    #[arg(long)]
    store_port: Option<u16>,

    /// URL of the secondary message source.
    #[arg(long)]
    secondary_url: Option<String>,

    /// Maximum LogMessage attempts.
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Delay between LogMessage attempts in milliseconds.
    #[arg(long)]
    retry_delay_ms: Option<u64>,

    /// Per-call timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl Args {
    fn apply(self, config: &mut RelayConfig) {
        let facade = &mut config.facade;
        if let Some(bind) = self.bind {
            facade.bind_address = bind;
        }
        if let Some(host) = self.store_host {
            facade.store_host = host;
        }
        if let Some(port) = self.store_port {
            facade.store_port = port;
        }
        if let Some(url) = self.secondary_url {
            facade.secondary_url = url;
        }
        if let Some(timeout) = self.timeout_ms {
            facade.call_timeout_ms = timeout;
        }
        if let Some(attempts) = self.max_attempts {
            config.retries.max_attempts = attempts;
        }
        if let Some(delay) = self.retry_delay_ms {
            config.retries.delay_ms = delay;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mut config = config::load_or_default(args.config.as_deref())?;
    args.apply(&mut config);
    let config = config::finalize(config)?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("message-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.facade.bind_address,
        store = %config.facade.store_uri(),
        secondary_url = %config.facade.secondary_url,
        max_attempts = config.retries.max_attempts,
        retry_delay_ms = config.retries.delay_ms,
        call_timeout_ms = config.facade.call_timeout_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    let listener = TcpListener::bind(&config.facade.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::from_config(&config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
