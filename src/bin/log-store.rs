use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use message_relay::config::{self, RelayConfig};
use message_relay::observability::{logging, metrics};
use message_relay::{LogStore, RpcServer, Shutdown};

/// In-memory, deduplicating log store served over gRPC.
#[derive(Parser)]
#[command(name = "log-store", version)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// gRPC bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Worker threads handling RPCs.
    #[arg(long)]
    workers: Option<usize>,
}

impl Args {
    fn apply(self, config: &mut RelayConfig) {
        if let Some(bind) = self.bind {
            config.store.bind_address = bind;
        }
        if let Some(workers) = self.workers {
            config.store.worker_threads = workers;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mut config = config::load_or_default(args.config.as_deref())?;
    args.apply(&mut config);
    let config = config::finalize(config)?;

    logging::init_logging(&config.observability.log_level);

    // The worker pool bounds how many RPCs run at once.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.store.worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: RelayConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.store.bind_address,
        worker_threads = config.store.worker_threads,
        "log-store v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    let listener = TcpListener::bind(&config.store.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    RpcServer::new(Arc::new(LogStore::new()))
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
