use anyhow::Result;
use kv_service::{InMemoryStore, Server};
use structopt::StructOpt;
use tokio::net::TcpListener;
use tracing::{info, Level};

#[derive(StructOpt)]
struct Opts {
    #[structopt(short, long, env = "KV_ADDRESS", default_value = "127.0.0.1:50051")]
    address: String,

    /// One of trace, debug, info, warn, error.
    #[structopt(short, long, env = "KV_LOG_LEVEL", default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::from_args();

    init_logger(opts.log_level);

    run_with(opts).await
}

async fn run_with(opts: Opts) -> Result<()> {
    info!("Listening at {}", opts.address);

    let listener = TcpListener::bind(opts.address).await?;

    let store = InMemoryStore::new();

    Server::new(listener, store)
        .run_until(shutdown_signal())
        .await?;

    info!("Server exited");

    Ok(())
}

fn init_logger(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init()
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(reason = %e, "unable to listen for interrupt");
            futures::future::pending::<()>().await
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(reason = %e, "unable to listen for termination");
                futures::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = futures::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
