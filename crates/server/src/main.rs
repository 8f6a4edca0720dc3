use std::sync::Arc;

use clap::Parser;
use eyre::WrapErr;
use gatelogue_client::SnapshotStore;
use gatelogue_server::{AppState, Args, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .event_format(tracing_subscriber::fmt::format().compact())
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let source = args.source();

    let store = match &args.data_file {
        Some(path) => SnapshotStore::local(source, path.to_string_lossy()),
        None => SnapshotStore::remote(source).wrap_err("failed to build HTTP client")?,
    };
    info!(location = store.location(), %source, "snapshot source");

    let state = AppState::new(store);

    // Serve even if the first fetch fails; data routes answer 503 until a
    // later refresh succeeds.
    if let Err(error) = state.store.refresh().await {
        warn!(%error, "initial snapshot fetch failed");
    }

    if let Some(period) = args.refresh_period() {
        spawn_refresher(state.store.clone(), period);
    }

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .wrap_err_with(|| format!("failed to bind {}", args.bind))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .wrap_err("server error")?;

    Ok(())
}

fn spawn_refresher(store: Arc<SnapshotStore>, period: std::time::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately and start-up already fetched
        interval.tick().await;
        loop {
            interval.tick().await;
            // Failures are logged by the store and the old snapshot is kept
            let _ = store.refresh().await;
        }
    });
}
