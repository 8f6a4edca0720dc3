use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gatelogue_client::DataSource;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "gatelogue-server",
    author,
    version,
    about = "Browse a Gatelogue snapshot over HTTP",
    long_about = "Fetches the published Gatelogue dataset, keeps it in memory and serves \
                  read-only JSON views of nodes, categories, airports and nearby places.\n\n\
                  The snapshot is fetched once at start-up and, if --refresh-interval is set, \
                  periodically after that. A failed refresh keeps the previous snapshot."
)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "GATELOGUE_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Read `data_no_sources.json` instead of `data.json`
    #[arg(long, env = "GATELOGUE_NO_SOURCES")]
    pub no_sources: bool,

    /// Read the snapshot from this local file instead of the published URL
    #[arg(long, env = "GATELOGUE_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Re-fetch the snapshot every this many seconds
    #[arg(long, env = "GATELOGUE_REFRESH_INTERVAL")]
    pub refresh_interval: Option<u64>,
}

impl Args {
    pub fn source(&self) -> DataSource {
        if self.no_sources {
            DataSource::NoSources
        } else {
            DataSource::WithSources
        }
    }

    pub fn refresh_period(&self) -> Option<Duration> {
        self.refresh_interval
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
