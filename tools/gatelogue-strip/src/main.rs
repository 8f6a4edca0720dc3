use anyhow::{bail, Context, Result};
use clap::Parser;
use gatelogue_types::{strip_sources, GatelogueData};
use std::fs;
use std::path::{Path, PathBuf};

mod summary;

use summary::Summary;

#[derive(Parser, Debug)]
#[command(
    name = "gatelogue-strip",
    author,
    version,
    about = "Produce the provenance-free variant of a Gatelogue snapshot",
    long_about = "Reads a Gatelogue snapshot (data.json), replaces every sourced value \
                  {\"v\": ..., \"s\": [...]} by its bare value and writes the result \
                  (data_no_sources.json).\n\n\
                  The output is decoded with the typed model before it is written, so a \
                  snapshot that does not read back is never produced."
)]
struct Args {
    /// Input snapshot with sources
    #[arg(short, long, default_value = "data.json")]
    input: PathBuf,

    /// Output snapshot without sources
    #[arg(short, long, default_value = "data_no_sources.json")]
    output: PathBuf,

    /// Print per-category node counts of the snapshot
    #[arg(short, long)]
    summary: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("Input: {}", args.input.display());
    log::info!("Output: {}", args.output.display());

    if !args.input.exists() {
        bail!("Input file does not exist: {}", args.input.display());
    }
    if args.input == args.output {
        bail!("Refusing to overwrite the input file");
    }

    let stripped = strip_file(&args.input)?;
    let data = GatelogueData::from_value(stripped.clone())
        .context("Stripped snapshot does not decode")?;
    log::info!("Decoded {} nodes (version {})", data.len(), data.version);

    if args.summary {
        println!("{}", Summary::of(&data));
    }

    let bytes = serde_json::to_vec(&stripped).context("Failed to encode output")?;
    fs::write(&args.output, &bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {} bytes", bytes.len());

    Ok(())
}

fn strip_file(path: &Path) -> Result<serde_json::Value> {
    let raw = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    log::debug!("Read {} bytes", raw.len());
    let value: serde_json::Value =
        serde_json::from_slice(&raw).with_context(|| format!("{} is not JSON", path.display()))?;
    Ok(strip_sources(value))
}
