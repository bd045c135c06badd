use anyhow::Result;
use clap::Parser;

use cartograph::config::TypeClassStyle;
use cartograph::pipeline::{self, StageFlags};
use cartograph::Config;

#[derive(Parser, Debug)]
#[command(name = "cartograph")]
#[command(about = "Rebuild graph snapshots from YAML records, then ingest external search artifacts")]
struct Args {
    /// Skip the full graph payload and crosswalk
    #[arg(long)]
    no_full: bool,

    /// Skip the lite graph payload and node details
    #[arg(long)]
    no_lite: bool,

    /// Skip the explorer assets (lite index, adjacency, degree, search records)
    #[arg(long)]
    no_explorer: bool,

    /// Skip the source-node inventories
    #[arg(long)]
    no_sources: bool,

    /// Skip ingesting the external artifact inbox
    #[arg(long)]
    no_sync: bool,

    /// Hash inbox files before and after when syncing, slower, precise diff
    #[arg(long)]
    verify_hash: bool,

    /// Normalise node style classes, short gives 'org', model gives 'organization'
    #[arg(long, value_enum)]
    type_class_style: Option<TypeClassStyle>,

    /// Indent graph payloads instead of minifying them
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let args = Args::parse();

    log::info!("Starting cartograph build");

    let mut config = Config::load()?;
    log::info!("Configuration loaded successfully");
    log::info!("Content root: {}", config.data_dir().display());
    log::info!("Output dir: {}", config.output_dir().display());

    // Command line overrides on top of config.toml
    if let Some(style) = args.type_class_style {
        config.build.type_class_style = style;
    }
    if args.pretty {
        config.build.pretty = true;
    }

    let flags = StageFlags {
        full: !args.no_full,
        lite: !args.no_lite,
        explorer: !args.no_explorer,
        sources: !args.no_sources,
        sync: !args.no_sync,
        verify_hash: args.verify_hash,
    };

    let report = pipeline::run(&config, flags)?;

    log::info!(
        "Done: {} snapshot(s) written, {} entities, {} edges",
        report.written.len(),
        report.entities,
        report.edges
    );

    Ok(())
}
