mod config;
mod script;
mod session;

use anyhow::Context;
use clap::{Parser, Subcommand};
use isogo_assets::{AssetCache, CatalogDef, DirLoader, NameHashLoader, Palette};
use isogo_common::TileCoord;
use isogo_kernel::TileEvent;
use isogo_render::{AudioLog, TextRegistry};
use isogo_stream::FrameTimer;
use isogo_tools::WorldInspector;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use config::WorldConfig;
use script::Script;
use session::Session;

#[derive(Parser)]
#[command(name = "isogo-cli", about = "Headless driver for the isometric tile world")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Run the tick loop headlessly with scripted input
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Simulated frame rate
        #[arg(short, long, default_value = "60")]
        fps: f32,
        /// Generation seed, overriding the config file
        #[arg(short, long)]
        seed: Option<u64>,
        /// World config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Content catalog (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Asset root; without it assets are identified by path only
        #[arg(long)]
        assets: Option<PathBuf>,
        /// Input script to replay
        #[arg(long, value_enum, default_value = "walk")]
        script: Script,
        /// Print every Nth frame (0 prints none)
        #[arg(long, default_value = "0")]
        print_every: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("isogo-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: step={}", isogo_kernel::DEFAULT_STEP);
            println!("assets: {}", isogo_assets::crate_info());
            println!("stream: {}", isogo_stream::crate_info());
            println!("render: {}", isogo_render::crate_info());
            println!("input: {}", isogo_input::crate_info());
            println!("author: {}", isogo_author::crate_info());
            println!("tools: {}", isogo_tools::crate_info());
        }
        Commands::Run {
            ticks,
            fps,
            seed,
            config,
            catalog,
            assets,
            script,
            print_every,
        } => {
            anyhow::ensure!(fps.is_finite() && fps > 0.0, "fps must be positive, got {fps}");

            let mut config = match config {
                Some(path) => WorldConfig::load(path)?,
                None => WorldConfig::default(),
            };
            if seed.is_some() {
                config.seed = seed;
            }

            let def = match catalog {
                Some(path) => CatalogDef::load(&path)
                    .with_context(|| format!("loading catalog {}", path.display()))?,
                None => CatalogDef::default(),
            };
            let catalog = def.compile().context("compiling catalog")?;
            let palette = match assets {
                Some(root) => {
                    let mut cache = AssetCache::new(DirLoader::new(&root));
                    let palette = Palette::resolve(&catalog, &mut cache)?;
                    tracing::info!(root = %root.display(), loads = cache.loads(), "assets loaded");
                    palette
                }
                None => Palette::resolve(&catalog, &mut AssetCache::new(NameHashLoader))?,
            };

            tracing::info!(ticks, fps, seed = ?config.seed, ?script, "starting run");
            let mut session = Session::new(&config, palette, TextRegistry::new(), AudioLog::new());
            let mut input = script.source(ticks, script::dig_target(session.projection()));
            let mut timer = FrameTimer::default();

            let summary = session.run(
                &mut input,
                &mut timer,
                Duration::from_secs_f32(1.0 / fps),
                |report| {
                    let materialized = report
                        .events
                        .iter()
                        .filter(|e| matches!(e, TileEvent::Materialized { .. }))
                        .count();
                    tracing::debug!(
                        tick = report.tick,
                        fps = report.fps,
                        materialized,
                        added = report.added,
                        removed = report.removed,
                        "tick done"
                    );
                    for event in &report.events {
                        if let TileEvent::Destroyed { coord, item } = event {
                            tracing::info!(tick = report.tick, %coord, ?item, "destroyed");
                        }
                    }
                    if print_every > 0 && report.tick % print_every == 0 {
                        print!("{}", report.frame);
                    }
                },
            )?;

            let stats = session.streamer().stats();
            println!(
                "ran {} ticks, destroyed {} tiles, last scan {:?} over {} coords",
                summary.ticks, summary.destroyed, stats.scan_time, stats.scanned
            );
            println!(
                "{}",
                WorldInspector::summary(session.store(), session.membership(), session.observer())
            );
            for (item, count) in WorldInspector::inventory_counts(session.observer()) {
                println!("  {item} x{count}");
            }
            let underfoot = TileCoord::nearest(session.observer().position());
            match WorldInspector::inspect_tile(session.store(), underfoot) {
                Some(info) => println!("underfoot: {info}"),
                None => println!("underfoot: {underfoot} unmaterialized"),
            }
            let (registry, audio) = session.into_parts();
            println!(
                "frames drawn: {}, sounds played: {}",
                registry.frames(),
                audio.played().len()
            );
        }
    }

    Ok(())
}
