//! Binary entrypoint for the smart-display server.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use smart_display::config::Config;
use smart_display::context::DisplayContext;
use smart_display::playlist::Playlist;
use smart_display::store::PlaylistStore;

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "smart-display", about = "Kiosk photo rotation server")]
struct Cli {
    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE", default_value = "smart-display.yaml")]
    config: PathBuf,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("smart_display={}", level).parse()?)
        .add_directive("tower_http=warn".parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = Config::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    cfg.validate().context("validating configuration")?;

    let store = PlaylistStore::new(&cfg.playlist_path);
    // A corrupt document is fatal here: starting with an empty rotation
    // would silently lose the operator's slide list.
    let playlist = match store.load().context("loading playlist document")? {
        Some(playlist) => playlist,
        None => {
            info!(path = %store.path().display(), "no playlist document, starting empty");
            let playlist = Playlist::default();
            store.save(&playlist).context("writing initial playlist")?;
            playlist
        }
    };
    info!(count = playlist.len(), "playlist loaded");

    let ctx = DisplayContext::new(store, playlist, cfg.default_duration_secs, Utc::now());
    let addr = cfg.socket_addr()?;
    smart_display::web::serve(ctx, addr).await
}
