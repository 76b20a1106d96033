//! Sonority - a desktop client for Subsonic-compatible music servers.
//!
//! Browses albums, artists, genres and playlists with back/forward history
//! and controls playback of the server's play queue. It can be run as a GUI
//! application or used via CLI commands.

// Hide console window on Windows when running as GUI
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
#[cfg(test)]
pub mod test_utils;
pub mod ui;

use clap::Parser;
use iced::{Size, application};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use backend::{Backend, LibraryData, MemoryBackend};
use ui::{ShortcutMap, Sonority, Startup};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::from_default_env()
                .add_directive("sonority=info".parse()?)
                .add_directive("ui=info".parse()?)
                .add_directive("backend=info".parse()?),
        )
        .init();

    // Try to run a CLI command
    if cli::run_command(&args)? {
        // A command was executed, exit normally
        return Ok(());
    }

    let config_path = args.config_path();
    let config = match &config_path {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    let backend = build_backend(&args)?;
    let window_size = Size::new(config.window.width, config.window.height);

    let startup = Startup {
        config,
        config_path,
        backend,
        shortcuts: ShortcutMap::platform_default(),
    };

    // No command specified, launch the GUI
    application(Sonority::title, Sonority::update, Sonority::view)
        .subscription(Sonority::subscription)
        .theme(Sonority::theme)
        .window_size(window_size)
        .run_with(move || Sonority::new(startup))
        .map_err(|e| anyhow::anyhow!("GUI Error: {}", e))
}

/// Offline backend over `--library`, or the built-in sample library.
fn build_backend(args: &cli::Cli) -> anyhow::Result<Backend> {
    let backend = match &args.library {
        Some(path) => {
            tracing::info!("Serving library from {}", path.display());
            MemoryBackend::from_file(path)?
        }
        None => {
            tracing::info!("No library given, serving the sample library");
            MemoryBackend::new(LibraryData::sample(), ".")
        }
    };
    Ok(backend.into_backend())
}
