//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed arguments
//! and returns an `anyhow::Result<()>`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::backend::LibraryData;
use crate::config;

/// Sonority, a desktop client for Subsonic-compatible music servers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, env = "SONORITY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Offline library document (JSON). The built-in sample library is
    /// served when omitted.
    #[arg(long, env = "SONORITY_LIBRARY")]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config file in effect: `--config` or the OS default.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(config::config_path)
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the path of the config file in effect
    ConfigPath,
    /// Validate an offline library document
    CheckLibrary {
        /// Path to the library JSON file
        file: PathBuf,
    },
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified
/// (meaning the GUI should launch).
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Some(Commands::ConfigPath) => {
            cmd_config_path(cli)?;
            Ok(true)
        }
        Some(Commands::CheckLibrary { file }) => {
            let summary = cmd_check_library(file)?;
            println!("{}", summary);
            Ok(true)
        }
        None => Ok(false),
    }
}

fn cmd_config_path(cli: &Cli) -> anyhow::Result<()> {
    let path = cli
        .config_path()
        .ok_or(config::ConfigError::NoConfigDir)?;
    println!("{}", path.display());
    Ok(())
}

/// Load and validate a library document, returning a one-line summary.
fn cmd_check_library(file: &Path) -> anyhow::Result<String> {
    let data = LibraryData::load(file)
        .with_context(|| format!("Failed to load library {}", file.display()))?;

    let problems = data.problems();
    for problem in &problems {
        eprintln!("  ✗ {}", problem);
    }
    if !problems.is_empty() {
        anyhow::bail!("{} problem(s) found in {}", problems.len(), file.display());
    }

    Ok(format!(
        "{}: {} albums, {} artists, {} songs, {} playlists",
        file.display(),
        data.albums.len(),
        data.artists.len(),
        data.songs.len(),
        data.playlists.len()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_library(dir: &TempDir, data: &LibraryData) -> PathBuf {
        let path = dir.path().join("library.json");
        std::fs::write(&path, serde_json::to_string(data).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_no_subcommand_launches_gui() {
        let cli = Cli::try_parse_from(["sonority"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!run_command(&cli).unwrap());
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "sonority",
            "--library",
            "lib.json",
            "config-path",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.library, Some(PathBuf::from("lib.json")));
        assert_eq!(cli.config_path(), Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.command, Some(Commands::ConfigPath));
    }

    #[test]
    fn test_check_library_summary() {
        let dir = TempDir::new().unwrap();
        let data = LibraryData::sample();
        let path = write_library(&dir, &data);

        let summary = cmd_check_library(&path).unwrap();
        assert!(summary.contains(&format!("{} albums", data.albums.len())));
        assert!(summary.contains(&format!("{} songs", data.songs.len())));
    }

    #[test]
    fn test_check_library_reports_dangling_references() {
        let dir = TempDir::new().unwrap();
        let mut data = LibraryData::sample();
        data.artists.clear();
        let path = write_library(&dir, &data);

        let err = cmd_check_library(&path).unwrap_err();
        assert!(err.to_string().contains("problem(s) found"));
    }

    #[test]
    fn test_check_library_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = cmd_check_library(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to load library"));
    }
}
