//! # Quire - A Tabbed Text Editor Shell
//!
//! A desktop editor with a tab strip, themes loaded from CSS files and a
//! statistics footer, built in Rust.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the editor
//! cargo run
//!
//! # Open a file next to the initial blank tab
//! cargo run -- notes.md
//!
//! # Use another themes directory
//! cargo run -- --themes ./themes -vv
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quire_core::ShellConfig;
use quire_ui::{run, Flags};

/// Quire - a tabbed text editor shell
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding .css themes
    #[arg(long, value_name = "DIR")]
    themes: Option<PathBuf>,

    /// Preferences file
    #[arg(long, value_name = "FILE")]
    prefs: Option<PathBuf>,

    /// Behave like a packaged build (no Developer menu)
    #[arg(long)]
    packaged: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Loads the config file and applies command line overrides.
fn build_config(args: &Args) -> anyhow::Result<ShellConfig> {
    let mut config = match &args.config {
        Some(path) => ShellConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ShellConfig::load(),
    };

    if let Some(themes) = &args.themes {
        config.themes_dir = themes.clone();
    }
    if let Some(prefs) = &args.prefs {
        config.preferences_file = prefs.clone();
    }
    if args.packaged {
        config.packaged = true;
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Quire v{}", env!("CARGO_PKG_VERSION"));

    let config = build_config(&args)?;
    tracing::debug!(?config, "Shell config");

    let flags = Flags {
        config,
        file: args.file,
    };

    // Run the application
    run(flags).map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["quire"]);
        assert!(args.file.is_none());
        assert!(!args.packaged);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_with_file() {
        let args = Args::parse_from(["quire", "notes.md", "-vv"]);
        assert_eq!(args.file, Some(PathBuf::from("notes.md")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_overrides_apply_on_top_of_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        ShellConfig {
            themes_dir: PathBuf::from("/from/file"),
            ..ShellConfig::default()
        }
        .save_to(&path)
        .unwrap();

        let args = Args::parse_from([
            "quire",
            "--config",
            path.to_str().unwrap(),
            "--prefs",
            "/tmp/p.json",
            "--packaged",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.themes_dir, PathBuf::from("/from/file"));
        assert_eq!(config.preferences_file, PathBuf::from("/tmp/p.json"));
        assert!(config.packaged);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::parse_from(["quire", "--config", "/nonexistent/quire.toml"]);
        assert!(build_config(&args).is_err());
    }
}
