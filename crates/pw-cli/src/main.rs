//! CLI entry point for the pathwatch tool.
//!
//! This binary watches directory trees by polling and prints the changes it
//! finds, and exposes the path parser for inspecting how paths are read.
//!
//! # Usage
//!
//! ```bash
//! pathwatch [OPTIONS] <COMMAND>
//!
//! # Print changes under two trees, polling every 500 ms
//! pathwatch watch ./incoming ./outgoing --interval-ms 500
//!
//! # Same, as one JSON object per line
//! pathwatch watch ./incoming --json
//!
//! # Inspect a Windows path from any host
//! pathwatch path info '\\?\UNC\fileserver\public\docs' --flavor windows
//!
//! # Shorten a path for display
//! pathwatch path ellipsize /home/user/documents/projects/report.txt --max-length 20
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use pw_core::Config;
use pw_path::{EllipsizeOptions, Flavor, GenericPath, Local, ParseOptions, Unix, Windows};
use pw_watcher::{FileSystemEvent, FileWatcher, Listener, PollingFileWatcher, TokioExecutor};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Polling file watcher and path inspection tool.
#[derive(Parser)]
#[command(name = "pathwatch", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file.
    #[arg(short, long, global = true, env = "PATHWATCH_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Watch files and directories and print every change until interrupted.
    Watch {
        /// Files or directories to watch (added to those in the config file).
        paths: Vec<Utf8PathBuf>,

        /// Delay between scans in milliseconds.
        #[arg(short, long, env = "PATHWATCH_INTERVAL_MS")]
        interval_ms: Option<u64>,

        /// Print events as JSON lines.
        #[arg(long)]
        json: bool,
    },

    /// Parse and transform paths without touching the file system.
    Path {
        /// Path operation.
        #[command(subcommand)]
        command: PathCommand,
    },
}

/// Path operations.
#[derive(Subcommand)]
enum PathCommand {
    /// Show how a path is parsed.
    Info {
        /// The path to parse.
        path: String,

        /// Path syntax to parse with.
        #[arg(long, value_enum, default_value_t)]
        flavor: FlavorArg,
    },

    /// Print the lexically normalized form of a path.
    Normalize {
        /// The path to normalize.
        path: String,

        /// Path syntax to parse with.
        #[arg(long, value_enum, default_value_t)]
        flavor: FlavorArg,
    },

    /// Shorten a path to a maximum length for display.
    Ellipsize {
        /// The path to shorten.
        path: String,

        /// Maximum length of the result in characters.
        #[arg(short, long, default_value_t = 40)]
        max_length: usize,

        /// Keep only trailing segments.
        #[arg(long)]
        right_only: bool,

        /// Marker for the dropped segments (overrides the config file).
        #[arg(long)]
        ellipsis: Option<String>,

        /// Path syntax to parse with.
        #[arg(long, value_enum, default_value_t)]
        flavor: FlavorArg,
    },
}

/// Path syntax selector.
#[derive(Clone, Copy, Default, ValueEnum)]
enum FlavorArg {
    /// The host operating system's syntax.
    #[default]
    Local,
    /// Unix syntax.
    Unix,
    /// Windows syntax.
    Windows,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if verbose logging is enabled, or `info` level by default.
/// Log output goes to stderr so it never mixes with printed events.
fn init_tracing(verbose: bool, color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},mio=warn"))
    });

    // Check if colors should be disabled (config/flag or NO_COLOR env var)
    let use_ansi = color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the config file and CLI arguments.
///
/// CLI arguments take precedence over the file.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or the result is
/// invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Commands::Watch {
        paths, interval_ms, ..
    } = &cli.command
    {
        config.watch.paths.extend(paths.iter().cloned());
        if let Some(interval_ms) = interval_ms {
            config.watch.poll_interval_ms = *interval_ms;
        }
    }
    config.log.verbose |= cli.verbose;
    if cli.no_color {
        config.log.color = false;
    }

    config.validate()?;
    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Watches the configured paths and prints events until shutdown.
///
/// # Errors
///
/// Returns an error if no paths are configured, a path cannot be
/// registered, or writing to stdout fails.
async fn run_watch(config: &Config, json: bool) -> color_eyre::Result<()> {
    if config.watch.paths.is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "No paths to watch: pass them as arguments or set watch.paths in the config file"
        ));
    }

    let executor = Arc::new(TokioExecutor::current()?);
    let watcher = PollingFileWatcher::from_config(executor, config)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    watcher.subscribe(&Listener::new(move |event| {
        // the receiver only goes away during shutdown
        let _ = tx.send(event.clone());
    }));
    watcher.start()?;
    info!(
        paths = watcher.watched_paths().len(),
        interval_ms = config.watch.poll_interval_ms,
        "Watching for changes"
    );

    let printer = async {
        while let Some(event) = rx.recv().await {
            print_event(&event, json)?;
        }
        Ok::<(), color_eyre::Report>(())
    };

    tokio::select! {
        result = printer => result?,
        result = shutdown_signal() => result?,
    }

    watcher.stop();
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() -> color_eyre::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Received Ctrl-C, shutting down");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("Received Ctrl-C, shutting down");
    }

    Ok(())
}

/// Runs a path subcommand with the selected flavor.
fn run_path(command: &PathCommand, config: &Config) -> color_eyre::Result<()> {
    let flavor = match command {
        PathCommand::Info { flavor, .. }
        | PathCommand::Normalize { flavor, .. }
        | PathCommand::Ellipsize { flavor, .. } => *flavor,
    };

    let output = match flavor {
        FlavorArg::Local => path_output::<Local>(command, config)?,
        FlavorArg::Unix => path_output::<Unix>(command, config)?,
        FlavorArg::Windows => path_output::<Windows>(command, config)?,
    };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{output}")?;
    Ok(())
}

/// Computes the output of a path subcommand.
fn path_output<F: Flavor>(command: &PathCommand, config: &Config) -> color_eyre::Result<String> {
    let options = ParseOptions {
        trim_whitespace: config.path.trim_whitespace,
    };

    match command {
        PathCommand::Info { path, .. } => {
            let path = GenericPath::<F>::parse_with(path, options)?;
            Ok(describe(&path))
        }
        PathCommand::Normalize { path, .. } => {
            let path = GenericPath::<F>::parse_with(path, options)?;
            Ok(format!("{}\n", path.normalize()))
        }
        PathCommand::Ellipsize {
            path,
            max_length,
            right_only,
            ellipsis,
            ..
        } => {
            let path = GenericPath::<F>::parse_with(path, options)?;
            let options = EllipsizeOptions {
                start_from_left: !right_only,
                ellipsis: ellipsis.as_deref().unwrap_or(&config.path.ellipsis),
            };
            Ok(format!("{}\n", path.ellipsize_with(*max_length, options)?))
        }
    }
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints one event as text or as a JSON line.
fn print_event(event: &FileSystemEvent, json: bool) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if json {
        writeln!(handle, "{}", serde_json::to_string(event)?)?;
    } else {
        writeln!(handle, "{event}")?;
    }
    Ok(())
}

/// Formats the parsed structure of a path.
fn describe<F: Flavor>(path: &GenericPath<F>) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let root = path.root().map(|r| r.to_string()).unwrap_or_default();
    let kind = path
        .root_kind()
        .map_or_else(|| "none".to_owned(), |k| format!("{k:?}"));
    let parent = path.parent().map(|p| p.to_string()).unwrap_or_default();

    let _ = writeln!(out, "path:      {path}");
    let _ = writeln!(out, "flavor:    {}", path.flavor());
    let _ = writeln!(out, "absolute:  {}", path.is_absolute());
    let _ = writeln!(out, "root:      {root} ({kind})");
    let _ = writeln!(out, "parent:    {parent}");
    let _ = writeln!(out, "filename:  {}", path.filename());
    let _ = writeln!(out, "stem:      {}", path.filename_stem());
    let _ = writeln!(out, "extension: {}", path.filename_ext().unwrap_or(""));
    let _ = writeln!(out, "segments:  {}", path.segments().join(" | "));
    let _ = writeln!(out, "normal:    {}", path.normalize());
    out
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Merge the config file with CLI overrides
    let config = build_config(&cli)?;

    // 4. Initialize tracing (handles --no-color for log output)
    init_tracing(config.log.verbose, config.log.color);

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Watch { json, .. } => run_watch(&config, *json).await,
        Commands::Path { command } => run_path(command, &config),
    }
}
