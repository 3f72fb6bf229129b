//! Binary entry point for the subtitle housekeeping tools.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use subclean_core::review::policy::{AcceptAll, KeepAll};
use subclean_core::review::{process_file, Outcome};
use subclean_core::tracks::pick_from_probe_json;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line options for the binary.
#[derive(Parser)]
struct Cli {
    /// Enable verbose debug and trace logs.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Strip CC/SDH artifacts from an SRT file.
    Clean {
        /// Rewrite the file accepting every change. Without it only report.
        #[arg(long)]
        apply: bool,

        /// SRT file to clean.
        input: PathBuf,
    },
    /// Print the index of the cleanest English subtitle stream.
    PickTrack {
        /// ffprobe JSON output, or `-` to read stdin.
        probe: PathBuf,
    },
}

/// Application entry point which parses CLI args and performs actions.
/// This function should initialize logging and delegate to the core library.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.debug {
        EnvFilter::default()
            .add_directive("subclean=trace".parse()?)
            .add_directive("subclean_core=trace".parse()?)
            .add_directive("info".parse()?)
    } else {
        EnvFilter::default()
            .add_directive("subclean=info".parse()?)
            .add_directive("subclean_core=info".parse()?)
            .add_directive("warn".parse()?)
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    match cli.command {
        Command::Clean { apply, input } => clean(&input, apply),
        Command::PickTrack { probe } => pick_track(&probe),
    }
}

fn clean(input: &Path, apply: bool) -> Result<()> {
    if !input.is_file() {
        return Err(anyhow!("file not found: {}", input.display()));
    }
    if !apply {
        let mut reviewer = KeepAll::default();
        process_file(input, &mut reviewer)?;
        info!(
            "dry run: {} captions would change, {} would be removed",
            reviewer.proposed, reviewer.removals
        );
        return Ok(());
    }
    match process_file(input, &mut AcceptAll)? {
        Outcome::Rewritten {
            backup,
            modified,
            removed,
        } => info!(
            "modified {modified}, removed {removed}, backup saved as {}",
            backup.display()
        ),
        Outcome::Unchanged | Outcome::Aborted => info!("no changes were made"),
    }
    Ok(())
}

fn pick_track(probe: &Path) -> Result<()> {
    let json = if probe.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(probe)
            .with_context(|| format!("reading {}", probe.display()))?
    };
    let index = pick_from_probe_json(&json)?
        .ok_or_else(|| anyhow!("no suitable English subtitle found"))?;
    println!("{index}");
    Ok(())
}
