//! groupgrid CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};

use groupgrid::config::load_config;
use groupgrid::{Direction, GraphDescription, format_listing, layout, positions};

/// Lay out a JSON graph description on a grid and print node coordinates.
#[derive(Parser, Debug)]
#[command(
    name = "groupgrid",
    version = env!("GROUPGRID_VERSION"),
    about = "Grid layout for graphs with nested groups"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Layout config JSON file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Override direction (LR, TB)
    #[arg(short = 'd', long = "direction")]
    direction: Option<Direction>,

    /// Lay out sibling groups in parallel
    #[arg(long = "parallel")]
    parallel: bool,

    /// Print a JSON array instead of `id x y` lines
    #[arg(long = "json")]
    json: bool,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A logger may already be installed when embedded; keep going without ours.
    let _ = TermLogger::init(
        level,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    // Read input from file or stdin
    let text = match cli.input {
        Some(ref path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            buf
        }
    };

    let description = GraphDescription::from_json(&text)?;
    let named = description.build()?;

    let mut config = match cli.config {
        Some(ref path) => load_config(Some(path.as_path()))
            .with_context(|| format!("cannot load config '{}'", path.display()))?,
        None => description.config.clone().unwrap_or_default(),
    };
    if let Some(direction) = cli.direction {
        config.direction = direction;
    }
    config.parallel |= cli.parallel;

    log::debug!(
        "{} leaves, {} groups, {} links",
        named.graph.leaf_count(),
        named.graph.group_count(),
        named.graph.links().len()
    );
    let coordinates = layout(&named.graph, &config);
    let nodes = positions(&named, &coordinates);

    let rendered = if cli.json {
        let mut s = serde_json::to_string_pretty(&nodes)?;
        s.push('\n');
        s
    } else {
        format_listing(&nodes)
    };

    // Write output to file or stdout
    match cli.output {
        Some(ref path) => fs::write(path, rendered)
            .with_context(|| format!("cannot write '{}'", path.display()))?,
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush().context("cannot flush stdout")?;
        }
    }
    Ok(())
}
