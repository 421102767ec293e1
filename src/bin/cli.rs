// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshprice CLI

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use meshprice::cli::Reporter;
use meshprice::{Pipeline, PricingConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "meshprice")]
#[command(about = "Price catalog from a folder of STL models", long_about = None, version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (default: meshprice.toml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Price every mesh in the source directory (default)
    Run(RunArgs),

    /// Show mass properties and prices of a single STL file
    Quote {
        /// STL file
        file: PathBuf,
    },

    /// Write the default configuration to a TOML file
    InitConfig {
        /// Destination file
        #[arg(default_value = "meshprice.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Clone, Default)]
struct RunArgs {
    /// Directory containing the mesh files
    #[arg(short, long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// CSV table to write
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Worker threads (1 processes files one by one)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Per-file timeout in seconds
    #[arg(long, value_name = "SECS", conflicts_with = "no_timeout")]
    timeout: Option<f64>,

    /// Disable the per-file timeout
    #[arg(long)]
    no_timeout: bool,

    /// Abort on the first unreadable mesh instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Also write a JSON run summary
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Run(args)) => run_command(args, cli.config.as_deref(), cli.verbose),
        Some(Commands::Quote { file }) => quote_command(file, cli.config.as_deref()),
        Some(Commands::InitConfig { path, force }) => init_config_command(path, *force),
        None => run_command(&cli.run, cli.config.as_deref(), cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "meshprice=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<PricingConfig> {
    PricingConfig::load(explicit).context("Failed to load configuration")
}

fn run_command(args: &RunArgs, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(source) = &args.source {
        config.source_dir = source.clone();
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(jobs) = args.jobs {
        config.parallelism = Some(jobs);
    }
    if let Some(timeout) = args.timeout {
        config.file_timeout_secs = Some(timeout);
    }
    if args.no_timeout {
        config.file_timeout_secs = None;
    }
    if args.fail_fast {
        config.fail_fast = true;
    }
    if args.no_progress {
        config.show_progress = false;
    }

    if verbose {
        println!("{}", "Building price catalog...".bold());
        println!("  Source: {}", config.source_dir.display());
        println!("  Output: {}", config.output.display());
        println!(
            "  Materials: {:?}",
            config.materials.iter().map(|m| m.name.as_str()).collect::<Vec<_>>()
        );
    }

    let report = Pipeline::new(config).run()?;

    if let Some(summary) = &args.summary {
        Reporter::write_json(&report, summary)
            .with_context(|| format!("Failed to write summary: {}", summary.display()))?;
    }

    Reporter::print_summary(&report, verbose);

    Ok(())
}

fn quote_command(file: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let pipeline = Pipeline::new(config);

    let quote = pipeline.quote(file)?;
    Reporter::print_quote(&quote, &pipeline.config().materials);

    Ok(())
}

fn init_config_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    PricingConfig::default().save(path)?;
    println!("{} Wrote default configuration to {}", "Success:".green(), path.display());

    Ok(())
}
