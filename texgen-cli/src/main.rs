//! texgen — render LaTeX templates and compile them to PDF.
//!
//! # Usage
//!
//! ```text
//! texgen init [dir] [--force]
//! texgen render <src> <out> [--data FILE] [--set KEY=VALUE]... [--left-delim S] [--right-delim S]
//! texgen compile <file.tex> [--debug]
//! texgen build <src> <out> --main <rel.tex> [render flags] [--debug]
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{build::BuildArgs, compile::CompileArgs, init::InitArgs, render::RenderArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "texgen",
    version,
    about = "Render LaTeX templates and compile them to PDF",
    long_about = None,
)]
struct Cli {
    /// Config file (defaults to ./texgen.yaml when present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug details to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default texgen.yaml.
    Init(InitArgs),

    /// Render a template directory into an output directory.
    Render(RenderArgs),

    /// Compile a .tex file to PDF (two passes).
    Compile(CompileArgs),

    /// Render a template directory, then compile its main file.
    Build(BuildArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Render(args) => args.run(config),
        Commands::Compile(args) => args.run(config),
        Commands::Build(args) => args.run(config),
    }
}
