//! tokc CLI: compile layered design-token sources into CSS and TypeScript artifacts.

mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use commands::build::BuildArgs;
use config::TokcConfig;

#[derive(Parser)]
#[command(name = "tokc", version, about = "Design-token compiler")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Show per-layer detail (RUST_LOG overrides)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose token sources and write artifacts (the default)
    Build(BuildArgs),
    /// Validate and compose without writing anything
    Check {
        /// Tokens directory (default: from tokc.toml, else tokens/)
        #[arg(long)]
        tokens_dir: Option<PathBuf>,
    },
    /// Print every token path in the composed tree
    Paths {
        /// Tokens directory (default: from tokc.toml, else tokens/)
        #[arg(long)]
        tokens_dir: Option<PathBuf>,
        /// Also print each path's CSS variable name
        #[arg(long)]
        vars: bool,
    },
    /// Create tokc.toml and starter token sources
    Init {
        /// Project directory (default: current directory)
        dir: Option<PathBuf>,
    },
    /// Remove generated artifacts
    Clean,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command.unwrap_or_else(|| Commands::Build(BuildArgs::default())) {
        Commands::Build(args) => {
            let (config, project_dir) = load_config(&cwd)?;
            commands::build::run(&project_dir, &config, &args).map(|_| ())
        }

        Commands::Check { tokens_dir } => {
            let (config, project_dir) = load_config(&cwd)?;
            commands::check::run(&project_dir, &config, tokens_dir.as_deref()).map(|_| ())
        }

        Commands::Paths { tokens_dir, vars } => {
            let (config, project_dir) = load_config(&cwd)?;
            commands::paths::run(&project_dir, &config, tokens_dir.as_deref(), vars).map(|_| ())
        }

        Commands::Init { dir } => {
            let dir = dir.map(|d| cwd.join(d)).unwrap_or(cwd);
            commands::init::run(&dir)
        }

        Commands::Clean => {
            let (config, project_dir) = load_config(&cwd)?;
            commands::clean::run(&project_dir, &config)
        }
    }
}

/// Load `tokc.toml` from the current directory upward; without one, use
/// defaults rooted at the current directory.
fn load_config(cwd: &Path) -> anyhow::Result<(TokcConfig, PathBuf)> {
    match TokcConfig::find_and_load(cwd)? {
        Some((config, dir)) => Ok((config, dir)),
        None => Ok((TokcConfig::default(), cwd.to_path_buf())),
    }
}
