//! qtc-project keeps a Qt Creator generic project in step with the tree it
//! describes. Qt Creator never rescans a generic project by itself: the
//! `.files` and `.includes` lists are whatever was last typed in. This tool
//! regenerates them from disk, skipping anything the project's gitignore
//! rules (and a few well-known build and editor directories) exclude.
use anyhow::Result;
use clap::{Parser, Subcommand};
use qtc_project::core::error::ProjectError;
use qtc_project::utils;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qtc-project")]
#[command(version)]
#[command(about = "Maintain QtCreator generic project files from the source tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run as if started in DIR instead of the current directory
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    directory: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new generic project in the current directory
    Create {
        /// Project name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Regenerate the .files list and the .includes section
    Update {
        /// Show what would be written without touching any file
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "qtc_project=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let dir = match cli.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Create { name } => utils::create_project(&dir, name),
        Commands::Update { dry_run } => utils::update_project(&dir, dry_run),
    }
}

/// Exit status for a failed command: the `ProjectError` kind if one is in the
/// chain, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ProjectError>())
        .map_or(1, |project_err| project_err.exit_code() as u8)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
