//! taxon - taxonomy contributions as GitHub pull requests
//!
//! CLI binary for submitting, editing and browsing taxonomy contributions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use taxonomy_contrib::config::LOG_ENV_VAR;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "taxon")]
#[command(about = "Submit knowledge and skill contributions to a taxonomy repository")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a pull request for a new contribution
    Submit {
        /// Request file (YAML or JSON)
        request: PathBuf,

        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Rewrite the contribution of an open pull request
    Edit {
        /// Pull request number in the upstream repository
        number: u64,

        /// Edit request file (YAML or JSON)
        request: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the contribution carried by an open pull request
    Show {
        /// Pull request number in the upstream repository
        number: u64,
    },

    /// Print the upstream taxonomy tree
    Tree {
        /// Directory to start from (defaults to the repository root)
        path: Option<String>,

        /// Print JSON instead of an outline
        #[arg(long)]
        json: bool,

        /// Stop descending after this many folder levels
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication and repository setup instructions
    Setup,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Err(err) if cli::already_reported(&err) => process::exit(1),
        result => result,
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Submit {
            request,
            dry_run,
            yes,
        } => {
            cli::run_submit(&request, dry_run, yes).await?;
        }
        Commands::Edit {
            number,
            request,
            yes,
        } => {
            cli::run_edit(number, &request, yes).await?;
        }
        Commands::Show { number } => {
            cli::run_show(number).await?;
        }
        Commands::Tree {
            path,
            json,
            max_depth,
        } => {
            cli::run_tree(path.as_deref(), json, max_depth).await?;
        }
        Commands::Auth { action } => {
            let action_str = match action {
                AuthAction::Test => "test",
                AuthAction::Setup => "setup",
            };
            cli::run_auth(action_str).await?;
        }
    }

    Ok(())
}
