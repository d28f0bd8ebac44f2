//! ghcontext - GitHub link resolution tool
//!
//! Extracts GitHub contexts from URLs and window titles and resolves them
//! against a local repository.

use anyhow::Result;
use ghcontext::cli::{self, Cli, Commands};
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Get repository path
    let repo_path = Path::new(&cli.path);

    // Execute command
    match cli.command {
        Commands::Url(args) => {
            let service = cli::load_service(repo_path, None)?;
            cli::url(&service, &args.url, cli.format)?;
        }

        Commands::Title(args) => {
            let service = cli::load_service(repo_path, None)?;
            cli::title(&service, &args.title, cli.format)?;
        }

        Commands::Resolve(args) => {
            let service = cli::load_service(repo_path, args.remote.as_deref())?;
            let location = cli::resolve(repo_path, &service, &args.input, args.title, cli.format)?;

            if !location.is_resolved() {
                std::process::exit(1);
            }
        }

        Commands::Open(args) => {
            let service = cli::load_service(repo_path, args.remote.as_deref())?;
            if !cli::open(repo_path, &service, &args.url)? {
                std::process::exit(1);
            }
        }

        Commands::Changed(args) => {
            let service = cli::load_service(repo_path, None)?;
            cli::changed(repo_path, &service, &args.commitish, &args.file, cli.format)?;
        }

        Commands::Config(args) => {
            let service = cli::load_service(repo_path, None)?;
            cli::config(repo_path, &service, args.show, args.reset)?;
        }
    }

    Ok(())
}
