//! CLI interface using clap
//!
//! Provides the command-line interface for ghcontext

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand};

/// ghcontext - Resolve GitHub links to local files
#[derive(Parser, Debug)]
#[command(name = "ghcontext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the repository (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    pub path: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the context from a GitHub URL
    Url(UrlArgs),

    /// Extract the context from a browser window title
    Title(TitleArgs),

    /// Resolve a blob link against the repository
    Resolve(ResolveArgs),

    /// Resolve a blob link and print the local file and selection
    Open(OpenArgs),

    /// Check whether a file differs from a commit in the working directory
    Changed(ChangedArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for url command
#[derive(Parser, Debug)]
pub struct UrlArgs {
    /// GitHub URL
    pub url: String,
}

/// Arguments for title command
#[derive(Parser, Debug)]
pub struct TitleArgs {
    /// Window title text
    pub title: String,
}

/// Arguments for resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// GitHub URL (or window title with --title)
    pub input: String,

    /// Treat the input as a window title
    #[arg(short, long)]
    pub title: bool,

    /// Remote whose branches are searched (overrides configuration)
    #[arg(short, long)]
    pub remote: Option<String>,
}

/// Arguments for open command
#[derive(Parser, Debug)]
pub struct OpenArgs {
    /// GitHub blob URL
    pub url: String,

    /// Remote whose branches are searched (overrides configuration)
    #[arg(short, long)]
    pub remote: Option<String>,
}

/// Arguments for changed command
#[derive(Parser, Debug)]
pub struct ChangedArgs {
    /// Commit id, branch or tag to compare against
    pub commitish: String,

    /// File path relative to the repository root
    pub file: String,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Reset to defaults
    #[arg(long)]
    pub reset: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
