//! ghcontext - Resolve GitHub links to local repository objects
//!
//! This library extracts a GitHub context (owner, repository, branch, path,
//! line range, pull request or issue) from URLs and browser window titles,
//! and resolves ambiguous `<commit-ish>/<path>` references against a local
//! Git repository.

pub mod cli;
pub mod context;
pub mod error;
pub mod extract;
pub mod ports;
pub mod repo;
pub mod service;

/// Re-export commonly used types
pub use context::{GitHubContext, LinkType};
pub use error::{Error, Result};
pub use repo::{BlobLocation, Config, Repository};
pub use service::ContextService;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "ghcontext";
