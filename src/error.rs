//! Library error type

use thiserror::Error;

/// Errors raised by repository operations
///
/// A lookup that finds nothing is not an error; these variants cover caller
/// mistakes and repository I/O failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Repository path must not be empty")]
    EmptyRepositoryPath,

    #[error("Repository has no working directory (bare repo?)")]
    BareRepository,

    #[error("Revision not found: {0}")]
    RevisionNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
