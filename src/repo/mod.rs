//! Repository access and object resolution
//!
//! This module handles Git repository operations including:
//! - Opening a repository and looking up objects by id, ref or revspec
//! - Disambiguating `<commit-ish>/<path>` strings against real refs
//! - Detecting working directory changes for a single path

mod config;
mod resolve;

pub use config::{Config, SelectionConfig, CONFIG_DIR};
pub use resolve::{split_candidates, BlobLocation};

use crate::error::{Error, Result};
use git2::{Commit, DiffOptions, ErrorClass, ErrorCode, Object, ObjectType, Repository as GitRepo};
use std::path::{Path, PathBuf};

/// An opened Git repository with a working directory
pub struct Repository {
    /// The underlying git2 repository
    repo: GitRepo,
    /// Path to the working directory root
    root: PathBuf,
}

impl Repository {
    /// Open the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::EmptyRepositoryPath);
        }

        let repo = GitRepo::discover(path)?;
        let root = repo.workdir().ok_or(Error::BareRepository)?.to_path_buf();

        Ok(Self { repo, root })
    }

    /// Get the working directory root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up an object by id, ref name or revspec
    ///
    /// Returns `Ok(None)` when nothing matches; other failures propagate.
    pub fn lookup_object(&self, spec: &str) -> Result<Option<Object<'_>>> {
        match self.repo.revparse_single(spec) {
            Ok(object) => Ok(Some(object)),
            Err(e) if is_no_match(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Find the commit a fully qualified ref points at
    fn commit_for_ref(&self, name: &str) -> Result<Option<Commit<'_>>> {
        match self.repo.find_reference(name) {
            Ok(reference) => peel_commit(&reference.peel(ObjectType::Any)?),
            Err(e) if is_no_match(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether `path` names an entry in the commit's tree
    fn path_exists(&self, commit: &Commit<'_>, path: &str) -> Result<bool> {
        let tree = commit.tree()?;
        match tree.get_path(Path::new(path)) {
            Ok(_) => Ok(true),
            Err(e) if is_no_match(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether the working copy of `path` differs from `commitish`
    pub fn has_changes_in_working_directory(&self, commitish: &str, path: &str) -> Result<bool> {
        let commit = self
            .lookup_object(commitish)?
            .ok_or_else(|| Error::RevisionNotFound(commitish.to_string()))?
            .peel_to_commit()?;
        let tree = commit.tree()?;

        let mut diff_opts = DiffOptions::new();
        diff_opts
            .pathspec(path)
            .disable_pathspec_match(true)
            .include_untracked(true);

        let diff = self
            .repo
            .diff_tree_to_workdir(Some(&tree), Some(&mut diff_opts))?;

        let changed = diff.deltas().next().is_some();
        tracing::debug!(commitish, path, changed, "compared working directory");

        Ok(changed)
    }
}

/// Peel an object to a commit; objects that are not commit-ish yield `None`
fn peel_commit<'r>(object: &Object<'r>) -> Result<Option<Commit<'r>>> {
    match object.peel_to_commit() {
        Ok(commit) => Ok(Some(commit)),
        Err(e) if e.code() == ErrorCode::InvalidSpec => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lookup failures that mean "no such object" rather than a broken repository
fn is_no_match(e: &git2::Error) -> bool {
    match e.code() {
        ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Ambiguous => true,
        ErrorCode::GenericError => {
            matches!(e.class(), ErrorClass::Reference | ErrorClass::Invalid)
        }
        _ => false,
    }
}
