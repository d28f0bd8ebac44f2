//! Treeish/blob disambiguation
//!
//! A GitHub blob link carries `<commit-ish>/<path>` with no marker between
//! the two, and branch names may contain `/`. Every split point is tried
//! against the repository, shortest commit-ish first.

use super::{peel_commit, Repository};
use crate::context::GitHubContext;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Outcome of resolving a blob reference
///
/// All fields are `None` when nothing resolved. `path` is `None` when the
/// commit-ish resolved but the path does not exist at that revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobLocation {
    /// The literal commit id or the fully qualified ref that matched
    pub commitish: Option<String>,
    /// Blob path relative to the repository root
    pub path: Option<String>,
    /// Commit id the commit-ish points at
    pub commit_sha: Option<String>,
}

impl BlobLocation {
    /// A location with nothing resolved
    pub fn none() -> Self {
        Self::default()
    }

    fn new(commitish: &str, path: Option<&str>, commit_sha: String) -> Self {
        Self {
            commitish: Some(commitish.to_string()),
            path: path.map(str::to_string),
            commit_sha: Some(commit_sha),
        }
    }

    /// True when a commit-ish matched
    pub fn is_resolved(&self) -> bool {
        self.commit_sha.is_some()
    }
}

/// All `(commit-ish, path)` splits of `objectish`, leftmost split first
pub fn split_candidates(objectish: &str) -> Vec<(&str, &str)> {
    objectish
        .match_indices('/')
        .map(|(i, _)| (&objectish[..i], &objectish[i + 1..]))
        .collect()
}

fn is_full_sha(s: &str) -> bool {
    s.len() == 40 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

impl Repository {
    /// Resolve a context's treeish path and blob name to a commit and path
    ///
    /// Contexts without both a treeish path and a blob name resolve to
    /// `BlobLocation::none()`. Refs are probed under
    /// `refs/remotes/<remote_name>/` and then `refs/tags/`.
    pub fn resolve_blob(&self, context: &GitHubContext, remote_name: &str) -> Result<BlobLocation> {
        let (Some(treeish_path), Some(blob_name)) = (context.treeish_path(), context.blob_name())
        else {
            return Ok(BlobLocation::none());
        };

        let objectish = format!("{}/{}", treeish_path, blob_name);
        let candidates = split_candidates(&objectish);

        if let Some(&(commitish, path)) = candidates.first() {
            if is_full_sha(commitish) {
                if let Some(location) = self.resolve_literal_sha(commitish, path)? {
                    return Ok(location);
                }
            }
        }

        let namespaces = [format!("refs/remotes/{}/", remote_name), "refs/tags/".to_string()];

        for (commitish, path) in candidates {
            for namespace in &namespaces {
                let reference = format!("{}{}", namespace, commitish);
                tracing::debug!(reference = %reference, "probing ref");

                let Some(commit) = self.commit_for_ref(&reference)? else {
                    continue;
                };

                let commit_sha = commit.id().to_string();
                if self.path_exists(&commit, path)? {
                    tracing::info!(reference = %reference, path, commit = %commit_sha, "resolved blob");
                    return Ok(BlobLocation::new(&reference, Some(path), commit_sha));
                }

                tracing::info!(reference = %reference, path, "commit-ish resolved but path is missing");
                return Ok(BlobLocation::new(&reference, None, commit_sha));
            }
        }

        tracing::debug!(objectish = %objectish, "no candidate resolved");
        Ok(BlobLocation::none())
    }

    fn resolve_literal_sha(&self, sha: &str, path: &str) -> Result<Option<BlobLocation>> {
        let Some(object) = self.lookup_object(sha)? else {
            return Ok(None);
        };
        let Some(commit) = peel_commit(&object)? else {
            return Ok(None);
        };

        if self.path_exists(&commit, path)? {
            tracing::info!(commit = sha, path, "resolved blob at literal commit");
            return Ok(Some(BlobLocation::new(sha, Some(path), sha.to_string())));
        }

        Ok(None)
    }
}
