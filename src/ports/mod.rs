//! Host collaborator interfaces
//!
//! Clipboard access, window enumeration and document navigation belong to
//! the host environment. The core only talks to them through these traits,
//! so tests and other hosts can supply their own implementations.

use std::path::Path;

/// Source of plain-text clipboard contents
pub trait ClipboardSource {
    /// Current clipboard text, or `None` when empty or not text
    fn text(&self) -> Option<String>;
}

/// Enumerates top-level windows by native window class
pub trait WindowEnumerator {
    /// Titles of all windows of `window_class`, in a stable order
    fn window_titles(&self, window_class: &str) -> Vec<String>;
}

/// Opens documents and applies line selections
pub trait DocumentSink {
    /// Open `path`; returns false if it could not be opened
    fn open(&self, path: &Path) -> bool;

    /// Select 1-based `line..=line_end` in the view last opened
    ///
    /// Returns false while the view is not ready yet.
    fn select_lines(&self, line: u32, line_end: u32) -> bool;
}

/// Host-provided file annotation (blame) view
pub trait Annotator {
    /// Show annotations for `path` at `commit_sha`, optionally focusing a range
    fn annotate(
        &self,
        repository_root: &Path,
        path: &str,
        commit_sha: &str,
        lines: Option<(u32, u32)>,
    ) -> bool;
}

/// Result of probing the host for an optional capability
pub enum Capability<T> {
    Available(T),
    Unavailable,
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Capability::Available(value),
            None => Capability::Unavailable,
        }
    }
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    /// The implementation, when the host provides one
    pub fn available(&self) -> Option<&T> {
        match self {
            Capability::Available(value) => Some(value),
            Capability::Unavailable => None,
        }
    }
}

impl<T> Default for Capability<T> {
    fn default() -> Self {
        Capability::Unavailable
    }
}

impl<T> std::fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Available(_) => write!(f, "Available"),
            Capability::Unavailable => write!(f, "Unavailable"),
        }
    }
}
