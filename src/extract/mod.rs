//! Pattern extraction
//!
//! This module turns semi-structured text into a `GitHubContext`:
//! - Browser URLs (`url`)
//! - Browser window titles (`title`)
//!
//! Neither pipeline fails on malformed input; no match is `None`.

pub mod title;
pub mod url;

pub use self::title::{find_context_from_window_title, match_window_title, TitleShape};
pub use self::url::find_context_from_url;

/// Repository owner: a login or organization name
pub(crate) const OWNER: &str = r"(?P<owner>[A-Za-z0-9][A-Za-z0-9_-]*)";

/// Repository name: word characters, dots and hyphens
pub(crate) const REPO: &str = r"(?P<repo>[\w.-]+)";

/// Same as `REPO` without a capture, for titles that repeat the name
pub(crate) const REPO_NAME: &str = r"[\w.-]+";

/// One slash-free component of a git ref name
const REF_SEGMENT: &str = r"[^./ ~^:?*\[\\][^/ ~^:?*\[\\]*";

/// Branch name, which may span several `/`-separated segments
pub(crate) fn branch_pattern() -> String {
    format!("(?P<branch>{REF_SEGMENT}(?:/{REF_SEGMENT})*)")
}
