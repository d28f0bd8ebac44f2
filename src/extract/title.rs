//! Context extraction from browser window titles
//!
//! GitHub page titles, as shown by the browser chrome, come in a handful of
//! shapes. They are tried in a fixed priority order and the first match wins.

use super::{branch_pattern, OWNER, REPO, REPO_NAME};
use crate::context::GitHubContext;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Decoration the browser appends after the repository name
const TRAILER: &str = r"(?: · GitHub)? - ";

static BLOB_RE: LazyLock<Regex> = LazyLock::new(|| {
    let branch = branch_pattern();
    Regex::new(&format!(
        r"^{REPO_NAME}/(?P<blob>[^/]+) at {branch} · {OWNER}/{REPO}{TRAILER}"
    ))
    .expect("blob title regex should compile")
});

static TREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let branch = branch_pattern();
    Regex::new(&format!(
        r"^{REPO_NAME}/(?P<tree>.+) at {branch} · {OWNER}/{REPO}{TRAILER}"
    ))
    .expect("tree title regex should compile")
});

static REPOSITORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:GitHub - )?{OWNER}/{REPO}(?:: .*)?{TRAILER}"))
        .expect("repository title regex should compile")
});

static BRANCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    let branch = branch_pattern();
    Regex::new(&format!(r"^(?:GitHub - )?{OWNER}/{REPO} at {branch}{TRAILER}"))
        .expect("branch title regex should compile")
});

static BRANCHES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"Branches · {OWNER}/{REPO}{TRAILER}"))
        .expect("branches title regex should compile")
});

static PULL_REQUEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r" · Pull Request #(?P<number>[0-9]+) · {OWNER}/{REPO}{TRAILER}"
    ))
    .expect("pull request title regex should compile")
});

static ISSUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r" · Issue #(?P<number>[0-9]+) · {OWNER}/{REPO}{TRAILER}"))
        .expect("issue title regex should compile")
});

/// The GitHub page a window title was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleShape {
    /// `<repo>/<blob> at <branch> · <owner>/<repo>`
    Blob,
    /// `<repo>/<path> at <branch> · <owner>/<repo>`
    Tree,
    /// `[GitHub - ]<owner>/<repo>[: <description>]`
    Repository,
    /// `<owner>/<repo> at <branch>`
    Branch,
    /// `Branches · <owner>/<repo>`
    Branches,
    /// `<title> · Pull Request #<n> · <owner>/<repo>`
    PullRequest,
    /// `<title> · Issue #<n> · <owner>/<repo>`
    Issue,
}

impl TitleShape {
    /// Match priority, highest first
    pub const PRIORITY: [TitleShape; 7] = [
        TitleShape::Blob,
        TitleShape::Tree,
        TitleShape::Repository,
        TitleShape::Branch,
        TitleShape::Branches,
        TitleShape::PullRequest,
        TitleShape::Issue,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            TitleShape::Blob => &*BLOB_RE,
            TitleShape::Tree => &*TREE_RE,
            TitleShape::Repository => &*REPOSITORY_RE,
            TitleShape::Branch => &*BRANCH_RE,
            TitleShape::Branches => &*BRANCHES_RE,
            TitleShape::PullRequest => &*PULL_REQUEST_RE,
            TitleShape::Issue => &*ISSUE_RE,
        }
    }

    /// Build the context for a successful match
    ///
    /// Returns `None` only when a numeric capture overflows, in which case the
    /// title is not treated as this shape.
    fn build(self, caps: &Captures<'_>) -> Option<GitHubContext> {
        let context = GitHubContext::new().with_repository(&caps["owner"], &caps["repo"]);

        let context = match self {
            TitleShape::Blob => context
                .with_branch_name(&caps["branch"])
                .with_blob_name(&caps["blob"]),
            TitleShape::Tree => {
                let branch = &caps["branch"];
                context
                    .with_branch_name(branch)
                    .with_treeish_path(&format!("{}/{}", branch, &caps["tree"]))
            }
            TitleShape::Branch => context.with_branch_name(&caps["branch"]),
            TitleShape::Repository | TitleShape::Branches => context,
            TitleShape::PullRequest => context.with_pull_request(caps["number"].parse().ok()?),
            TitleShape::Issue => context.with_issue(caps["number"].parse().ok()?),
        };

        Some(context)
    }
}

impl std::fmt::Display for TitleShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TitleShape::Blob => write!(f, "blob"),
            TitleShape::Tree => write!(f, "tree"),
            TitleShape::Repository => write!(f, "repository"),
            TitleShape::Branch => write!(f, "branch"),
            TitleShape::Branches => write!(f, "branches"),
            TitleShape::PullRequest => write!(f, "pull request"),
            TitleShape::Issue => write!(f, "issue"),
        }
    }
}

/// Match a window title against every shape in priority order
pub fn match_window_title(title: &str) -> Option<(TitleShape, GitHubContext)> {
    TitleShape::PRIORITY.iter().find_map(|&shape| {
        let caps = shape.regex().captures(title)?;
        shape.build(&caps).map(|context| (shape, context))
    })
}

/// Extract a context from a browser window title
pub fn find_context_from_window_title(title: &str) -> Option<GitHubContext> {
    match_window_title(title).map(|(_, context)| context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_of(title: &str) -> Option<TitleShape> {
        match_window_title(title).map(|(shape, _)| shape)
    }

    #[test]
    fn test_repository_title() {
        let title = "GitHub - octocat/Hello-World: My first repo - Google Chrome";
        let (shape, context) = match_window_title(title).unwrap();

        assert_eq!(shape, TitleShape::Repository);
        assert_eq!(context.owner(), Some("octocat"));
        assert_eq!(context.repository_name(), Some("Hello-World"));
        assert_eq!(context.branch_name(), None);

        assert_eq!(
            shape_of("octocat/Hello-World - Mozilla Firefox"),
            Some(TitleShape::Repository)
        );
    }

    #[test]
    fn test_blob_title() {
        let title =
            "Hello-World/README.md at feature/docs · octocat/Hello-World · GitHub - Google Chrome";
        let (shape, context) = match_window_title(title).unwrap();

        assert_eq!(shape, TitleShape::Blob);
        assert_eq!(context.owner(), Some("octocat"));
        assert_eq!(context.repository_name(), Some("Hello-World"));
        assert_eq!(context.branch_name(), Some("feature/docs"));
        assert_eq!(context.blob_name(), Some("README.md"));
        assert_eq!(context.treeish_path(), None);
    }

    #[test]
    fn test_tree_title() {
        let title = "Hello-World/src/app at main · octocat/Hello-World · GitHub - Google Chrome";
        let (shape, context) = match_window_title(title).unwrap();

        assert_eq!(shape, TitleShape::Tree);
        assert_eq!(context.branch_name(), Some("main"));
        assert_eq!(context.treeish_path(), Some("main/src/app"));
        assert_eq!(context.blob_name(), None);
        assert!(context.is_tree());

        let title = "Hello-World/src/app at main · octocat/Hello-World - Mozilla Firefox";
        let (shape, context) = match_window_title(title).unwrap();
        assert_eq!(shape, TitleShape::Tree);
        assert_eq!(context.treeish_path(), Some("main/src/app"));
    }

    #[test]
    fn test_names_with_spaces() {
        let title =
            "Hello-World/My Notes.md at main · octocat/Hello-World · GitHub - Google Chrome";
        let (shape, context) = match_window_title(title).unwrap();
        assert_eq!(shape, TitleShape::Blob);
        assert_eq!(context.blob_name(), Some("My Notes.md"));
        assert_eq!(context.branch_name(), Some("main"));

        let title =
            "Hello-World/docs/Meeting Notes at feature/docs · octocat/Hello-World - Google Chrome";
        let (shape, context) = match_window_title(title).unwrap();
        assert_eq!(shape, TitleShape::Tree);
        assert_eq!(context.branch_name(), Some("feature/docs"));
        assert_eq!(context.treeish_path(), Some("feature/docs/docs/Meeting Notes"));
    }

    #[test]
    fn test_branch_title() {
        let title = "octocat/Hello-World at release/v2 · GitHub - Mozilla Firefox";
        let (shape, context) = match_window_title(title).unwrap();

        assert_eq!(shape, TitleShape::Branch);
        assert_eq!(context.owner(), Some("octocat"));
        assert_eq!(context.branch_name(), Some("release/v2"));

        let title = "GitHub - octocat/Hello-World at main - Google Chrome";
        let (shape, context) = match_window_title(title).unwrap();
        assert_eq!(shape, TitleShape::Branch);
        assert_eq!(context.repository_name(), Some("Hello-World"));
        assert_eq!(context.branch_name(), Some("main"));
    }

    #[test]
    fn test_branches_title() {
        let title = "Branches · octocat/Hello-World · GitHub - Google Chrome";
        let (shape, context) = match_window_title(title).unwrap();

        assert_eq!(shape, TitleShape::Branches);
        assert_eq!(context.repository_name(), Some("Hello-World"));
    }

    #[test]
    fn test_pull_request_title() {
        let title = " · Pull Request #7 · octocat/Hello-World · GitHub - Google Chrome";
        let (shape, context) = match_window_title(title).unwrap();

        assert_eq!(shape, TitleShape::PullRequest);
        assert_eq!(context.pull_request(), Some(7));
        assert_eq!(context.owner(), Some("octocat"));

        let title = "Fix the parser · Pull Request #1234 · octocat/Hello-World - Google Chrome";
        let context = find_context_from_window_title(title).unwrap();
        assert_eq!(context.pull_request(), Some(1234));
    }

    #[test]
    fn test_issue_title() {
        let title = "Crash on start · Issue #99 · octocat/Hello-World · GitHub - Google Chrome";
        let (shape, context) = match_window_title(title).unwrap();

        assert_eq!(shape, TitleShape::Issue);
        assert_eq!(context.issue(), Some(99));
        assert_eq!(context.pull_request(), None);
    }

    #[test]
    fn test_overflowing_number_is_not_a_match() {
        let title = "Huge · Issue #99999999999999999999999 · octocat/Hello-World - Google Chrome";
        assert!(find_context_from_window_title(title).is_none());
    }

    #[test]
    fn test_unrelated_titles() {
        assert!(find_context_from_window_title("").is_none());
        assert!(find_context_from_window_title("New Tab - Google Chrome").is_none());
        assert!(find_context_from_window_title("octocat/Hello-World").is_none());
    }
}
