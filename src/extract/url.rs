//! Context extraction from GitHub URLs
//!
//! Recognized shapes under a repository root:
//! - `blob/<treeish>/<blobName>` (treeish may contain `/`)
//! - `pull/<number>`
//! - a trailing `#L<line>` or `#L<line>-L<lineEnd>` fragment

use super::{OWNER, REPO};
use crate::context::{GitHubContext, LinkType};
use ::url::Url;
use regex::Regex;
use std::sync::LazyLock;

static OWNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{OWNER}$")).expect("owner regex should compile"));

static REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{REPO}$")).expect("repo regex should compile"));

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#L(?P<line>[0-9]+)(?:-L(?P<line_end>[0-9]+))?$")
        .expect("line fragment regex should compile")
});

// Greedy treeish: the last `/` separates treeish from blob name.
static BLOB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^blob/(?P<treeish>[^/]+(?:/[^/]+)*)/(?P<blob>[^/]+)$")
        .expect("blob path regex should compile")
});

/// Extract a context from a GitHub URL
///
/// Returns `None` for anything that is not an `http(s)://host/owner/repo...`
/// URL. A URL naming only the repository root yields a context with just the
/// host and repository identity.
pub fn find_context_from_url(input: &str) -> Option<GitHubContext> {
    let input = input.trim();
    let parsed = Url::parse(input).ok()?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let host = parsed.host_str()?;
    let mut segments = parsed.path_segments()?;
    let owner = segments.next().filter(|s| OWNER_RE.is_match(s))?;
    let repo_segment = segments.next()?;
    let repository_name = repo_segment.strip_suffix(".git").unwrap_or(repo_segment);
    if !REPO_RE.is_match(repository_name) {
        return None;
    }

    let mut context = GitHubContext::new()
        .with_host(host)
        .with_repository(owner, repository_name)
        .with_url(input);

    let repository_prefix = format!("{}/", context.repository_url(host)?);
    let rest = match strip_prefix_ignore_case(input, &repository_prefix) {
        Some(rest) => rest,
        None => return Some(context),
    };

    if let Some(caps) = LINE_RE.captures(input) {
        if let Some(line) = caps.name("line").and_then(|m| m.as_str().parse().ok()) {
            let line_end = caps.name("line_end").and_then(|m| m.as_str().parse().ok());
            context = context.with_lines(line, line_end);
        }
    }

    if let Some(number) = strip_prefix_ignore_case(rest, "pull/").and_then(leading_number) {
        context = context.with_pull_request(number);
    }

    let path = rest.split(['#', '?']).next().unwrap_or_default();
    if let Some(caps) = BLOB_RE.captures(path) {
        return Some(
            context
                .with_treeish_path(&caps["treeish"])
                .with_blob_name(&caps["blob"])
                .with_link_type(LinkType::Blob),
        );
    }

    Some(context)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.as_bytes().get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix.as_bytes()) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

/// Parse a path segment consisting only of digits
fn leading_number(s: &str) -> Option<u64> {
    let end = s.find(['/', '#', '?']).unwrap_or(s.len());
    let digits = &s[..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
