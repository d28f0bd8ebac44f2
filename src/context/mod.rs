//! GitHub context model
//!
//! A `GitHubContext` is the structured result of reading a URL or a browser
//! window title. It is built once by the extractors and then only read.

use serde::{Deserialize, Serialize};

/// Kind of link a context was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkType {
    /// No specific link shape was recognized
    #[default]
    Unknown,
    /// A `blob/<treeish>/<path>` file link
    Blob,
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkType::Unknown => write!(f, "unknown"),
            LinkType::Blob => write!(f, "blob"),
        }
    }
}

/// Everything known about a GitHub reference
///
/// Deserialization goes through the same rules as the builder: owner and
/// repository name come as a pair and the line range is kept ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContextFields")]
pub struct GitHubContext {
    host: Option<String>,
    owner: Option<String>,
    repository_name: Option<String>,
    branch_name: Option<String>,
    /// Unresolved `<commit-ish>/<dir>` string
    treeish_path: Option<String>,
    blob_name: Option<String>,
    pull_request: Option<u64>,
    issue: Option<u64>,
    line: Option<u32>,
    line_end: Option<u32>,
    link_type: LinkType,
    url: Option<String>,
}

/// Serialized form of a context before validation
#[derive(Deserialize)]
struct ContextFields {
    host: Option<String>,
    owner: Option<String>,
    repository_name: Option<String>,
    branch_name: Option<String>,
    treeish_path: Option<String>,
    blob_name: Option<String>,
    pull_request: Option<u64>,
    issue: Option<u64>,
    line: Option<u32>,
    line_end: Option<u32>,
    #[serde(default)]
    link_type: LinkType,
    url: Option<String>,
}

impl TryFrom<ContextFields> for GitHubContext {
    type Error = String;

    fn try_from(fields: ContextFields) -> Result<Self, Self::Error> {
        let context = GitHubContext {
            host: fields.host,
            branch_name: fields.branch_name,
            treeish_path: fields.treeish_path,
            blob_name: fields.blob_name,
            pull_request: fields.pull_request,
            issue: fields.issue,
            link_type: fields.link_type,
            url: fields.url,
            ..Default::default()
        };

        let context = match (fields.owner, fields.repository_name) {
            (Some(owner), Some(repository_name)) => {
                context.with_repository(&owner, &repository_name)
            }
            (None, None) => context,
            _ => return Err("owner and repository_name must be set together".to_string()),
        };

        match (fields.line, fields.line_end) {
            (Some(line), line_end) => Ok(context.with_lines(line, line_end)),
            (None, None) => Ok(context),
            (None, Some(_)) => Err("line_end requires line".to_string()),
        }
    }
}

impl GitHubContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set owner and repository name together
    pub fn with_repository(mut self, owner: &str, repository_name: &str) -> Self {
        self.owner = Some(owner.to_string());
        self.repository_name = Some(repository_name.to_string());
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    pub fn with_branch_name(mut self, branch_name: &str) -> Self {
        self.branch_name = Some(branch_name.to_string());
        self
    }

    pub fn with_treeish_path(mut self, treeish_path: &str) -> Self {
        self.treeish_path = Some(treeish_path.to_string());
        self
    }

    pub fn with_blob_name(mut self, blob_name: &str) -> Self {
        self.blob_name = Some(blob_name.to_string());
        self
    }

    pub fn with_pull_request(mut self, number: u64) -> Self {
        self.pull_request = Some(number);
        self
    }

    pub fn with_issue(mut self, number: u64) -> Self {
        self.issue = Some(number);
        self
    }

    /// Set a 1-based line range. A reversed range is stored in ascending order.
    pub fn with_lines(mut self, line: u32, line_end: Option<u32>) -> Self {
        match line_end {
            Some(end) if end < line => {
                self.line = Some(end);
                self.line_end = Some(line);
            }
            _ => {
                self.line = Some(line);
                self.line_end = line_end;
            }
        }
        self
    }

    pub fn with_link_type(mut self, link_type: LinkType) -> Self {
        self.link_type = link_type;
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn repository_name(&self) -> Option<&str> {
        self.repository_name.as_deref()
    }

    pub fn branch_name(&self) -> Option<&str> {
        self.branch_name.as_deref()
    }

    pub fn treeish_path(&self) -> Option<&str> {
        self.treeish_path.as_deref()
    }

    pub fn blob_name(&self) -> Option<&str> {
        self.blob_name.as_deref()
    }

    pub fn pull_request(&self) -> Option<u64> {
        self.pull_request
    }

    pub fn issue(&self) -> Option<u64> {
        self.issue
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn line_end(&self) -> Option<u32> {
        self.line_end
    }

    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The selected line range, with the end defaulting to the start line
    pub fn line_range(&self) -> Option<(u32, u32)> {
        self.line.map(|line| (line, self.line_end.unwrap_or(line)))
    }

    /// True when this context points at a directory rather than a file
    pub fn is_tree(&self) -> bool {
        self.treeish_path.is_some() && self.blob_name.is_none()
    }

    /// Canonical root URL of the repository (`https://host/owner/repo`)
    ///
    /// When the context came from a URL, its scheme and host are reused;
    /// otherwise `default_host` is used.
    pub fn repository_url(&self, default_host: &str) -> Option<String> {
        let owner = self.owner.as_deref()?;
        let repository_name = self.repository_name.as_deref()?;

        let base = self
            .url
            .as_deref()
            .and_then(|u| url::Url::parse(u).ok())
            .and_then(|u| {
                let host = u.host_str()?;
                Some(match u.port() {
                    Some(port) => format!("{}://{}:{}", u.scheme(), host, port),
                    None => format!("{}://{}", u.scheme(), host),
                })
            })
            .unwrap_or_else(|| {
                format!("https://{}", self.host.as_deref().unwrap_or(default_host))
            });

        Some(format!("{}/{}/{}", base, owner, repository_name))
    }
}
