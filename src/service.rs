//! Context service
//!
//! Entry point for hosts: find a context in a URL, a window title, the
//! clipboard or the open browser windows, then resolve and navigate to it.

use crate::context::GitHubContext;
use crate::error::Result;
use crate::extract;
use crate::ports::{Annotator, Capability, ClipboardSource, DocumentSink, WindowEnumerator};
use crate::repo::{BlobLocation, Config, Repository};
use std::path::Path;
use std::time::Duration;

/// Finds, resolves and opens GitHub contexts
pub struct ContextService {
    config: Config,
    /// Resolved once when the service is built
    annotator: Capability<Box<dyn Annotator>>,
}

impl ContextService {
    /// Create a service without an annotation capability
    pub fn new(config: Config) -> Self {
        Self {
            config,
            annotator: Capability::Unavailable,
        }
    }

    /// Set the annotation capability negotiated with the host
    pub fn with_annotator(mut self, annotator: Capability<Box<dyn Annotator>>) -> Self {
        self.annotator = annotator;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn find_context_from_url(&self, url: &str) -> Option<GitHubContext> {
        extract::find_context_from_url(url)
    }

    pub fn find_context_from_window_title(&self, title: &str) -> Option<GitHubContext> {
        extract::find_context_from_window_title(title)
    }

    /// Read a GitHub URL from the clipboard
    pub fn find_context_from_clipboard(
        &self,
        clipboard: &dyn ClipboardSource,
    ) -> Option<GitHubContext> {
        let text = clipboard.text()?;
        if text.trim().is_empty() {
            return None;
        }
        extract::find_context_from_url(&text)
    }

    /// First context found among the titles of known browser windows
    pub fn find_context_from_browser(
        &self,
        windows: &dyn WindowEnumerator,
    ) -> Option<GitHubContext> {
        self.config
            .browser_window_classes
            .iter()
            .flat_map(|window_class| windows.window_titles(window_class))
            .find_map(|title| extract::find_context_from_window_title(&title))
    }

    /// Root URL of the context's repository
    pub fn to_repository_url(&self, context: &GitHubContext) -> Option<String> {
        context.repository_url(&self.config.default_host)
    }

    /// Resolve a blob context against the repository at `repository_dir`
    pub fn resolve_blob(
        &self,
        repository_dir: &Path,
        context: &GitHubContext,
    ) -> Result<BlobLocation> {
        let repo = Repository::open(repository_dir)?;
        repo.resolve_blob(context, &self.config.remote_name)
    }

    pub fn has_changes_in_working_directory(
        &self,
        repository_dir: &Path,
        commitish: &str,
        path: &str,
    ) -> Result<bool> {
        let repo = Repository::open(repository_dir)?;
        repo.has_changes_in_working_directory(commitish, path)
    }

    /// Open the context's blob from the working directory
    ///
    /// Returns `Ok(false)` when the blob path did not resolve or the sink
    /// refused to open the file.
    pub fn try_open_file(
        &self,
        repository_dir: &Path,
        context: &GitHubContext,
        sink: &dyn DocumentSink,
    ) -> Result<bool> {
        let repo = Repository::open(repository_dir)?;
        let location = repo.resolve_blob(context, &self.config.remote_name)?;

        let Some(path) = location.path.as_deref() else {
            tracing::debug!(?location, "nothing to open");
            return Ok(false);
        };

        let full_path = repo.root().join(path);
        if !sink.open(&full_path) {
            tracing::warn!(path = %full_path.display(), "could not open file");
            return Ok(false);
        }

        if let Some((line, line_end)) = context.line_range() {
            self.apply_selection(sink, line, line_end);
        }

        Ok(true)
    }

    /// Retry the selection until the freshly opened view accepts it
    fn apply_selection(&self, sink: &dyn DocumentSink, line: u32, line_end: u32) -> bool {
        let retries = self.config.selection.retries;
        let delay = Duration::from_millis(self.config.selection.retry_delay_ms);

        for attempt in 0..=retries {
            if sink.select_lines(line, line_end) {
                return true;
            }
            if attempt < retries {
                std::thread::sleep(delay);
            }
        }

        tracing::warn!(line, line_end, retries, "view never became ready for selection");
        false
    }

    /// Show annotations for the context's blob at the resolved commit
    ///
    /// Returns `Ok(false)` when the host has no annotation capability or the
    /// blob did not resolve.
    pub fn try_annotate_file(
        &self,
        repository_dir: &Path,
        context: &GitHubContext,
    ) -> Result<bool> {
        let Some(annotator) = self.annotator.available() else {
            tracing::warn!("annotation is unavailable in this host");
            return Ok(false);
        };

        let repo = Repository::open(repository_dir)?;
        let location = repo.resolve_blob(context, &self.config.remote_name)?;

        let (Some(path), Some(commit_sha)) = (location.path.as_deref(), location.commit_sha.as_deref())
        else {
            return Ok(false);
        };

        Ok(annotator.annotate(repo.root(), path, commit_sha, context.line_range()))
    }
}

impl Default for ContextService {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ports::fakes::*;
    use crate::repo::fixtures::*;

    fn quick_service() -> ContextService {
        let mut config = Config::default();
        config.selection.retries = 3;
        config.selection.retry_delay_ms = 0;
        ContextService::new(config)
    }

    #[test]
    fn test_find_context_from_clipboard() {
        let service = ContextService::default();

        let clipboard = FakeClipboard(Some(
            "https://github.com/octocat/Hello-World/blob/main/README.md".to_string(),
        ));
        let context = service.find_context_from_clipboard(&clipboard).unwrap();
        assert_eq!(context.blob_name(), Some("README.md"));

        assert!(service.find_context_from_clipboard(&FakeClipboard(None)).is_none());
        assert!(service
            .find_context_from_clipboard(&FakeClipboard(Some("  ".to_string())))
            .is_none());
    }

    #[test]
    fn test_find_context_from_browser() {
        let service = ContextService::default();
        let windows = FakeWindows::default()
            .with("Notepad", &["octocat/ignored - Notepad"])
            .with(
                "Chrome_WidgetWin_1",
                &["New Tab - Google Chrome", "Branches · octocat/Spoon-Knife - Google Chrome"],
            )
            .with(
                "MozillaWindowClass",
                &["octocat/Hello-World - Mozilla Firefox"],
            );

        let context = service.find_context_from_browser(&windows).unwrap();
        assert_eq!(context.repository_name(), Some("Spoon-Knife"));

        assert!(service
            .find_context_from_browser(&FakeWindows::default())
            .is_none());
    }

    #[test]
    fn test_to_repository_url() {
        let service = ContextService::default();
        let context = service
            .find_context_from_window_title("octocat/Hello-World - Google Chrome")
            .unwrap();
        assert_eq!(
            service.to_repository_url(&context).as_deref(),
            Some("https://github.com/octocat/Hello-World")
        );
    }

    #[test]
    fn test_resolve_blob_rejects_empty_path() {
        let service = ContextService::default();
        let context = GitHubContext::new()
            .with_treeish_path("main")
            .with_blob_name("x.txt");

        assert!(matches!(
            service.resolve_blob(Path::new(""), &context),
            Err(Error::EmptyRepositoryPath)
        ));
    }

    #[test]
    fn test_try_open_file_with_selection() {
        let (dir, git) = init_repo();
        let oid = commit_files(&git, &[("src/main.rs", "fn main() {}\n")]);
        create_ref(&git, "refs/remotes/origin/main", oid);

        let service = quick_service();
        let context = service
            .find_context_from_url("https://github.com/o/r/blob/main/src/main.rs#L3-L4")
            .unwrap();

        let sink = RecordingSink::default();
        sink.not_ready.set(2);

        assert!(service.try_open_file(dir.path(), &context, &sink).unwrap());
        let opened = sink.opened.borrow();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].ends_with("src/main.rs"));
        assert_eq!(*sink.selections.borrow(), vec![(3, 4)]);
        assert_eq!(sink.attempts.get(), 3);
    }

    #[test]
    fn test_try_open_file_gives_up_on_selection() {
        let (dir, git) = init_repo();
        let oid = commit_files(&git, &[("a.txt", "a\n")]);
        create_ref(&git, "refs/remotes/origin/main", oid);

        let service = quick_service();
        let context = GitHubContext::new()
            .with_treeish_path("main")
            .with_blob_name("a.txt")
            .with_lines(1, None);

        let sink = RecordingSink::default();
        sink.not_ready.set(100);

        assert!(service.try_open_file(dir.path(), &context, &sink).unwrap());
        assert_eq!(sink.attempts.get(), 4);
        assert!(sink.selections.borrow().is_empty());
    }

    #[test]
    fn test_try_open_file_unresolved() {
        let (dir, git) = init_repo();
        let oid = commit_files(&git, &[("a.txt", "a\n")]);
        create_ref(&git, "refs/remotes/origin/main", oid);

        let service = quick_service();
        let sink = RecordingSink::default();

        let missing = GitHubContext::new()
            .with_treeish_path("main")
            .with_blob_name("b.txt");
        assert!(!service.try_open_file(dir.path(), &missing, &sink).unwrap());

        let tree = GitHubContext::new().with_treeish_path("main");
        assert!(!service.try_open_file(dir.path(), &tree, &sink).unwrap());

        assert!(sink.opened.borrow().is_empty());
    }

    #[test]
    fn test_try_annotate_file() {
        let (dir, git) = init_repo();
        let oid = commit_files(&git, &[("lib.rs", "\n")]);
        create_ref(&git, "refs/tags/v1", oid);

        let context = GitHubContext::new()
            .with_treeish_path("v1")
            .with_blob_name("lib.rs")
            .with_lines(2, Some(5));

        let unavailable = ContextService::default();
        assert!(!unavailable.try_annotate_file(dir.path(), &context).unwrap());

        let annotator: Box<dyn Annotator> = Box::new(RecordingAnnotator::default());
        let service = ContextService::default().with_annotator(Capability::Available(annotator));
        assert!(service.try_annotate_file(dir.path(), &context).unwrap());

        let missing = GitHubContext::new()
            .with_treeish_path("v2")
            .with_blob_name("lib.rs");
        assert!(!service.try_annotate_file(dir.path(), &missing).unwrap());
    }

    #[test]
    fn test_has_changes_through_service() {
        let (dir, git) = init_repo();
        let oid = commit_files(&git, &[("a.txt", "a\n")]);
        let service = ContextService::default();

        assert!(!service
            .has_changes_in_working_directory(dir.path(), &oid.to_string(), "a.txt")
            .unwrap());

        std::fs::write(dir.path().join("a.txt"), "changed\n").unwrap();
        assert!(service
            .has_changes_in_working_directory(dir.path(), &oid.to_string(), "a.txt")
            .unwrap());
    }
}
