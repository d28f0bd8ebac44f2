//! Command implementations

use super::OutputFormat;
use crate::context::GitHubContext;
use crate::extract::match_window_title;
use crate::ports::DocumentSink;
use crate::repo::{BlobLocation, Config};
use crate::service::ContextService;
use anyhow::{Context, Result};
use std::path::Path;

/// Build a service from the configuration found under `path`
pub fn load_service(path: &Path, remote: Option<&str>) -> Result<ContextService> {
    let mut config = Config::load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {:?}", path))?;

    if let Some(remote) = remote {
        config.remote_name = remote.to_string();
    }

    Ok(ContextService::new(config))
}

/// Extract a context from a URL
pub fn url(service: &ContextService, input: &str, format: OutputFormat) -> Result<()> {
    let context = service.find_context_from_url(input);
    print_context(service, context.as_ref(), format)
}

/// Extract a context from a window title
pub fn title(service: &ContextService, input: &str, format: OutputFormat) -> Result<()> {
    let matched = match_window_title(input);
    if let (Some((shape, _)), OutputFormat::Text) = (&matched, format) {
        println!("Page: {}", shape);
    }
    print_context(service, matched.as_ref().map(|(_, context)| context), format)
}

/// Extract and resolve a blob reference
pub fn resolve(
    path: &Path,
    service: &ContextService,
    input: &str,
    is_title: bool,
    format: OutputFormat,
) -> Result<BlobLocation> {
    let context = if is_title {
        service.find_context_from_window_title(input)
    } else {
        service.find_context_from_url(input)
    }
    .ok_or_else(|| anyhow::anyhow!("No GitHub context found in: {}", input))?;

    let location = service
        .resolve_blob(path, &context)
        .with_context(|| format!("Failed to resolve against repository at {:?}", path))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&location)?),
        OutputFormat::Text => {
            if !location.is_resolved() {
                println!("Not resolved");
            } else {
                println!("Commit-ish: {}", location.commitish.as_deref().unwrap_or("-"));
                println!("Path: {}", location.path.as_deref().unwrap_or("(not found)"));
                println!("Commit: {}", location.commit_sha.as_deref().unwrap_or("-"));
            }
        }
    }

    Ok(location)
}

/// Prints navigation requests instead of driving an editor
struct StdoutSink;

impl DocumentSink for StdoutSink {
    fn open(&self, path: &Path) -> bool {
        println!("{}", path.display());
        true
    }

    fn select_lines(&self, line: u32, line_end: u32) -> bool {
        if line == line_end {
            println!("Line {}", line);
        } else {
            println!("Lines {}-{}", line, line_end);
        }
        true
    }
}

/// Resolve a blob URL and print the local file
pub fn open(path: &Path, service: &ContextService, input: &str) -> Result<bool> {
    let context = service
        .find_context_from_url(input)
        .ok_or_else(|| anyhow::anyhow!("No GitHub context found in: {}", input))?;

    let opened = service.try_open_file(path, &context, &StdoutSink)?;
    if !opened {
        println!("Nothing to open for {}", input);
    }

    Ok(opened)
}

/// Report whether a file differs from a commit
pub fn changed(
    path: &Path,
    service: &ContextService,
    commitish: &str,
    file: &str,
    format: OutputFormat,
) -> Result<bool> {
    let changed = service
        .has_changes_in_working_directory(path, commitish, file)
        .with_context(|| format!("Failed to compare {} against {}", file, commitish))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "changed": changed })),
        OutputFormat::Text => {
            if changed {
                println!("{} has changes relative to {}", file, commitish);
            } else {
                println!("{} is unchanged relative to {}", file, commitish);
            }
        }
    }

    Ok(changed)
}

/// Show or reset the configuration
pub fn config(path: &Path, service: &ContextService, show: bool, reset: bool) -> Result<()> {
    if reset {
        Config::default()
            .save(path)
            .with_context(|| format!("Failed to write configuration under {:?}", path))?;
        println!("✓ Configuration reset to defaults");
    }

    if show || !reset {
        let config = service.config();
        println!("ghcontext Configuration");
        println!("=======================\n");
        println!("Remote: {}", config.remote_name);
        println!("Default host: {}", config.default_host);
        println!("Browser window classes:");
        for class in &config.browser_window_classes {
            println!("  - {}", class);
        }
        println!(
            "Selection: {} retries, {}ms apart",
            config.selection.retries, config.selection.retry_delay_ms
        );
    }

    Ok(())
}

/// Print a context in the requested format
pub fn print_context(
    service: &ContextService,
    context: Option<&GitHubContext>,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&context)?);
        return Ok(());
    }

    let Some(context) = context else {
        println!("No GitHub context found.");
        return Ok(());
    };

    let fields = [
        ("Host", context.host().map(str::to_string)),
        ("Owner", context.owner().map(str::to_string)),
        ("Repository", context.repository_name().map(str::to_string)),
        ("Branch", context.branch_name().map(str::to_string)),
        ("Treeish path", context.treeish_path().map(str::to_string)),
        ("Blob", context.blob_name().map(str::to_string)),
        ("Pull request", context.pull_request().map(|n| n.to_string())),
        ("Issue", context.issue().map(|n| n.to_string())),
        ("Line", context.line().map(|n| n.to_string())),
        ("Line end", context.line_end().map(|n| n.to_string())),
        ("Repository URL", service.to_repository_url(context)),
    ];

    for (label, value) in fields {
        if let Some(value) = value {
            println!("{}: {}", label, value);
        }
    }
    println!("Link type: {}", context.link_type());

    Ok(())
}
