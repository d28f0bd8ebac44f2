//! Configuration for ghcontext

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding the configuration file, relative to the repository root
pub const CONFIG_DIR: &str = ".ghcontext";

/// Settings shared by extraction, resolution and navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote whose tracking branches are probed when resolving
    #[serde(default = "default_remote_name")]
    pub remote_name: String,

    /// Host used for repository URLs when a context has none
    #[serde(default = "default_host")]
    pub default_host: String,

    /// Native window classes of browsers whose titles are scanned
    #[serde(default = "default_browser_window_classes")]
    pub browser_window_classes: Vec<String>,

    /// Line selection behaviour after opening a file
    #[serde(default)]
    pub selection: SelectionConfig,
}

/// Retry policy for applying a line selection to a freshly opened view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// How many times to retry while the view is not ready
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_host() -> String {
    "github.com".to_string()
}

fn default_browser_window_classes() -> Vec<String> {
    vec![
        "Chrome_WidgetWin_1".to_string(),
        "MozillaWindowClass".to_string(),
    ]
}

fn default_retries() -> u32 {
    10
}

fn default_retry_delay_ms() -> u64 {
    100
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_name: default_remote_name(),
            default_host: default_host(),
            browser_window_classes: default_browser_window_classes(),
            selection: SelectionConfig::default(),
        }
    }
}

impl Config {
    /// Path of the configuration file under `root`
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join("config.toml")
    }

    /// Load configuration from `root` or return defaults
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = Self::path(root);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("failed to parse {}: {}", config_path.display(), e))
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration under `root`
    pub fn save(&self, root: &Path) -> Result<()> {
        std::fs::create_dir_all(root.join(CONFIG_DIR))?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize configuration: {}", e)))?;

        std::fs::write(Self::path(root), content)?;

        Ok(())
    }
}
