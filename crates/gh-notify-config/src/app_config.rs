//! Application configuration
//!
//! Configuration loaded from .gh-notify.toml. Every value can be
//! overridden on the command line.

use serde::Deserialize;

/// Application configuration loaded from .gh-notify.toml
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// GitHub Enterprise host (unset = github.com)
    #[serde(default)]
    pub host: Option<String>,

    /// Repository filter applied when `--repo` is not given (e.g. "org/reponame")
    #[serde(default)]
    pub repository: Option<String>,

    /// Subject type filter applied when `--type` is not given
    #[serde(default = "default_subject_type")]
    pub subject_type: String,

    /// Width of the title column in `list` output
    #[serde(default = "default_title_width")]
    pub title_width: usize,

    /// Page size when listing notifications
    #[serde(default = "default_per_page")]
    pub per_page: u8,

    /// Follow pagination to the last page (false = first page only)
    #[serde(default = "default_all_pages")]
    pub all_pages: bool,
}

fn default_subject_type() -> String {
    "PullRequest".to_string()
}

fn default_title_width() -> usize {
    80
}

fn default_per_page() -> u8 {
    50 // maximum the notifications endpoint accepts
}

fn default_all_pages() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: None,
            repository: None,
            subject_type: default_subject_type(),
            title_width: default_title_width(),
            per_page: default_per_page(),
            all_pages: default_all_pages(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        match crate::load_config_file() {
            Some(content) => Self::parse(&content),
            None => {
                log::debug!("Using default app config");
                Self::default()
            }
        }
    }

    /// Parse config file content, falling back to defaults on errors
    pub fn parse(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => {
                log::info!("Loaded app config from file");
                config
            }
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                Self::default()
            }
        }
    }
}
