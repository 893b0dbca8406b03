use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the blog to mirror, e.g. `https://example.tumblr.com`.
    pub blog_url: String,
    /// Root directory of the flat-file archive.
    pub archive_dir: PathBuf,
    /// Posts requested per page (the v1 read API caps this at 50).
    pub page_size: usize,
    /// Politeness delay between page fetches.
    pub page_delay: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// When set, re-run the sync on this interval instead of exiting.
    pub watch_interval: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            blog_url: required_env("BLOG_URL")?,
            archive_dir: PathBuf::from(env_or_default("ARCHIVE_DIR", "./archive")),
            page_size: parse_env_usize("PAGE_SIZE", 20)?,
            page_delay: Duration::from_secs(parse_env_u64("PAGE_DELAY_SECS", 2)?),
            request_timeout: Duration::from_secs(parse_env_u64("REQUEST_TIMEOUT_SECS", 30)?),
            watch_interval: match parse_env_u64("WATCH_INTERVAL_SECS", 0)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blog_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "BLOG_URL".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if !self.blog_url.starts_with("http://") && !self.blog_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                name: "BLOG_URL".to_string(),
                message: "must start with http:// or https://".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "PAGE_SIZE".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.page_size > 50 {
            return Err(ConfigError::InvalidValue {
                name: "PAGE_SIZE".to_string(),
                message: "the read API serves at most 50 posts per page".to_string(),
            });
        }
        Ok(())
    }

    /// A baseline configuration for tests; override fields with struct update syntax.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            blog_url: "http://127.0.0.1:0".to_string(),
            archive_dir: PathBuf::from("./archive"),
            page_size: 20,
            page_delay: Duration::ZERO,
            request_timeout: Duration::from_secs(5),
            watch_interval: None,
        }
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}
