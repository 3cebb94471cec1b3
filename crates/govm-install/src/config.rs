use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use govm_fetch::RetryPolicy;
use govm_version::normalize;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Installer settings.
///
/// Layered as defaults, then an optional TOML file, then `GOVM_*`
/// environment variables (`GOVM_RETRY_COUNT=5`, `GOVM_TIMEOUT=30s`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Release catalog endpoint returning the JSON release list.
    pub api_url:               String,
    /// Archive URL with a `{filename}` placeholder.
    pub download_url_template: String,
    #[serde(with = "humantime_serde")]
    pub cache_expiry:          Duration,
    /// Deadline for each download attempt, body included.
    #[serde(with = "humantime_serde")]
    pub timeout:               Duration,
    /// Total download attempts on transport failure.
    pub retry_count:           u32,
    #[serde(with = "humantime_serde")]
    pub retry_delay:           Duration,
    pub cache_dir:             PathBuf,
    pub install_root:          PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let root = home::home_dir().unwrap_or_default().join(".govm");
        Self {
            api_url:               "https://go.dev/dl/?mode=json&include=all".to_string(),
            download_url_template: "https://go.dev/dl/{filename}".to_string(),
            cache_expiry:          Duration::from_secs(60 * 60),
            timeout:               Duration::from_secs(5 * 60),
            retry_count:           3,
            retry_delay:           Duration::from_secs(2),
            cache_dir:             root.join("cache"),
            install_root:          root.join("versions"),
        }
    }
}

impl Config {
    /// Provider stack without extracting, for callers that add layers.
    pub fn figment(file: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file.as_ref()))
            .merge(Env::prefixed("GOVM_"))
    }

    /// Load from `file` (missing is fine) and the environment.
    pub fn load(file: impl AsRef<Path>) -> Result<Self> { Ok(Self::figment(file).extract()?) }

    /// `~/.govm/config.toml`.
    pub fn default_path() -> PathBuf { home::home_dir().unwrap_or_default().join(".govm").join("config.toml") }

    /// Install directory for `version`: `<install_root>/go<version>`.
    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.install_root.join(format!("go{}", normalize(version)))
    }

    pub fn download_url(&self, filename: &str) -> String {
        self.download_url_template.replace("{filename}", filename)
    }

    pub fn retry_policy(&self) -> RetryPolicy { RetryPolicy::fixed(self.retry_count, self.retry_delay) }
}
