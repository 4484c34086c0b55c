use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Markdown sources
    pub content: PathBuf,
    /// Assets copied verbatim
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
    /// Output directory, wiped on every build
    pub public: PathBuf,
    pub template: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("./content"),
            static_dir: PathBuf::from("./static"),
            public: PathBuf::from("./docs"),
            template: PathBuf::from("./template.html"),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix substituted for root-relative `href="/` and `src="/` links.
    pub basepath: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            basepath: "/".to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file, or return compiled defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::compiled_default()
            }),
            Err(_) => Self::compiled_default(),
        }
    }

    /// The config bundled into the binary. `build.rs` checks it parses.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }
}
