use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Server configuration.
///
/// Loaded from an optional YAML file named by `SERVER_CONFIG`, then
/// `LISTEN` overrides the listen address.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the dispatcher binds to (e.g. "127.0.0.1:8080")
    pub listen_addr: String,
    /// Directory every request target is resolved against
    pub document_root: PathBuf,
    /// Document served for `GET /`, relative to the document root
    pub default_document: PathBuf,
    /// Text substituted for the `<cs371server>` marker
    pub server_name: String,
    /// How long a worker waits for the complete request head
    pub read_timeout_ms: u64,
    /// Answer missing files with `200 OK` instead of `404 Not Found`
    pub legacy_not_found_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            document_root: PathBuf::from("."),
            default_document: PathBuf::from("www/res/default.html"),
            server_name: "xiao's server".to_string(),
            read_timeout_ms: 10_000,
            legacy_not_found_status: false,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("SERVER_CONFIG") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {}", path))?;
                Self::from_yaml_str(&raw)
                    .with_context(|| format!("invalid config file {}", path))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    /// Parses a YAML document; missing keys take their default values.
    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        let cfg = serde_yaml::from_str(raw)?;
        Ok(cfg)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
