use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Server configuration, read from a YAML file. Every field has a default
/// so an empty document (or a missing file) yields a working kiosk setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path of the persisted playlist document.
    #[serde(default = "default_playlist_path")]
    pub playlist_path: PathBuf,
    /// Duration given to slides added while the playlist is empty.
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_playlist_path() -> PathBuf {
    PathBuf::from("smart-display.json")
}

fn default_duration_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            playlist_path: default_playlist_path(),
            default_duration_secs: default_duration_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`; a missing file falls back to
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read config at {}", path.display()));
            }
        };
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_duration_secs == 0 {
            bail!("default-duration-secs must be greater than zero");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(SocketAddr::new(
            self.bind_address
                .parse()
                .with_context(|| format!("invalid bind-address {:?}", self.bind_address))?,
            self.port,
        ))
    }
}
