use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::session::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Maximum number of remembered commands
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Play the connection handshake before the first prompt
    #[serde(default = "default_true")]
    pub boot_sequence: bool,

    /// Multiplier applied to boot delays (2.0 plays twice as fast)
    #[serde(default = "default_boot_speed")]
    pub boot_speed: f64,

    /// Look up the public IP for the status badge
    #[serde(default = "default_true")]
    pub ip_lookup_enabled: bool,

    /// Endpoint answering `{"ip": "..."}`
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,

    /// Give up on the lookup after this many milliseconds
    #[serde(default = "default_ip_lookup_timeout")]
    pub ip_lookup_timeout_ms: u64,

    /// Shown when the lookup fails or times out
    #[serde(default = "default_ip_fallback")]
    pub ip_fallback: String,

    /// Colour output lines by kind
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}
fn default_true() -> bool {
    true
}
fn default_boot_speed() -> f64 {
    1.0
}
fn default_ip_lookup_url() -> String {
    "https://api.ipify.org?format=json".to_string()
}
fn default_ip_lookup_timeout() -> u64 {
    3000
}
fn default_ip_fallback() -> String {
    "192.168.1.x".to_string()
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            boot_sequence: true,
            boot_speed: default_boot_speed(),
            ip_lookup_enabled: true,
            ip_lookup_url: default_ip_lookup_url(),
            ip_lookup_timeout_ms: default_ip_lookup_timeout(),
            ip_fallback: default_ip_fallback(),
            color: true,
        }
    }
}

impl TerminalConfig {
    /// Default config file path for this platform
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("dev", "yflong", "portfolio-terminal") {
            dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("terminal-config.json")
        }
    }

    /// Load config from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&data).with_context(|| "failed to parse config JSON")?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a file path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn ip_lookup_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.ip_lookup_timeout_ms)
    }
}
