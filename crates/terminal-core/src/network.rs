//! Best-effort public IP lookup for the status badge.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use terminal_platform::network::IpLookup;

/// Shown when the service answers without an address
const UNKNOWN_IP: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct IpResponse {
    #[serde(default)]
    ip: Option<String>,
}

/// Asks an ipify-style endpoint for the caller's address
pub struct IpifyLookup {
    client: reqwest::Client,
    url: String,
}

impl IpifyLookup {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl IpLookup for IpifyLookup {
    async fn current_ip(&self) -> Result<String> {
        debug!("looking up public ip via {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("ip lookup request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("ip lookup failed: HTTP {}", resp.status());
        }

        let body: IpResponse = resp.json().await.context("invalid ip lookup response")?;
        Ok(ip_or_unknown(body))
    }
}

fn ip_or_unknown(body: IpResponse) -> String {
    body.ip
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

/// Run `lookup`, falling back to `fallback` on any error or after `timeout`.
pub async fn resolve_ip(lookup: &dyn IpLookup, timeout: Duration, fallback: &str) -> String {
    match tokio::time::timeout(timeout, lookup.current_ip()).await {
        Ok(Ok(ip)) => ip,
        Ok(Err(e)) => {
            warn!("ip lookup failed, showing fallback: {:#}", e);
            fallback.to_string()
        }
        Err(_) => {
            warn!("ip lookup timed out after {:?}, showing fallback", timeout);
            fallback.to_string()
        }
    }
}

/// Text of the badge row printed above the prompt
pub fn badge_line(ip: &str) -> String {
    format!("[{}] [ENCRYPTED] [AES-256]", ip)
}
