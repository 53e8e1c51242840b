use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait IpLookup: Send + Sync {
    /// Resolve the public address of this machine for display
    async fn current_ip(&self) -> Result<String>;
}
