use async_trait::async_trait;
use crate::contract::lib::Result;

#[async_trait]
pub trait IManifestSource: Send + Sync {
    /// Human readable location, used in logs and errors.
    fn location(&self) -> String;

    async fn fetch_manifest(&self) -> Result<String>;
}
