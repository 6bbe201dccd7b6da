use std::path::PathBuf;
use async_trait::async_trait;
use crate::contract::imanifest_source::IManifestSource;
use crate::contract::lib::{Error, Result};

pub struct LocalManifestSource {
    path: PathBuf,
}

impl LocalManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalManifestSource { path: path.into() }
    }
}

#[async_trait]
impl IManifestSource for LocalManifestSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_manifest(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(Error::ManifestReadError)
    }
}
