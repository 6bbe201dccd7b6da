use std::time::Duration;
use async_trait::async_trait;
use tracing::debug;
use crate::contract::imanifest_source::IManifestSource;
use crate::contract::lib::{Error, Result};

pub struct UrlManifestSource {
    url: String,
    timeout: Duration,
}

impl UrlManifestSource {
    pub fn new(url: impl Into<String>) -> Self {
        UrlManifestSource {
            url: url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl IManifestSource for UrlManifestSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch_manifest(&self) -> Result<String> {
        let client = reqwest::Client::new();

        let response = client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(Error::HttpTransportError)?;

        let status_code = response.status();
        let res_txt = response.text().await.map_err(Error::HttpTransportError)?;

        if !status_code.is_success() {
            debug!("Manifest download failed Url: {}, Response: {}, StatusCode: {}", &self.url, res_txt, status_code.as_str());
            return Err(Error::ManifestFetchFailed {
                location: self.url.clone(),
                status: status_code.as_u16(),
                body: res_txt,
            });
        }

        Ok(res_txt)
    }
}
