use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde_json::Value as JsonValue;
use tracing::debug;
use crate::contract::itransport::{ApiResponse, IApiTransport};
use crate::contract::lib::{Error, Result};
use crate::utils::config::Config;

#[derive(Clone)]
pub struct ApiServerConnectionDetails {
    pub base_url: String,
    pub token: String,
    /// Accept any server certificate. Meant for self-signed cluster endpoints.
    pub skip_certificate_verification: bool,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiServerConnectionDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiServerConnectionDetails")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("skip_certificate_verification", &self.skip_certificate_verification)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiServerConnectionDetails {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        ApiServerConnectionDetails {
            base_url: base_url.into(),
            token: token.into(),
            skip_certificate_verification: false,
            timeout: None,
        }
    }

    pub fn skip_certificate_verification(mut self, skip: bool) -> Self {
        self.skip_certificate_verification = skip;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// In-cluster defaults: service address and mounted service-account token,
    /// both overridable through the environment.
    pub async fn from_env() -> Result<Self> {
        let base_url = Config::in_cluster_api_server().ok_or_else(|| {
            Error::MissingCredentials(
                "neither KUBE_API_SERVER nor KUBERNETES_SERVICE_HOST is set".to_string(),
            )
        })?;

        let token = match Config::kube_token() {
            Some(token) => token,
            None => {
                let path = Config::service_account_token_path();
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| Error::MissingCredentials(format!("{path}: {e}")))?
                    .trim()
                    .to_string()
            }
        };

        Ok(ApiServerConnectionDetails {
            base_url,
            token,
            skip_certificate_verification: Config::skip_tls_verify(),
            timeout: Config::kube_request_timeout(),
        })
    }
}

pub struct HttpApiTransport {
    config: ApiServerConnectionDetails,
    client: reqwest::Client,
}

impl HttpApiTransport {
    pub fn new(config: ApiServerConnectionDetails) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.skip_certificate_verification);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::HttpTransportError)?;

        Ok(HttpApiTransport { config, client })
    }

    pub async fn from_env() -> Result<Self> {
        Self::new(ApiServerConnectionDetails::from_env().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(&self.config.token)
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, method: &str, path: &str, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await.map_err(Error::HttpTransportError)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(Error::HttpTransportError)?;

        debug!("{} {} responded with {}", method, path, status);
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl IApiTransport for HttpApiTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send("GET", path, self.request(Method::GET, path)).await
    }

    async fn post(&self, path: &str, body: &JsonValue) -> Result<ApiResponse> {
        let request = self
            .request(Method::POST, path)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        self.send("POST", path, request).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send("DELETE", path, self.request(Method::DELETE, path)).await
    }
}
