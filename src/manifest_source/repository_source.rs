use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use tracing::debug;
use crate::contract::imanifest_source::IManifestSource;
use crate::contract::lib::{Error, Result};

pub struct RepositoryLocation {
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub git_ref: String,
}

#[derive(Deserialize)]
struct ContentsResponse {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

/// Reads a file at a given ref through a source-control contents API.
pub struct RepositoryManifestSource {
    location: RepositoryLocation,
    token: Option<String>,
}

impl RepositoryManifestSource {
    pub fn new(location: RepositoryLocation) -> Self {
        RepositoryManifestSource {
            location,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn contents_url(&self) -> Result<reqwest::Url> {
        let l = &self.location;
        let base = format!(
            "{}/repos/{}/{}/contents/{}",
            l.api_url.trim_end_matches('/'),
            l.owner,
            l.repo,
            l.path.trim_start_matches('/')
        );
        reqwest::Url::parse_with_params(&base, [("ref", l.git_ref.as_str())])
            .map_err(|e| Error::InvalidResource(format!("invalid repository url {base}: {e}")))
    }
}

fn decode_content(response: ContentsResponse) -> Result<String> {
    match response.encoding.as_deref() {
        Some("base64") | None => {
            // The API wraps base64 payloads at 60 columns.
            let compact: String = response.content.split_whitespace().collect();
            let bytes = STANDARD.decode(compact).map_err(Error::Base64DecodeError)?;
            String::from_utf8(bytes).map_err(Error::Utf8DecodeError)
        }
        Some(_) => Ok(response.content),
    }
}

#[async_trait]
impl IManifestSource for RepositoryManifestSource {
    fn location(&self) -> String {
        let l = &self.location;
        format!("{}/{}:{}@{}", l.owner, l.repo, l.path, l.git_ref)
    }

    async fn fetch_manifest(&self) -> Result<String> {
        let url = self.contents_url()?;
        let mut request = reqwest::Client::new()
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, "platform-applier");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(Error::HttpTransportError)?;
        let status_code = response.status();
        let res_txt = response.text().await.map_err(Error::HttpTransportError)?;

        if !status_code.is_success() {
            debug!("Repository responded with error Url: {}, StatusCode: {}", url.as_str(), status_code.as_str());
            return Err(Error::ManifestFetchFailed {
                location: self.location(),
                status: status_code.as_u16(),
                body: res_txt,
            });
        }

        let contents: ContentsResponse =
            serde_json::from_str(&res_txt).map_err(Error::JsonSerializationError)?;
        decode_content(contents)
    }
}
