use thiserror::Error;

pub type Result<T, E = Error > = std::result::Result<T, E >;
#[derive(Error, Debug)]
pub enum Error {
    #[error("Manifest parse error: {0}")]
    ManifestParseError(String),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Kind {kind} is namespace scoped but no target namespace was supplied")]
    UnsupportedScope { kind: String },

    #[error("{method} {path} failed with status {status}: {body}")]
    ApiRequestFailed {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    // Only used to short-circuit existence checks, never returned from the applier.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("SerializationError: {0}")]
    JsonSerializationError(#[source] serde_json::Error),

    #[error("Http Transport Error: {0}")]
    HttpTransportError(#[source] reqwest::Error),

    #[error("Manifest Read Error: {0}")]
    ManifestReadError(#[source] std::io::Error),

    #[error("Fetching manifest from {location} failed with status {status}: {body}")]
    ManifestFetchFailed {
        location: String,
        status: u16,
        body: String,
    },

    #[error("Decoded content is not valid UTF-8: {0}")]
    Utf8DecodeError(#[source] std::string::FromUtf8Error),

    #[error("Base64 Decode Error: {0}")]
    Base64DecodeError(#[source] base64::DecodeError),

    #[error("Configuration Error: {0}")]
    ConfigurationError(#[source] config::ConfigError),

    #[error("Missing API server credentials: {0}")]
    MissingCredentials(String),

    #[error("Tracing Error")]
    TracingError(),
}

impl Error {
    pub fn metric_label(&self) -> String {
        let label = format!("{self:?}");
        label
            .split(|c: char| !c.is_alphanumeric())
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}
