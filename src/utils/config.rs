use std::env;
use std::time::Duration;

pub const SERVICE_ACCOUNT_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

pub struct Config {}

impl Config {
    /// Explicit API server URL, takes precedence over the in-cluster service address.
    pub fn kube_api_server() -> Option<String> {
        env::var("KUBE_API_SERVER").ok().filter(|v| !v.is_empty())
    }
    pub fn kubernetes_service_host() -> Option<String> {
        env::var("KUBERNETES_SERVICE_HOST").ok().filter(|v| !v.is_empty())
    }
    pub fn kubernetes_service_port() -> String {
        env::var("KUBERNETES_SERVICE_PORT").unwrap_or_else(|_| "443".to_string())
    }
    pub fn kube_token() -> Option<String> {
        env::var("KUBE_TOKEN").ok().filter(|v| !v.is_empty())
    }
    pub fn service_account_token_path() -> String {
        env::var("KUBE_TOKEN_PATH").unwrap_or_else(|_| SERVICE_ACCOUNT_TOKEN_PATH.to_string())
    }
    pub fn skip_tls_verify() -> bool {
        env::var("KUBE_SKIP_TLS_VERIFY")
            .map(|x| matches!(x.to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false)
    }
    /// Per-request timeout such as `30s`. Unset or unparsable means no timeout.
    pub fn kube_request_timeout() -> Option<Duration> {
        env::var("KUBE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| humantime::parse_duration(&v).ok())
    }
    pub fn provisioner_config_file() -> Option<String> {
        env::var("PROVISIONER_CONFIG_FILE").ok().filter(|v| !v.is_empty())
    }

    /// Base URL of the API server as seen from inside a pod.
    pub fn in_cluster_api_server() -> Option<String> {
        Self::kube_api_server().or_else(|| {
            Self::kubernetes_service_host()
                .map(|host| format!("https://{}:{}", host, Self::kubernetes_service_port()))
        })
    }
}
