use std::collections::HashMap;
use std::fmt;
use once_cell::sync::Lazy;
use tracing::warn;
use crate::applier::scope::{classify_scope, ResourceScope};
use crate::contract::lib::{Error, Result};

/// Plural resource names for the kinds provisioning manifests use.
static KIND_PLURALS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Namespace", "namespaces"),
        ("Node", "nodes"),
        ("PersistentVolume", "persistentvolumes"),
        ("CustomResourceDefinition", "customresourcedefinitions"),
        ("ClusterRole", "clusterroles"),
        ("ClusterRoleBinding", "clusterrolebindings"),
        ("ValidatingWebhookConfiguration", "validatingwebhookconfigurations"),
        ("MutatingWebhookConfiguration", "mutatingwebhookconfigurations"),
        ("APIService", "apiservices"),
        ("PriorityClass", "priorityclasses"),
        ("ClusterIssuer", "clusterissuers"),
        ("ClusterSecretStore", "clustersecretstores"),
        ("ClusterExternalSecret", "clusterexternalsecrets"),
        ("ClusterWorkflowTemplate", "clusterworkflowtemplates"),
        ("Secret", "secrets"),
        ("Ingress", "ingresses"),
    ])
});

/// Collection path of a resource kind, e.g. `/api/v1/namespaces/argo/secrets`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RestPath(String);

impl RestPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of a single named object inside this collection.
    pub fn item(&self, name: &str) -> String {
        format!("{}/{}", self.0, name)
    }
}

impl fmt::Display for RestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RestPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lowercased `s`/`es` suffix rule. Wrong for irregular plurals such as
/// `Policy`, which is why the lookup table is consulted first.
pub fn heuristic_plural(kind: &str) -> String {
    let lower = kind.to_lowercase();
    if lower.ends_with('s') {
        format!("{lower}es")
    } else {
        format!("{lower}s")
    }
}

pub fn pluralize_kind(kind: &str) -> String {
    if let Some(plural) = KIND_PLURALS.get(kind) {
        return plural.to_string();
    }
    let plural = heuristic_plural(kind);
    warn!("No known plural for kind {}, guessing \"{}\"", kind, plural);
    plural
}

/// Splits `apiVersion` into `(group, version)`; the core group is `None`.
pub fn split_api_version(api_version: &str) -> Result<(Option<&str>, &str)> {
    let mut parts = api_version.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(version), None, None) if !version.is_empty() => Ok((None, version)),
        (Some(group), Some(version), None) if !group.is_empty() && !version.is_empty() => {
            Ok((Some(group), version))
        }
        _ => Err(Error::InvalidResource(format!(
            "malformed apiVersion \"{api_version}\""
        ))),
    }
}

pub fn compute_rest_path(kind: &str, api_version: &str, namespace: Option<&str>) -> Result<RestPath> {
    if kind.is_empty() {
        return Err(Error::InvalidResource("kind must not be empty".to_string()));
    }
    let (group, version) = split_api_version(api_version)?;

    let mut path = match group {
        None => format!("/api/{version}"),
        Some(group) => format!("/apis/{group}/{version}"),
    };

    match classify_scope(kind) {
        ResourceScope::ClusterScoped => {}
        ResourceScope::NamespaceScoped => {
            let namespace = namespace
                .filter(|ns| !ns.is_empty())
                .ok_or_else(|| Error::UnsupportedScope { kind: kind.to_string() })?;
            path.push_str("/namespaces/");
            path.push_str(namespace);
        }
    }

    path.push('/');
    path.push_str(&pluralize_kind(kind));
    Ok(RestPath(path))
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use rstest::rstest;
    use super::*;

    #[rstest]
    #[case("Namespace", "v1", None, "/api/v1/namespaces")]
    #[case(
        "ClusterRoleBinding",
        "rbac.authorization.k8s.io/v1",
        None,
        "/apis/rbac.authorization.k8s.io/v1/clusterrolebindings"
    )]
    #[case("Secret", "v1", Some("argo"), "/api/v1/namespaces/argo/secrets")]
    #[case(
        "Ingress",
        "networking.k8s.io/v1",
        Some("web"),
        "/apis/networking.k8s.io/v1/namespaces/web/ingresses"
    )]
    #[case(
        "ClusterSecretStore",
        "external-secrets.io/v1beta1",
        Some("ignored"),
        "/apis/external-secrets.io/v1beta1/clustersecretstores"
    )]
    #[case(
        "WorkflowTemplate",
        "argoproj.io/v1alpha1",
        Some("argo"),
        "/apis/argoproj.io/v1alpha1/namespaces/argo/workflowtemplates"
    )]
    fn computes_collection_paths(
        #[case] kind: &str,
        #[case] api_version: &str,
        #[case] namespace: Option<&str>,
        #[case] expected: &str,
    ) {
        let path = compute_rest_path(kind, api_version, namespace).unwrap();
        assert_eq!(path.as_str(), expected);
    }

    #[test]
    fn namespaced_kind_without_namespace_is_unsupported() {
        let err = compute_rest_path("Secret", "v1", None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedScope { kind } if kind == "Secret"));

        let err = compute_rest_path("Secret", "v1", Some("")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedScope { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("a/b/c")]
    #[case("/v1")]
    #[case("apps/")]
    fn rejects_malformed_api_versions(#[case] api_version: &str) {
        let err = compute_rest_path("Namespace", api_version, None).unwrap_err();
        assert!(matches!(err, Error::InvalidResource(_)));
    }

    #[test]
    fn rejects_empty_kind() {
        assert!(matches!(
            compute_rest_path("", "v1", Some("default")),
            Err(Error::InvalidResource(_))
        ));
    }

    #[test]
    fn same_inputs_give_same_path() {
        let a = compute_rest_path("Secret", "v1", Some("argo")).unwrap();
        let b = compute_rest_path("Secret", "v1", Some("argo")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn item_path_appends_name() {
        let path = compute_rest_path("Namespace", "v1", None).unwrap();
        assert_eq!(path.item("foo"), "/api/v1/namespaces/foo");
    }

    #[rstest]
    #[case("ConfigMap", "configmaps")]
    #[case("Widget", "widgets")]
    #[case("Gateways", "gatewayses")]
    #[case("Policy", "policys")]
    fn unknown_kinds_fall_back_to_suffix_rule(#[case] kind: &str, #[case] expected: &str) {
        assert_eq!(pluralize_kind(kind), expected);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn pluralize_with_logs(kind: &str) -> (String, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        let plural = tracing::subscriber::with_default(subscriber, || pluralize_kind(kind));
        (plural, logs.text())
    }

    #[test]
    fn guessed_plurals_are_logged_as_warnings() {
        let (plural, logs) = pluralize_with_logs("Widget");

        assert_eq!(plural, "widgets");
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("No known plural for kind Widget"), "{logs}");
    }

    #[test]
    fn known_plurals_log_nothing() {
        let (plural, logs) = pluralize_with_logs("ClusterSecretStore");

        assert_eq!(plural, "clustersecretstores");
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn table_wins_over_suffix_rule() {
        assert_eq!(pluralize_kind("PriorityClass"), "priorityclasses");
        assert_eq!(pluralize_kind("Ingress"), "ingresses");
        assert_eq!(heuristic_plural("Ingress"), "ingresses");
    }
}
