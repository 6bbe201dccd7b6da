/// Kinds that exist once per cluster. Everything else lives in a namespace.
pub const CLUSTER_SCOPED_KINDS: &[&str] = &[
    "Namespace",
    "Node",
    "PersistentVolume",
    "CustomResourceDefinition",
    "ClusterRole",
    "ClusterRoleBinding",
    "ValidatingWebhookConfiguration",
    "MutatingWebhookConfiguration",
    "APIService",
    "PriorityClass",
    "ClusterIssuer",
    "ClusterSecretStore",
    "ClusterExternalSecret",
    "ClusterWorkflowTemplate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceScope {
    ClusterScoped,
    NamespaceScoped,
}

impl ResourceScope {
    pub fn is_namespaced(&self) -> bool {
        matches!(self, ResourceScope::NamespaceScoped)
    }
}

pub fn classify_scope(kind: &str) -> ResourceScope {
    if CLUSTER_SCOPED_KINDS.contains(&kind) {
        ResourceScope::ClusterScoped
    } else {
        ResourceScope::NamespaceScoped
    }
}
