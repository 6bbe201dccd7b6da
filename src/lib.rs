//! Applies multi-document Kubernetes manifests over the plain REST API with
//! delete-then-create semantics, plus the provisioning helpers built on it.

pub mod applier;
pub mod contract;
pub mod manifest_source;
pub mod observability;
pub mod provisioning;
pub mod transport;
pub mod utils;

pub use applier::manifest::{Manifest, ResourceDocument};
pub use applier::resource_applier::ResourceApplier;
pub use applier::rest_path::{compute_rest_path, RestPath};
pub use applier::scope::{classify_scope, ResourceScope};
pub use contract::lib::{Error, Result};
pub use transport::http_transport::{ApiServerConnectionDetails, HttpApiTransport};
