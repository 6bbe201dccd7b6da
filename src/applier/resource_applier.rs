use std::sync::Arc;
use serde_json::Value as JsonValue;
use tracing::{info, warn};
use crate::applier::manifest::{Manifest, ResourceDocument};
use crate::applier::operations;
use crate::applier::rest_path::{compute_rest_path, RestPath};
use crate::applier::strategy::DeleteThenCreate;
use crate::contract::iapply_strategy::{IApplyStrategy, ResourceTarget};
use crate::contract::imanifest_source::IManifestSource;
use crate::contract::itransport::IApiTransport;
use crate::contract::lib::Result;

/// Applies manifests against one API server. Holds no mutable state, clones
/// share the same transport.
#[derive(Clone)]
pub struct ResourceApplier {
    transport: Arc<dyn IApiTransport>,
    strategy: Arc<dyn IApplyStrategy>,
}

impl ResourceApplier {
    pub fn new(transport: Arc<dyn IApiTransport>) -> Self {
        Self::with_strategy(transport, Arc::new(DeleteThenCreate))
    }

    pub fn with_strategy(
        transport: Arc<dyn IApiTransport>,
        strategy: Arc<dyn IApplyStrategy>,
    ) -> Self {
        ResourceApplier { transport, strategy }
    }

    pub fn transport(&self) -> &dyn IApiTransport {
        self.transport.as_ref()
    }

    pub async fn delete_if_exists(&self, collection: &RestPath, name: &str) -> Result<()> {
        operations::delete_if_exists(self.transport(), collection.as_str(), name).await
    }

    pub async fn create_resource(
        &self,
        collection: &RestPath,
        body: &JsonValue,
        ignore_conflict: bool,
    ) -> Result<Option<JsonValue>> {
        self.apply_resource(collection.as_str(), body, ignore_conflict).await
    }

    /// POSTs a single resource body without going through manifest parsing.
    pub async fn apply_resource(
        &self,
        path: &str,
        body: &JsonValue,
        ignore_conflict: bool,
    ) -> Result<Option<JsonValue>> {
        operations::apply_resource(self.transport(), path, body, ignore_conflict).await
    }

    /// Applies one object through the configured strategy, same as a
    /// single-document manifest.
    pub async fn apply_object(
        &self,
        body: JsonValue,
        target_namespace: Option<&str>,
    ) -> Result<Option<JsonValue>> {
        let manifest = Manifest {
            documents: vec![ResourceDocument::from_json(body)?],
        };
        let target = self.plan(&manifest, target_namespace)?.remove(0);
        info!("Applying {} {} at {}", target.kind, target.name, target.collection);
        self.strategy.apply(self.transport(), &target).await
    }

    /// Resolves every document to its target before anything is sent, so a
    /// scope or naming problem anywhere in the manifest touches nothing.
    pub fn plan(&self, manifest: &Manifest, target_namespace: Option<&str>) -> Result<Vec<ResourceTarget>> {
        manifest
            .documents
            .iter()
            .map(|document| -> Result<ResourceTarget> {
                let collection = compute_rest_path(&document.kind, &document.api_version, target_namespace)?;
                Ok(ResourceTarget {
                    kind: document.kind.clone(),
                    collection,
                    name: document.require_name()?.to_string(),
                    body: document.body.clone(),
                })
            })
            .collect()
    }

    /// Applies every document in source order. Stops at the first failure;
    /// documents already applied stay applied.
    pub async fn apply_manifest(&self, yaml: &str, target_namespace: Option<&str>) -> Result<()> {
        let manifest = Manifest::parse(yaml)?;
        self.apply_parsed_manifest(&manifest, target_namespace).await
    }

    pub async fn apply_parsed_manifest(
        &self,
        manifest: &Manifest,
        target_namespace: Option<&str>,
    ) -> Result<()> {
        let targets = self.plan(manifest, target_namespace)?;
        for target in &targets {
            info!("Applying {} {} at {}", target.kind, target.name, target.collection);
            if let Err(e) = self.strategy.apply(self.transport(), target).await {
                warn!(
                    error = %e.metric_label(),
                    "Applying {} {} failed, stopping manifest: {}",
                    target.kind, target.name, e
                );
                return Err(e);
            }
        }
        info!("Applied {} resources", targets.len());
        Ok(())
    }

    pub async fn apply_manifest_from(
        &self,
        source: &dyn IManifestSource,
        target_namespace: Option<&str>,
    ) -> Result<()> {
        info!("Fetching manifest from {}", source.location());
        let yaml = source.fetch_manifest().await?;
        self.apply_manifest(&yaml, target_namespace).await
    }

    /// Removes every resource of the manifest, last document first.
    pub async fn delete_manifest(&self, yaml: &str, target_namespace: Option<&str>) -> Result<()> {
        let manifest = Manifest::parse(yaml)?;
        let targets = self.plan(&manifest, target_namespace)?;
        for target in targets.iter().rev() {
            info!("Removing {} {} from {}", target.kind, target.name, target.collection);
            if let Err(e) = self.delete_if_exists(&target.collection, &target.name).await {
                warn!(
                    error = %e.metric_label(),
                    "Removing {} {} failed, stopping manifest: {}",
                    target.kind, target.name, e
                );
                return Err(e);
            }
        }
        Ok(())
    }
}
