use std::collections::BTreeMap;
use tracing::info;
use crate::applier::resource_applier::ResourceApplier;
use crate::contract::imanifest_source::IManifestSource;
use crate::contract::lib::Result;
use crate::provisioning::resources::{ensure_namespace, upsert_secret};
use crate::provisioning::settings::ProvisioningSettings;

/// Drives the provisioning steps callers repeat for every platform stack.
pub struct StackInstaller {
    applier: ResourceApplier,
    settings: ProvisioningSettings,
}

impl StackInstaller {
    pub fn new(applier: ResourceApplier, settings: ProvisioningSettings) -> Self {
        StackInstaller { applier, settings }
    }

    pub fn settings(&self) -> &ProvisioningSettings {
        &self.settings
    }

    /// Writes the API and source-control tokens workflows read at runtime.
    pub async fn store_credentials(&self, api_token: &str, source_control_token: &str) -> Result<()> {
        let s = &self.settings;
        ensure_namespace(&self.applier, &s.workflow_namespace).await?;
        upsert_secret(
            &self.applier,
            &s.workflow_namespace,
            &s.credentials_secret_name,
            BTreeMap::from([
                (s.api_token_key.clone(), api_token.to_string()),
                (s.source_control_token_key.clone(), source_control_token.to_string()),
            ]),
        )
        .await
    }

    /// Creates `namespace` if needed and applies the stack manifest into it.
    pub async fn install(&self, source: &dyn IManifestSource, namespace: &str) -> Result<()> {
        ensure_namespace(&self.applier, namespace).await?;
        self.applier.apply_manifest_from(source, Some(namespace)).await?;
        info!("Installed stack from {} into {}", source.location(), namespace);
        Ok(())
    }

    pub async fn uninstall(&self, source: &dyn IManifestSource, namespace: &str) -> Result<()> {
        let yaml = source.fetch_manifest().await?;
        self.applier.delete_manifest(&yaml, Some(namespace)).await?;
        info!("Removed stack from {} out of {}", source.location(), namespace);
        Ok(())
    }
}
