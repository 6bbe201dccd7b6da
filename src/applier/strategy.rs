use async_trait::async_trait;
use serde_json::Value as JsonValue;
use crate::applier::operations::{apply_resource, delete_if_exists};
use crate::contract::iapply_strategy::{IApplyStrategy, ResourceTarget};
use crate::contract::itransport::IApiTransport;
use crate::contract::lib::Result;

/// Replaces a resource by removing any existing copy and creating it again.
/// Not atomic: a concurrent writer of the same object can interleave.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteThenCreate;

#[async_trait]
impl IApplyStrategy for DeleteThenCreate {
    async fn apply(
        &self,
        transport: &dyn IApiTransport,
        target: &ResourceTarget,
    ) -> Result<Option<JsonValue>> {
        delete_if_exists(transport, target.collection.as_str(), &target.name).await?;
        apply_resource(transport, target.collection.as_str(), &target.body, false).await
    }
}
