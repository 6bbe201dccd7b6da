use async_trait::async_trait;
use serde_json::Value as JsonValue;
use crate::applier::rest_path::RestPath;
use crate::contract::itransport::IApiTransport;
use crate::contract::lib::Result;

/// A single resource ready to be written: where its collection lives, what it
/// is called there and the body to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTarget {
    pub kind: String,
    pub collection: RestPath,
    pub name: String,
    pub body: JsonValue,
}

impl ResourceTarget {
    pub fn item_path(&self) -> String {
        self.collection.item(&self.name)
    }
}

/// How a resource is made to match its desired state on the server.
#[async_trait]
pub trait IApplyStrategy: Send + Sync {
    async fn apply(
        &self,
        transport: &dyn IApiTransport,
        target: &ResourceTarget,
    ) -> Result<Option<JsonValue>>;
}
