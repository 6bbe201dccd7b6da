use std::collections::BTreeMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use k8s_openapi::api::core::v1::{Namespace, Secret};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde_json::Value as JsonValue;
use tracing::info;
use crate::applier::operations::get_resource;
use crate::applier::resource_applier::ResourceApplier;
use crate::applier::rest_path::compute_rest_path;
use crate::contract::lib::{Error, Result};

pub fn namespace_body(name: &str) -> Result<JsonValue> {
    let namespace = Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    serde_json::to_value(&namespace).map_err(Error::JsonSerializationError)
}

pub fn opaque_secret_body(
    namespace: &str,
    name: &str,
    string_data: BTreeMap<String, String>,
) -> Result<JsonValue> {
    let secret = Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        string_data: Some(string_data),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    };
    serde_json::to_value(&secret).map_err(Error::JsonSerializationError)
}

/// Creates the namespace unless it already exists. Never replaces it.
pub async fn ensure_namespace(applier: &ResourceApplier, name: &str) -> Result<()> {
    let collection = compute_rest_path("Namespace", "v1", None)?;
    let created = applier
        .create_resource(&collection, &namespace_body(name)?, true)
        .await?;
    if created.is_some() {
        info!("Created namespace {}", name);
    }
    Ok(())
}

/// Replaces the secret with one holding exactly `string_data`.
pub async fn upsert_secret(
    applier: &ResourceApplier,
    namespace: &str,
    name: &str,
    string_data: BTreeMap<String, String>,
) -> Result<()> {
    let body = opaque_secret_body(namespace, name, string_data)?;
    applier.apply_object(body, Some(namespace)).await?;
    Ok(())
}

/// Decoded value of one key of a secret's `data`. `None` when the secret or
/// the key is absent; binary values that are not UTF-8 are an error.
pub async fn read_secret_value(
    applier: &ResourceApplier,
    namespace: &str,
    name: &str,
    key: &str,
) -> Result<Option<String>> {
    let collection = compute_rest_path("Secret", "v1", Some(namespace))?;
    let secret = match get_resource(applier.transport(), &collection.item(name)).await {
        Ok(secret) => secret,
        Err(Error::ResourceNotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };

    match secret.pointer(&format!("/data/{key}")).and_then(|v| v.as_str()) {
        Some(encoded) => {
            let bytes = STANDARD.decode(encoded).map_err(Error::Base64DecodeError)?;
            String::from_utf8(bytes).map(Some).map_err(Error::Utf8DecodeError)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use serde_json::json;
    use crate::applier::fixtures::tests::{Call, RecordingTransport};
    use super::*;

    #[test]
    fn typed_bodies_carry_kind_and_api_version() {
        assert_eq!(
            namespace_body("argo").unwrap(),
            json!({"apiVersion": "v1", "kind": "Namespace", "metadata": {"name": "argo"}})
        );

        let secret = opaque_secret_body(
            "argo",
            "creds",
            BTreeMap::from([("token".to_string(), "abc".to_string())]),
        )
        .unwrap();
        assert_eq!(secret["kind"], "Secret");
        assert_eq!(secret["type"], "Opaque");
        assert_eq!(secret["metadata"]["namespace"], "argo");
        assert_eq!(secret["stringData"]["token"], "abc");
    }

    #[tokio::test]
    async fn ensure_namespace_tolerates_existing_namespace() {
        let transport = Arc::new(
            RecordingTransport::new().with_object("/api/v1/namespaces/argo", json!({})),
        );
        let applier = ResourceApplier::new(transport.clone());

        ensure_namespace(&applier, "argo").await.unwrap();

        assert_eq!(transport.calls().len(), 1);
        assert!(matches!(&transport.calls()[0], Call::Post(path, _) if path == "/api/v1/namespaces"));
    }

    #[tokio::test]
    async fn upsert_secret_replaces_existing_secret() {
        let item = "/api/v1/namespaces/argo/secrets/creds";
        let transport = Arc::new(
            RecordingTransport::new().with_object(item, json!({"stringData": {"old": "x"}})),
        );
        let applier = ResourceApplier::new(transport.clone());

        upsert_secret(
            &applier,
            "argo",
            "creds",
            BTreeMap::from([("token".to_string(), "new".to_string())]),
        )
        .await
        .unwrap();

        let stored = transport.objects()[item].clone();
        assert_eq!(stored["stringData"], json!({"token": "new"}));
        assert!(transport.calls().contains(&Call::Delete(item.to_string())));
    }

    #[tokio::test]
    async fn reads_and_decodes_secret_values() {
        let transport = Arc::new(RecordingTransport::new().with_object(
            "/api/v1/namespaces/argo/secrets/creds",
            json!({"data": {"token": STANDARD.encode("hunter2")}}),
        ));
        let applier = ResourceApplier::new(transport);

        let value = read_secret_value(&applier, "argo", "creds", "token").await.unwrap();
        let missing = read_secret_value(&applier, "argo", "creds", "other").await.unwrap();

        assert_eq!(value.as_deref(), Some("hunter2"));
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn reading_absent_secret_yields_none() {
        let applier = ResourceApplier::new(Arc::new(RecordingTransport::new()));

        let value = read_secret_value(&applier, "argo", "nope", "token").await.unwrap();

        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn binary_secret_values_are_not_mangled() {
        let transport = Arc::new(RecordingTransport::new().with_object(
            "/api/v1/namespaces/argo/secrets/creds",
            json!({"data": {"k": STANDARD.encode([0xffu8, 0x00, 0x80])}}),
        ));
        let applier = ResourceApplier::new(transport);

        let err = read_secret_value(&applier, "argo", "creds", "k").await.unwrap_err();

        assert!(matches!(err, Error::Utf8DecodeError(_)));
    }

    #[tokio::test]
    async fn other_read_failures_still_propagate() {
        let transport = Arc::new(RecordingTransport::new().failing(
            "GET",
            "/api/v1/namespaces/argo/secrets/creds",
            403,
            "forbidden",
        ));
        let applier = ResourceApplier::new(transport);

        let err = read_secret_value(&applier, "argo", "creds", "token").await.unwrap_err();

        assert!(matches!(err, Error::ApiRequestFailed { status: 403, .. }));
    }
}
