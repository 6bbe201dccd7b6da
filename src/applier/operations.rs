use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};
use crate::contract::itransport::{ApiResponse, IApiTransport};
use crate::contract::lib::{Error, Result};

fn request_failed(method: &str, path: &str, response: ApiResponse) -> Error {
    Error::ApiRequestFailed {
        method: method.to_string(),
        path: path.to_string(),
        status: response.status,
        body: response.body,
    }
}

/// GETs a single object. Not-found comes back as `Error::ResourceNotFound`.
pub async fn get_resource(transport: &dyn IApiTransport, item_path: &str) -> Result<JsonValue> {
    let response = transport.get(item_path).await?;
    if response.is_not_found() {
        return Err(Error::ResourceNotFound(item_path.to_string()));
    }
    if !response.is_success() {
        return Err(request_failed("GET", item_path, response));
    }
    response.json()
}

/// Removes `collection/name` when it is present. A missing object is a no-op.
pub async fn delete_if_exists(
    transport: &dyn IApiTransport,
    collection: &str,
    name: &str,
) -> Result<()> {
    let item_path = format!("{collection}/{name}");

    match get_resource(transport, &item_path).await {
        Ok(_) => {}
        Err(Error::ResourceNotFound(_)) => {
            debug!("{} does not exist, nothing to delete", item_path);
            return Ok(());
        }
        Err(Error::ApiRequestFailed { status, body, .. }) => {
            warn!(
                "Could not determine whether {} exists (status {}): {}",
                item_path, status, body
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    let response = transport.delete(&item_path).await?;
    if !response.is_success() {
        return Err(request_failed("DELETE", &item_path, response));
    }
    info!("Deleted {}", item_path);
    Ok(())
}

/// POSTs `body` to `collection`. With `ignore_conflict` an already-existing
/// object counts as success and yields `None`.
pub async fn apply_resource(
    transport: &dyn IApiTransport,
    collection: &str,
    body: &JsonValue,
    ignore_conflict: bool,
) -> Result<Option<JsonValue>> {
    let response = transport.post(collection, body).await?;

    if response.is_success() {
        return response.json().map(Some);
    }
    if response.is_conflict() && ignore_conflict {
        debug!("{} already holds this resource, ignoring conflict", collection);
        return Ok(None);
    }
    Err(request_failed("POST", collection, response))
}
