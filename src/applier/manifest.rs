use std::str::FromStr;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use crate::contract::lib::{Error, Result};

/// One document of a manifest. `body` is the full document, sent to the API
/// server unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDocument {
    pub kind: String,
    pub api_version: String,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub body: JsonValue,
}

impl ResourceDocument {
    pub fn from_json(body: JsonValue) -> Result<Self> {
        if !body.is_object() {
            return Err(Error::ManifestParseError(
                "document is not a mapping".to_string(),
            ));
        }
        let kind = required_str(&body, "/kind")?;
        let api_version = required_str(&body, "/apiVersion")?;
        let name = optional_str(&body, "/metadata/name");
        let namespace = optional_str(&body, "/metadata/namespace");

        Ok(ResourceDocument {
            kind,
            api_version,
            name,
            namespace,
            body,
        })
    }

    /// Name the resource is addressed by. Documents without one cannot be applied.
    pub fn require_name(&self) -> Result<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                Error::InvalidResource(format!("{} is missing metadata.name", self.kind))
            })
    }
}

fn required_str(body: &JsonValue, pointer: &str) -> Result<String> {
    body.pointer(pointer)
        .and_then(|v| v.as_str())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::ManifestParseError(format!("document is missing {pointer}")))
}

fn optional_str(body: &JsonValue, pointer: &str) -> Option<String> {
    body.pointer(pointer)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Resource documents of a multi-document YAML text, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub documents: Vec<ResourceDocument>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self> {
        let mut documents = Vec::new();
        for document in serde_yaml::Deserializer::from_str(text) {
            let yaml = YamlValue::deserialize(document)
                .map_err(|e| Error::ManifestParseError(e.to_string()))?;
            if yaml.is_null() {
                continue;
            }
            let json = serde_json::to_value(yaml).map_err(Error::JsonSerializationError)?;
            documents.push(ResourceDocument::from_json(json)?);
        }

        if documents.is_empty() {
            return Err(Error::ManifestParseError(
                "manifest contains no documents".to_string(),
            ));
        }
        Ok(Manifest { documents })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromStr for Manifest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Manifest::parse(s)
    }
}
