pub mod manifest;
pub mod operations;
pub mod resource_applier;
pub mod rest_path;
pub mod scope;
pub mod strategy;
