pub mod iapply_strategy;
pub mod imanifest_source;
pub mod itransport;
pub mod lib;
