pub mod local_source;
pub mod repository_source;
pub mod url_source;
