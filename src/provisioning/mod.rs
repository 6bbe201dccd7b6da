pub mod resources;
pub mod settings;
pub mod stack;
