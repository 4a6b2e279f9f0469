//! Configuration for issueflow

mod loader;

pub use loader::load_config;
