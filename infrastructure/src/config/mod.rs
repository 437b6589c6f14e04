//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{FileApiConfig, FileConfig, FileLedgerConfig, FileQuizConfig};
pub use loader::ConfigLoader;
