//! Infrastructure layer for quizcord
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod content;
pub mod ledger;
pub mod reference;
pub mod ui;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use content::{OpenTriviaProvider, builtin_catalog};
pub use ledger::JsonScoreLedger;
pub use reference::WikipediaResolver;
pub use ui::ConsoleQuizUi;
