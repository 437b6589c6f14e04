//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod content_provider;
pub mod quiz_ui;
pub mod reference_resolver;
pub mod score_ledger;
