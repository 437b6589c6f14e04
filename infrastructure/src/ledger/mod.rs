//! Score ledger adapters

pub mod json_ledger;

pub use json_ledger::JsonScoreLedger;
