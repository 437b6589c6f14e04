//! UI adapters

pub mod console;

pub use console::ConsoleQuizUi;
