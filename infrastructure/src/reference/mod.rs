//! Reference resolvers

pub mod wiki;

pub use wiki::WikipediaResolver;
