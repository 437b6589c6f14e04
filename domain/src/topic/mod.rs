//! Topics and adaptive sub-category selection

pub mod selector;

pub use selector::{Topic, TopicContent, TopicPerformance, select_category};
