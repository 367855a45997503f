//! Topic handling module
//!
//! This module provides components for working with MQTT topic patterns:
//! splitting them into items, compiling them into matchers, and extracting
//! or formatting named parameters.

// Submodules
pub mod error;
pub mod topic_match;
pub mod topic_params;
pub mod topic_pattern_item;
/// Topic pattern compilation and matching
pub mod topic_pattern_path;

#[cfg(test)]
mod topic_pattern_path_tests;

// Re-export commonly used types for convenience
pub use error::{FormatResult, PatternResult, TopicError, TopicResult};
pub use topic_match::{ParamExtractor, TopicMatch};
pub use topic_params::{ParamValue, ParameterMap};
pub use topic_pattern_item::{TopicPatternError, TopicPatternItem};
pub use topic_pattern_path::{TopicFormatError, TopicPatternPath};
