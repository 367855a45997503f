//! Error types for the topic module
//!
//! This module contains the composite error type for the entire topic
//! module, while individual error types remain in their respective modules.

use thiserror::Error;

use super::topic_pattern_item::TopicPatternError;
use super::topic_pattern_path::TopicFormatError;

/// Comprehensive error type for all topic-related operations
///
/// Aggregates compile-time pattern errors and formatting errors so callers
/// that do both can propagate a single type with `?`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicError {
	/// Topic pattern could not be compiled
	#[error("Topic pattern error: {0}")]
	Pattern(#[from] TopicPatternError),

	/// Topic could not be formatted from parameters
	#[error("Topic format error: {0}")]
	Format(#[from] TopicFormatError),
}

/// Convenient Result type for topic operations
pub type TopicResult<T> = Result<T, TopicError>;

/// Convenient Result type for pattern compilation
pub type PatternResult<T> = Result<T, TopicPatternError>;

/// Convenient Result type for topic formatting
pub type FormatResult<T> = Result<T, TopicFormatError>;
