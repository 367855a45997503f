//! # MQTT Topic Pattern
//!
//! Compiles MQTT-style topic filters with named wildcards into a matcher and
//! a parameter extractor.
//!
//! ## Pattern syntax
//!
//! - levels are separated by `/`
//! - `+name` matches exactly one level and captures it as `name`
//! - `#name` matches zero or more trailing levels and captures them as a
//!   list; it must be the last level
//! - anything else is matched literally
//!
//! Names may be empty (`+`, `#`): the wildcard matches but captures nothing.
//! Wildcards consume levels made of `[0-9A-Za-z_]`. Every pattern accepts
//! topics with or without a trailing slash.
//!
//! ## Quick Start
//!
//! ```rust
//! use mqtt_topic_pattern::{compile, ParameterMap};
//!
//! let pattern = compile("devices/+device_id/#path")?;
//!
//! let params = pattern.match_topic("devices/sensor_7/temp/raw").unwrap();
//! assert_eq!(params.get_single("device_id"), Some("sensor_7"));
//! let path: Vec<&str> = params
//!     .get_multi("path")
//!     .unwrap()
//!     .iter()
//!     .map(|level| level.as_str())
//!     .collect();
//! assert_eq!(path, ["temp", "raw"]);
//!
//! // No match is `None`, not an error
//! assert!(pattern.match_topic("other/sensor_7").is_none());
//!
//! // And back again
//! let params = ParameterMap::new()
//!     .with_single("device_id", "sensor_7")
//!     .with_multi("path", ["status"]);
//! assert_eq!(pattern.format_topic(&params)?, "devices/sensor_7/status");
//! # Ok::<(), mqtt_topic_pattern::TopicError>(())
//! ```
//!
//! A compiled [`TopicPatternPath`] is immutable and can be shared between
//! threads freely.

#![warn(missing_docs)]

pub mod topic;

// === Core Public API ===
pub use topic::{
	ParamExtractor, ParamValue, ParameterMap, TopicError, TopicFormatError,
	TopicMatch, TopicPatternError, TopicPatternItem, TopicPatternPath,
};

/// Result type alias for operations that may fail with TopicError
pub type Result<T> = std::result::Result<T, TopicError>;

/// Compiles a topic pattern.
///
/// Shorthand for [`TopicPatternPath::new`].
pub fn compile(
	pattern: impl Into<arcstr::ArcStr>,
) -> std::result::Result<TopicPatternPath, TopicPatternError> {
	TopicPatternPath::new(pattern)
}

/// Prelude module for convenient imports
///
/// ```rust
/// use mqtt_topic_pattern::prelude::*;
/// ```
pub mod prelude {
	pub use crate::{
		ParamValue, ParameterMap, Result, TopicError, TopicPatternError,
		TopicPatternPath, compile,
	};
}

/// Building blocks of the compiler, for callers that want to drive the
/// phases themselves.
///
/// ```rust
/// use mqtt_topic_pattern::advanced::*;
/// ```
pub mod advanced {
	pub use crate::topic::topic_pattern_item::SEGMENT_CLASS;
	pub use crate::topic::topic_pattern_path::{
		build_matcher, matcher_expression, tokenize,
	};
	pub use crate::{ParamExtractor, TopicMatch, TopicPatternItem};
}

/// Error types used throughout the library
///
/// ```rust
/// use mqtt_topic_pattern::errors::*;
/// ```
pub mod errors {
	pub use crate::topic::{FormatResult, PatternResult, TopicResult};
	pub use crate::{TopicError, TopicFormatError, TopicPatternError};
}
