//! MQTT topic pattern item types and functionality

use std::borrow::Cow;

use arcstr::Substr;
use thiserror::Error;

macro_rules! segment_class {
	() => {
		"[0-9A-Za-z_]"
	};
}

/// Characters a wildcard is allowed to consume within one topic level.
pub const SEGMENT_CLASS: &str = segment_class!();

const PLUS_MID: &str = concat!("(", segment_class!(), "+/)");
const PLUS_TAIL: &str = concat!("(", segment_class!(), "+/?)");
const HASH_MID: &str = concat!("((?:", segment_class!(), "+/)*)");
const HASH_TAIL: &str = concat!("((?:", segment_class!(), "+/?)*)");

/// Returns true if `value` can fill one wildcard level, i.e. it is a
/// non-empty run of [`SEGMENT_CLASS`] characters.
pub fn is_level_value(value: &str) -> bool {
	!value.is_empty()
		&& value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Error types for topic pattern compilation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicPatternError {
	/// Hash wildcard (#) used not at the end of the pattern
	#[error(
		"Invalid topic pattern '{pattern}': # wildcard can only be the last \
		 segment"
	)]
	HashPosition {
		/// The invalid pattern
		pattern: String,
	},

	/// The regex engine rejected the assembled matching expression
	#[error("Cannot build matcher for topic pattern '{pattern}': {details}")]
	Matcher {
		/// The pattern being compiled
		pattern: String,
		/// Error reported by the regex engine
		details: String,
	},
}

impl TopicPatternError {
	/// Creates a new HashPosition error
	pub fn hash_position(pattern: impl Into<String>) -> Self {
		Self::HashPosition {
			pattern: pattern.into(),
		}
	}

	/// Creates a new Matcher error
	pub fn matcher(
		pattern: impl Into<String>,
		details: impl Into<String>,
	) -> Self {
		Self::Matcher {
			pattern: pattern.into(),
			details: details.into(),
		}
	}
}

/// MQTT topic pattern segment: literal string or wildcard
///
/// Wildcard names are the segment text after the marker character and may be
/// empty, in which case the wildcard still matches but captures nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TopicPatternItem {
	/// Literal string segment
	Str(Substr),
	/// Single-level wildcard `+name`
	Plus(Substr),
	/// Multi-level wildcard `#name`, always the last segment
	Hash(Substr),
}

impl TopicPatternItem {
	/// Classifies one pattern segment.
	///
	/// `is_last` tells whether the segment terminates the pattern; a `#`
	/// segment anywhere else is rejected.
	pub fn classify(
		segment: Substr,
		is_last: bool,
	) -> Result<Self, TopicPatternError> {
		let item = match segment.as_bytes().first() {
			| Some(b'+') => TopicPatternItem::Plus(segment.substr(1 ..)),
			| Some(b'#') => {
				if !is_last {
					return Err(TopicPatternError::hash_position(
						segment.parent().as_str(),
					));
				}
				TopicPatternItem::Hash(segment.substr(1 ..))
			}
			| _ => TopicPatternItem::Str(segment),
		};
		Ok(item)
	}

	/// Returns the MQTT subscription form of the item (`+`, `#` or literal).
	pub fn as_str(&self) -> &str {
		match self {
			| TopicPatternItem::Str(s) => s,
			| TopicPatternItem::Plus(_) => "+",
			| TopicPatternItem::Hash(_) => "#",
		}
	}

	/// Returns the item as written in the pattern, marker and name included.
	pub fn as_pattern(&self) -> Cow<'_, str> {
		match self {
			| TopicPatternItem::Str(s) => Cow::Borrowed(s),
			| TopicPatternItem::Plus(name) => Cow::Owned(format!("+{name}")),
			| TopicPatternItem::Hash(name) => Cow::Owned(format!("#{name}")),
		}
	}

	/// Returns parameter name for named wildcards.
	pub fn param_name(&self) -> Option<&Substr> {
		match self {
			| TopicPatternItem::Plus(name) | TopicPatternItem::Hash(name)
				if !name.is_empty() =>
			{
				Some(name)
			}
			| _ => None,
		}
	}

	/// Returns true if this item is a wildcard (+ or #).
	pub fn is_wildcard(&self) -> bool {
		matches!(self, TopicPatternItem::Plus(_) | TopicPatternItem::Hash(_))
	}

	/// Matching fragment used when more segments follow this one.
	pub fn mid_fragment(&self) -> Cow<'static, str> {
		match self {
			| TopicPatternItem::Str(s) => {
				Cow::Owned(format!("{}/", regex::escape(s)))
			}
			| TopicPatternItem::Plus(_) => Cow::Borrowed(PLUS_MID),
			| TopicPatternItem::Hash(_) => Cow::Borrowed(HASH_MID),
		}
	}

	/// Matching fragment used at the end of the pattern, where the trailing
	/// slash is optional.
	pub fn tail_fragment(&self) -> Cow<'static, str> {
		match self {
			| TopicPatternItem::Str(s) => {
				Cow::Owned(format!("{}/?", regex::escape(s)))
			}
			| TopicPatternItem::Plus(_) => Cow::Borrowed(PLUS_TAIL),
			| TopicPatternItem::Hash(_) => Cow::Borrowed(HASH_TAIL),
		}
	}
}

impl From<&TopicPatternItem> for String {
	fn from(item: &TopicPatternItem) -> Self {
		item.as_pattern().into_owned()
	}
}

impl std::fmt::Display for TopicPatternItem {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_pattern())
	}
}
