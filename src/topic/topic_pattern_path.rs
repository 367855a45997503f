use std::slice::Iter;
use std::str::FromStr;

use arcstr::{ArcStr, Substr};
use regex::Regex;
use smallvec::SmallVec;
use thiserror::Error;

use super::topic_match::{ParamExtractor, TopicMatch};
use super::topic_params::{ParamValue, ParameterMap};
use super::topic_pattern_item::{
	TopicPatternError, TopicPatternItem, is_level_value,
};

/// Error types for formatting topics with parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicFormatError {
	/// No value was supplied for a named wildcard
	#[error("Missing value for parameter '{name}'")]
	MissingParameter {
		/// Name of the wildcard
		name: String,
	},

	/// Value kind does not fit the wildcard kind
	#[error("Parameter '{name}' expects a {expected} value")]
	KindMismatch {
		/// Name of the wildcard
		name: String,
		/// Expected kind: "single-level" or "multi-level"
		expected: &'static str,
	},

	/// Anonymous wildcards have no name to look a value up by
	#[error("Cannot format unnamed wildcard at segment {position}")]
	UnnamedWildcard {
		/// Segment index of the wildcard
		position: usize,
	},

	/// Value would not be matched back by the wildcard it fills
	#[error(
		"Invalid value '{value}' for parameter '{name}': expected a non-empty \
		 run of [0-9A-Za-z_]"
	)]
	InvalidValue {
		/// Name of the wildcard
		name: String,
		/// The rejected value or level
		value: String,
	},
}

impl TopicFormatError {
	/// Creates a new InvalidValue error
	pub fn invalid_value(
		name: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		Self::InvalidValue {
			name: name.into(),
			value: value.into(),
		}
	}
}

/// Splits a pattern into its `/`-separated segments, empty ones included.
pub fn tokenize(pattern: &ArcStr) -> Vec<Substr> {
	pattern.split('/').map(|s| pattern.substr_from(s)).collect()
}

/// Concatenates the fragments of `items` into an anchored expression.
///
/// The last item uses its tail fragment. So does the item right before a
/// trailing `#`, since the `#` may consume no levels at all.
pub fn matcher_expression(items: &[TopicPatternItem]) -> String {
	let hash_last = items
		.last()
		.is_some_and(|s| matches!(s, TopicPatternItem::Hash(_)));
	let mut expression = String::with_capacity(items.len() * 16 + 2);
	expression.push('^');
	for (i, item) in items.iter().enumerate() {
		let is_last = i + 1 == items.len();
		let before_hash = hash_last && i + 2 == items.len();
		if is_last || before_hash {
			expression.push_str(&item.tail_fragment());
		} else {
			expression.push_str(&item.mid_fragment());
		}
	}
	expression.push('$');
	expression
}

/// Compiles the matcher for `items`.
pub fn build_matcher(items: &[TopicPatternItem]) -> Result<Regex, regex::Error> {
	Regex::new(&matcher_expression(items))
}

/// Compiled topic pattern with named wildcard support
///
/// Pattern syntax: levels are separated by `/`, a level starting with `+` is
/// a single-level wildcard, a level starting with `#` is a multi-level
/// wildcard and must be the last one. The text after the marker is the
/// parameter name and may be empty.
///
/// Every pattern accepts topics with or without a trailing slash.
///
/// ```rust
/// use mqtt_topic_pattern::TopicPatternPath;
///
/// let pattern = TopicPatternPath::new("sensors/+room/#path")?;
/// let params = pattern.match_topic("sensors/kitchen/temp/1").unwrap();
/// assert_eq!(params.get_single("room"), Some("kitchen"));
/// assert_eq!(params.get_multi("path").unwrap().len(), 2);
/// # Ok::<(), mqtt_topic_pattern::TopicPatternError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TopicPatternPath {
	template_pattern: ArcStr, // original pattern "sensors/+room/#path"
	mqtt_topic_subscription: ArcStr, // broker filter "sensors/+/#"
	segments: Vec<TopicPatternItem>,
	matcher: Regex,
	extractor: ParamExtractor,
}

impl TopicPatternPath {
	/// Compiles a topic pattern.
	///
	/// Fails with [`TopicPatternError::HashPosition`] if a `#` wildcard is
	/// followed by more levels.
	pub fn new(
		topic_pattern: impl Into<ArcStr>,
	) -> Result<Self, TopicPatternError> {
		let topic_pattern = topic_pattern.into();

		let raw_segments = tokenize(&topic_pattern);
		let last = raw_segments.len() - 1;
		let segments: Result<Vec<_>, _> = raw_segments
			.into_iter()
			.enumerate()
			.map(|(i, s)| TopicPatternItem::classify(s, i == last))
			.collect();
		let segments = match segments {
			| Ok(segments) => segments,
			| Err(err) => {
				tracing::debug!(
					pattern = %topic_pattern,
					"Rejected topic pattern: {err}"
				);
				return Err(err);
			}
		};

		let matcher = build_matcher(&segments).map_err(|err| {
			TopicPatternError::matcher(topic_pattern.as_str(), err.to_string())
		})?;
		let extractor = ParamExtractor::new(&segments);

		tracing::debug!(
			pattern = %topic_pattern,
			matcher = matcher.as_str(),
			captures = extractor.capture_count(),
			"Compiled topic pattern"
		);

		Ok(Self {
			mqtt_topic_subscription: ArcStr::from(
				Self::to_mqtt_subscription_pattern(&segments),
			),
			template_pattern: topic_pattern,
			segments,
			matcher,
			extractor,
		})
	}

	/// Returns original pattern with named parameters.
	pub fn topic_pattern(&self) -> ArcStr {
		self.template_pattern.clone()
	}

	/// Returns MQTT pattern with anonymous wildcards for broker subscription.
	pub fn mqtt_pattern(&self) -> ArcStr {
		self.mqtt_topic_subscription.clone()
	}

	/// The compiled matching expression.
	pub fn matcher(&self) -> &Regex {
		&self.matcher
	}

	/// Source text of the matching expression, for logging and debugging.
	pub fn matcher_source(&self) -> &str {
		self.matcher.as_str()
	}

	/// The parameter extractor for this pattern.
	pub fn extractor(&self) -> &ParamExtractor {
		&self.extractor
	}

	/// Returns true if pattern has no segments.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Returns true if pattern ends with a multi-level wildcard (#).
	pub fn contains_hash(&self) -> bool {
		self.segments
			.last()
			.is_some_and(|s| matches!(s, TopicPatternItem::Hash(_)))
	}

	/// Returns iterator over pattern segments.
	pub fn iter(&self) -> Iter<'_, TopicPatternItem> {
		self.segments.iter()
	}

	/// Returns number of segments in pattern.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// Returns pattern segments as slice.
	pub fn slice(&self) -> &[TopicPatternItem] {
		&self.segments
	}

	/// Names of the named wildcards, in pattern order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.segments
			.iter()
			.filter_map(|s| s.param_name().map(Substr::as_str))
	}

	/// Returns true if `topic` satisfies the pattern.
	pub fn is_match(&self, topic: &str) -> bool {
		self.matcher.is_match(topic)
	}

	/// Runs the matcher alone, returning the raw captures.
	pub fn exec(&self, topic: impl Into<ArcStr>) -> Option<TopicMatch> {
		let topic = topic.into();
		let Some(captures) = self.matcher.captures(&topic) else {
			tracing::trace!(
				pattern = %self.template_pattern,
				topic = %topic,
				"Topic does not match"
			);
			return None;
		};
		Some(TopicMatch::from_captures(&topic, &captures))
	}

	/// Matches `topic` against this pattern, extracting parameters.
	///
	/// `None` means the topic does not match. A match without named
	/// wildcards yields an empty map.
	pub fn match_topic(&self, topic: impl Into<ArcStr>) -> Option<ParameterMap> {
		let topic_match = self.exec(topic)?;
		Some(self.extractor.extract(Some(&topic_match)))
	}

	/// Builds a topic from parameter values, the inverse of
	/// [`match_topic`](Self::match_topic).
	///
	/// Literal levels are copied, `+name` takes a single-level value and
	/// `#name` takes a multi-level value whose levels are joined with `/`.
	/// An empty multi-level value drops the trailing level entirely.
	///
	/// Every value (and every level of a multi-level value) must be a
	/// non-empty run of `[0-9A-Za-z_]`, so the result always matches back
	/// to the same parameters.
	pub fn format_topic(
		&self,
		params: &ParameterMap,
	) -> Result<String, TopicFormatError> {
		let mut levels: SmallVec<[&str; 8]> = SmallVec::new();

		for (position, segment) in self.segments.iter().enumerate() {
			match segment {
				| TopicPatternItem::Str(s) => levels.push(s.as_str()),
				| TopicPatternItem::Plus(name) => {
					match Self::lookup(params, name, position)? {
						| ParamValue::Single(value) => {
							if !is_level_value(value) {
								return Err(TopicFormatError::invalid_value(
									name.as_str(),
									value.as_str(),
								));
							}
							levels.push(value.as_str())
						}
						| ParamValue::Multi(_) => {
							return Err(TopicFormatError::KindMismatch {
								name: name.to_string(),
								expected: "single-level",
							});
						}
					}
				}
				| TopicPatternItem::Hash(name) => {
					match Self::lookup(params, name, position)? {
						| ParamValue::Multi(values) => {
							if let Some(bad) =
								values.iter().find(|v| !is_level_value(v))
							{
								return Err(TopicFormatError::invalid_value(
									name.as_str(),
									bad.as_str(),
								));
							}
							levels.extend(values.iter().map(Substr::as_str))
						}
						| ParamValue::Single(_) => {
							return Err(TopicFormatError::KindMismatch {
								name: name.to_string(),
								expected: "multi-level",
							});
						}
					}
				}
			}
		}

		Ok(levels.join("/"))
	}

	fn lookup<'a>(
		params: &'a ParameterMap,
		name: &Substr,
		position: usize,
	) -> Result<&'a ParamValue, TopicFormatError> {
		if name.is_empty() {
			return Err(TopicFormatError::UnnamedWildcard { position });
		}
		params
			.get(name)
			.ok_or_else(|| TopicFormatError::MissingParameter {
				name: name.to_string(),
			})
	}

	fn to_mqtt_subscription_pattern(segments: &[TopicPatternItem]) -> String {
		// Strip names: sensors/+room/#path -> sensors/+/#
		let mut mqtt_topic = String::new();
		segments.iter().enumerate().for_each(|(i, segment)| {
			if i > 0 {
				mqtt_topic.push('/');
			}
			mqtt_topic.push_str(segment.as_str());
		});
		mqtt_topic
	}
}

impl std::fmt::Display for TopicPatternPath {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.template_pattern)
	}
}

impl FromStr for TopicPatternPath {
	type Err = TopicPatternError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl TryFrom<String> for TopicPatternPath {
	type Error = TopicPatternError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl TryFrom<&str> for TopicPatternPath {
	type Error = TopicPatternError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl TryFrom<ArcStr> for TopicPatternPath {
	type Error = TopicPatternError;

	fn try_from(value: ArcStr) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
