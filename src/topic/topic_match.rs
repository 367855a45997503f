#![allow(missing_docs)]

use std::fmt;
use std::slice::Iter;

use arcstr::{ArcStr, Substr};
use regex::Captures;
use smallvec::SmallVec;

use super::topic_params::{ParamValue, ParameterMap};
use super::topic_pattern_item::TopicPatternItem;

/// Raw result of a successful match: one capture per wildcard, in pattern
/// order, each a view into the matched topic.
#[derive(Clone)]
pub struct TopicMatch {
	topic: ArcStr,
	captures: SmallVec<[Substr; 4]>,
}

impl TopicMatch {
	pub(crate) fn from_captures(topic: &ArcStr, captures: &Captures<'_>) -> Self {
		// Group 0 is the whole match.
		let captures = captures
			.iter()
			.skip(1)
			.map(|group| match group {
				| Some(group) => topic.substr(group.range()),
				| None => topic.substr(0 .. 0),
			})
			.collect();
		Self {
			topic: topic.clone(),
			captures,
		}
	}

	/// The topic this match was produced from.
	pub fn topic(&self) -> &ArcStr {
		&self.topic
	}

	/// Returns the capture of the wildcard at `index` (counting wildcards
	/// only).
	pub fn get(&self, index: usize) -> Option<&Substr> {
		self.captures.get(index)
	}

	pub fn iter(&self) -> Iter<'_, Substr> {
		self.captures.iter()
	}

	pub fn len(&self) -> usize {
		self.captures.len()
	}

	pub fn is_empty(&self) -> bool {
		self.captures.is_empty()
	}
}

impl fmt::Debug for TopicMatch {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TopicMatch {{ topic: {}, captures: [", self.topic)?;
		for (i, capture) in self.captures.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{capture:?}")?;
		}
		write!(f, "] }}")
	}
}

impl fmt::Display for TopicMatch {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Match({})", self.topic)?;

		if !self.captures.is_empty() {
			write!(f, " with {} captures", self.captures.len())?;
		}

		Ok(())
	}
}

/// Turns the captures of a [`TopicMatch`] into a [`ParameterMap`].
///
/// Holds the wildcard items of a pattern in order; the n-th of them owns the
/// n-th capture group.
#[derive(Debug, Clone)]
pub struct ParamExtractor {
	capture_items: SmallVec<[TopicPatternItem; 4]>,
}

impl ParamExtractor {
	/// Prepares an extractor for the given pattern items.
	pub fn new(items: &[TopicPatternItem]) -> Self {
		Self {
			capture_items: items
				.iter()
				.filter(|item| item.is_wildcard())
				.cloned()
				.collect(),
		}
	}

	/// Number of capture groups the extractor expects.
	pub fn capture_count(&self) -> usize {
		self.capture_items.len()
	}

	/// Builds the parameter map for a match.
	///
	/// A missing match yields an empty map. Unnamed wildcards are skipped.
	pub fn extract(&self, topic_match: Option<&TopicMatch>) -> ParameterMap {
		let mut params = ParameterMap::new();
		let Some(topic_match) = topic_match else {
			return params;
		};

		for (item, capture) in self.capture_items.iter().zip(topic_match.iter())
		{
			match item {
				| TopicPatternItem::Plus(name) if !name.is_empty() => {
					params.insert(
						name.clone(),
						ParamValue::Single(strip_trailing_slash(capture)),
					);
				}
				| TopicPatternItem::Hash(name) if !name.is_empty() => {
					params.insert(
						name.clone(),
						ParamValue::Multi(split_levels(capture)),
					);
				}
				| TopicPatternItem::Plus(_)
				| TopicPatternItem::Hash(_)
				| TopicPatternItem::Str(_) => {}
			}
		}
		params
	}
}

fn strip_trailing_slash(capture: &Substr) -> Substr {
	match capture.strip_suffix('/') {
		| Some(value) => capture.substr(.. value.len()),
		| None => capture.clone(),
	}
}

fn split_levels(capture: &Substr) -> Vec<Substr> {
	let mut levels: Vec<Substr> =
		capture.split('/').map(|s| capture.substr_from(s)).collect();
	// A trailing slash leaves one empty level behind; a zero-level capture
	// leaves exactly that one.
	if levels.last().is_some_and(|level| level.is_empty()) {
		levels.pop();
	}
	levels
}
