//! Named parameter values extracted from (or formatted into) topics

use std::collections::HashMap;
use std::fmt;

use arcstr::Substr;
use smallvec::SmallVec;

/// Value captured by a named wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
	/// Value of a single-level `+name` wildcard
	Single(Substr),
	/// Topic levels consumed by a multi-level `#name` wildcard, in order.
	/// Empty when the wildcard matched nothing.
	Multi(Vec<Substr>),
}

impl ParamValue {
	/// Creates a single-level value.
	pub fn single(value: impl Into<Substr>) -> Self {
		Self::Single(value.into())
	}

	/// Creates a multi-level value from its levels.
	pub fn multi<I, S>(levels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Substr>,
	{
		Self::Multi(levels.into_iter().map(Into::into).collect())
	}

	/// Returns the value of a single-level capture.
	pub fn as_single(&self) -> Option<&str> {
		match self {
			| ParamValue::Single(value) => Some(value.as_str()),
			| ParamValue::Multi(_) => None,
		}
	}

	/// Returns the levels of a multi-level capture.
	pub fn as_multi(&self) -> Option<&[Substr]> {
		match self {
			| ParamValue::Multi(levels) => Some(levels),
			| ParamValue::Single(_) => None,
		}
	}

	/// Returns true for multi-level values.
	pub fn is_multi(&self) -> bool {
		matches!(self, ParamValue::Multi(_))
	}
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			| ParamValue::Single(value) => write!(f, "{value}"),
			| ParamValue::Multi(levels) => {
				for (i, level) in levels.iter().enumerate() {
					if i > 0 {
						f.write_str("/")?;
					}
					f.write_str(level)?;
				}
				Ok(())
			}
		}
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::single(value)
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::single(value)
	}
}

impl From<Substr> for ParamValue {
	fn from(value: Substr) -> Self {
		Self::Single(value)
	}
}

impl<S: Into<Substr>> From<Vec<S>> for ParamValue {
	fn from(levels: Vec<S>) -> Self {
		Self::multi(levels)
	}
}

/// Mapping from wildcard name to captured value.
///
/// Entries keep the order in which names were first inserted, which for an
/// extracted map is the order of the wildcards in the pattern. Inserting an
/// existing name replaces its value in place. Equality ignores that order.
#[derive(Debug, Clone, Default)]
pub struct ParameterMap {
	entries: SmallVec<[(Substr, ParamValue); 4]>,
}

impl PartialEq for ParameterMap {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len()
			&& self
				.iter()
				.all(|(name, value)| other.get(name) == Some(value))
	}
}

impl Eq for ParameterMap {}

impl ParameterMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a value, returning the previous value stored under `name`.
	pub fn insert(
		&mut self,
		name: impl Into<Substr>,
		value: impl Into<ParamValue>,
	) -> Option<ParamValue> {
		let name = name.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(n, _)| *n == name) {
			| Some((_, slot)) => Some(std::mem::replace(slot, value)),
			| None => {
				self.entries.push((name, value));
				None
			}
		}
	}

	/// Builder form of [`insert`](Self::insert) for a single-level value.
	pub fn with_single(
		mut self,
		name: impl Into<Substr>,
		value: impl Into<Substr>,
	) -> Self {
		self.insert(name, ParamValue::single(value));
		self
	}

	/// Builder form of [`insert`](Self::insert) for a multi-level value.
	pub fn with_multi<I, S>(mut self, name: impl Into<Substr>, levels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Substr>,
	{
		self.insert(name, ParamValue::multi(levels));
		self
	}

	/// Returns the value stored under `name`.
	pub fn get(&self, name: &str) -> Option<&ParamValue> {
		self.entries
			.iter()
			.find(|(n, _)| n.as_str() == name)
			.map(|(_, value)| value)
	}

	/// Returns the single-level value stored under `name`.
	pub fn get_single(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(ParamValue::as_single)
	}

	/// Returns the multi-level value stored under `name`.
	pub fn get_multi(&self, name: &str) -> Option<&[Substr]> {
		self.get(name).and_then(ParamValue::as_multi)
	}

	/// Returns true if a value is stored under `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(name, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value))
	}

	/// Iterates over the stored names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(name, _)| name.as_str())
	}
}

impl<K, V> FromIterator<(K, V)> for ParameterMap
where
	K: Into<Substr>,
	V: Into<ParamValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = ParameterMap::new();
		for (name, value) in iter {
			params.insert(name, value);
		}
		params
	}
}

impl IntoIterator for ParameterMap {
	type Item = (Substr, ParamValue);
	type IntoIter = smallvec::IntoIter<[(Substr, ParamValue); 4]>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl<'a> IntoIterator for &'a ParameterMap {
	type Item = &'a (Substr, ParamValue);
	type IntoIter = std::slice::Iter<'a, (Substr, ParamValue)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl From<ParameterMap> for HashMap<String, ParamValue> {
	fn from(params: ParameterMap) -> Self {
		params
			.into_iter()
			.map(|(name, value)| (name.to_string(), value))
			.collect()
	}
}

impl fmt::Display for ParameterMap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{")?;
		for (i, (name, value)) in self.entries.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			match value {
				| ParamValue::Single(_) => write!(f, "{name}: {value}")?,
				| ParamValue::Multi(_) => write!(f, "{name}: [{value}]")?,
			}
		}
		write!(f, "}}")
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for ParameterMap {
	fn serialize<S: serde::Serializer>(
		&self,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		use serde::ser::SerializeMap;

		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (name, value) in &self.entries {
			map.serialize_entry(name.as_str(), value)?;
		}
		map.end()
	}
}
