//! Tests for TopicPatternPath functionality

use std::sync::Arc;

use arcstr::ArcStr;

use super::topic_pattern_path::{matcher_expression, tokenize};
use super::{
	ParameterMap, TopicFormatError, TopicPatternError, TopicPatternPath,
};

fn create_pattern(pattern: &str) -> TopicPatternPath {
	TopicPatternPath::new(pattern).expect("Pattern should be valid")
}

fn levels<'a>(params: &'a ParameterMap, name: &str) -> Vec<&'a str> {
	params
		.get_multi(name)
		.expect("Multi-level parameter should be present")
		.iter()
		.map(|level| level.as_str())
		.collect()
}

mod tokenize_tests {
	use super::*;

	#[test]
	fn test_splits_on_slash() {
		let pattern = ArcStr::from("foo/+bar/#baz");
		let segments: Vec<_> =
			tokenize(&pattern).iter().map(|s| s.to_string()).collect();
		assert_eq!(segments, ["foo", "+bar", "#baz"]);
	}

	#[test]
	fn test_keeps_empty_segments() {
		let pattern = ArcStr::from("/a//b/");
		let segments: Vec<_> =
			tokenize(&pattern).iter().map(|s| s.to_string()).collect();
		assert_eq!(segments, ["", "a", "", "b", ""]);
	}

	#[test]
	fn test_empty_pattern_is_one_segment() {
		let pattern = ArcStr::from("");
		assert_eq!(tokenize(&pattern).len(), 1);
	}
}

mod matcher_tests {
	use super::*;

	#[test]
	fn test_raw_pattern_source() {
		let pattern = create_pattern("foo/bar/baz");
		assert_eq!(pattern.matcher_source(), "^foo/bar/baz/?$");
	}

	#[test]
	fn test_single_wildcard_source() {
		let pattern = create_pattern("foo/+bar/baz");
		assert_eq!(
			pattern.matcher_source(),
			"^foo/([0-9A-Za-z_]+/)baz/?$"
		);
	}

	#[test]
	fn test_segment_before_hash_uses_tail_form() {
		let pattern = create_pattern("foo/#bar");
		assert_eq!(
			pattern.matcher_source(),
			"^foo/?((?:[0-9A-Za-z_]+/?)*)$"
		);

		let pattern = create_pattern("foo/+baz/#bar");
		assert_eq!(
			pattern.matcher_source(),
			"^foo/([0-9A-Za-z_]+/?)((?:[0-9A-Za-z_]+/?)*)$"
		);
	}

	#[test]
	fn test_matcher_expression_matches_compiled_source() {
		let pattern = create_pattern("a/+b/c/#d");
		assert_eq!(
			matcher_expression(pattern.slice()),
			pattern.matcher_source()
		);
		assert_eq!(pattern.matcher().as_str(), pattern.matcher_source());
	}

	#[test]
	fn test_empty_pattern_source() {
		let pattern = create_pattern("");
		assert_eq!(pattern.matcher_source(), "^/?$");
	}
}

mod match_tests {
	use super::*;

	#[test]
	fn test_raw_pattern_matches_itself() {
		for raw in ["foo", "foo/bar/baz", "a_1/B2/c3"] {
			let pattern = create_pattern(raw);

			let params = pattern.match_topic(raw).expect("Should match");
			assert!(params.is_empty());

			let params = pattern
				.match_topic(format!("{raw}/"))
				.expect("Trailing slash should match");
			assert!(params.is_empty());
		}
	}

	#[test]
	fn test_raw_pattern_rejects_other_topics() {
		let pattern = create_pattern("foo/bar/baz");

		assert!(pattern.match_topic("foo/bar").is_none());
		assert!(pattern.match_topic("foo/bar/baz/qux").is_none());
		assert!(pattern.match_topic("foo/bar/baz//").is_none());
		assert!(pattern.match_topic("xfoo/bar/baz").is_none());
	}

	#[test]
	fn test_single_wildcard_in_middle() {
		let pattern = create_pattern("foo/+bar/baz");

		let params = pattern.match_topic("foo/X/baz").unwrap();
		assert_eq!(params.len(), 1);
		assert_eq!(params.get_single("bar"), Some("X"));

		assert!(pattern.match_topic("foo/X").is_none());
		assert!(pattern.match_topic("foo//baz").is_none());
	}

	#[test]
	fn test_single_wildcard_last() {
		let pattern = create_pattern("foo/bar/+baz");

		let params = pattern.match_topic("foo/bar/baz").unwrap();
		assert_eq!(params.get_single("baz"), Some("baz"));

		// Trailing slash is stripped from the value
		let params = pattern.match_topic("foo/bar/qux/").unwrap();
		assert_eq!(params.get_single("baz"), Some("qux"));

		assert!(pattern.match_topic("foo/bar").is_none());
	}

	#[test]
	fn test_multi_wildcard_matches_parent() {
		let pattern = create_pattern("foo/#bar");

		let params = pattern.match_topic("foo").unwrap();
		assert!(levels(&params, "bar").is_empty());

		let params = pattern.match_topic("foo/").unwrap();
		assert!(levels(&params, "bar").is_empty());
	}

	#[test]
	fn test_multi_wildcard_collects_levels() {
		let pattern = create_pattern("foo/#bar");

		let params = pattern.match_topic("foo/bar").unwrap();
		assert_eq!(levels(&params, "bar"), ["bar"]);

		let params = pattern.match_topic("foo/a/b").unwrap();
		assert_eq!(levels(&params, "bar"), ["a", "b"]);

		let params = pattern.match_topic("foo/a/b/").unwrap();
		assert_eq!(levels(&params, "bar"), ["a", "b"]);
	}

	#[test]
	fn test_multi_wildcard_after_literals() {
		let pattern = create_pattern("foo/bar/#baz");

		let params = pattern.match_topic("foo/bar/fizz/baz").unwrap();
		assert_eq!(levels(&params, "baz"), ["fizz", "baz"]);

		let params = pattern.match_topic("foo/bar/baz").unwrap();
		assert_eq!(levels(&params, "baz"), ["baz"]);

		assert!(pattern.match_topic("foo/baz").is_none());
	}

	#[test]
	fn test_single_before_multi_may_stand_alone() {
		let pattern = create_pattern("foo/+baz/#bar");

		let params = pattern.match_topic("foo/bar").unwrap();
		assert_eq!(params.get_single("baz"), Some("bar"));
		assert!(levels(&params, "bar").is_empty());

		let params = pattern.match_topic("foo/bar/baz").unwrap();
		assert_eq!(params.get_single("baz"), Some("bar"));
		assert_eq!(levels(&params, "bar"), ["baz"]);

		let params = pattern.match_topic("foo/bar/baz/fizz").unwrap();
		assert_eq!(params.get_single("baz"), Some("bar"));
		assert_eq!(levels(&params, "bar"), ["baz", "fizz"]);

		assert_eq!(params.names().collect::<Vec<_>>(), ["baz", "bar"]);
	}

	#[test]
	fn test_unnamed_wildcards_match_without_params() {
		let pattern = create_pattern("foo/+/#");

		let params = pattern.match_topic("foo/a/b/c").unwrap();
		assert!(params.is_empty());

		let topic_match = pattern.exec("foo/a/b/c").unwrap();
		assert_eq!(topic_match.len(), 2);
		assert_eq!(topic_match.get(0).unwrap().as_str(), "a/");
		assert_eq!(topic_match.get(1).unwrap().as_str(), "b/c");
	}

	#[test]
	fn test_wildcards_only_consume_word_characters() {
		let pattern = create_pattern("foo/+bar");

		assert!(pattern.match_topic("foo/with-dash").is_none());
		assert!(pattern.match_topic("foo/caf\u{e9}").is_none());
		assert!(pattern.match_topic("foo/").is_none());
		assert!(pattern.match_topic("foo/under_score_9").is_some());
	}

	#[test]
	fn test_literals_are_not_regex() {
		let pattern = create_pattern("v1.0/+id");

		assert!(pattern.is_match("v1.0/abc"));
		assert!(!pattern.is_match("v1x0/abc"));

		let pattern = create_pattern("a(b)/c*");
		assert!(pattern.is_match("a(b)/c*"));
		assert!(!pattern.is_match("ab/c"));
	}

	#[test]
	fn test_empty_segments_are_literal() {
		let pattern = create_pattern("/foo");
		assert!(pattern.is_match("/foo"));
		assert!(!pattern.is_match("foo"));

		let pattern = create_pattern("a//+b");
		assert_eq!(
			pattern.match_topic("a//x").unwrap().get_single("b"),
			Some("x")
		);
		assert!(!pattern.is_match("a/x"));

		let pattern = create_pattern("");
		assert!(pattern.match_topic("").unwrap().is_empty());
		assert!(pattern.match_topic("/").unwrap().is_empty());
		assert!(pattern.match_topic("a").is_none());
	}

	#[test]
	fn test_repeated_names_keep_last_value() {
		let pattern = create_pattern("+a/+a");

		let params = pattern.match_topic("x/y").unwrap();
		assert_eq!(params.len(), 1);
		assert_eq!(params.get_single("a"), Some("y"));
	}

	#[test]
	fn test_match_is_idempotent() {
		let pattern = create_pattern("foo/+baz/#bar");

		let first = pattern.match_topic("foo/bar/baz/fizz");
		let second = pattern.match_topic("foo/bar/baz/fizz");
		assert_eq!(first, second);

		assert_eq!(pattern.match_topic("nope"), None);
		assert_eq!(pattern.match_topic("nope"), None);
	}

	#[test]
	fn test_shared_between_threads() {
		let pattern = Arc::new(create_pattern("sensors/+id/#path"));

		std::thread::scope(|scope| {
			for n in 0 .. 4 {
				let pattern = Arc::clone(&pattern);
				scope.spawn(move || {
					let topic = format!("sensors/s{n}/a/b");
					let params = pattern.match_topic(topic).unwrap();
					assert_eq!(
						params.get_single("id"),
						Some(format!("s{n}").as_str())
					);
					assert_eq!(levels(&params, "path"), ["a", "b"]);
				});
			}
		});
	}
}

mod compile_tests {
	use super::*;

	#[test]
	fn test_hash_must_be_last() {
		let result = TopicPatternPath::new("foo/#bar/baz_extra");
		assert_eq!(
			result.unwrap_err(),
			TopicPatternError::hash_position("foo/#bar/baz_extra")
		);

		assert!(TopicPatternPath::new("#/a").is_err());
		assert!(TopicPatternPath::new("a/#/").is_err());
	}

	#[test]
	fn test_hash_position_message() {
		let err = TopicPatternPath::new("a/#b/c").unwrap_err();
		assert_eq!(
			err.to_string(),
			"Invalid topic pattern 'a/#b/c': # wildcard can only be the last \
			 segment"
		);
	}

	#[test]
	fn test_no_other_syntax_is_rejected() {
		for pattern in ["", "/", "a//b", "+", "#", "a+/b#", "+x/+x", "é/ü"] {
			assert!(
				TopicPatternPath::new(pattern).is_ok(),
				"'{pattern}' should compile"
			);
		}
	}

	#[test]
	fn test_conversions() {
		let from_str: TopicPatternPath = "a/+b".parse().unwrap();
		let from_ref = TopicPatternPath::try_from("a/+b").unwrap();
		let from_string =
			TopicPatternPath::try_from(String::from("a/+b")).unwrap();
		let from_arc = TopicPatternPath::try_from(ArcStr::from("a/+b")).unwrap();

		for pattern in [from_str, from_ref, from_string, from_arc] {
			assert_eq!(pattern.matcher_source(), "^a/([0-9A-Za-z_]+/?)$");
		}

		assert!("x/#y/z".parse::<TopicPatternPath>().is_err());
	}

	#[test]
	fn test_introspection() {
		let pattern = create_pattern("sensors/+room/+/#path");

		assert_eq!(pattern.topic_pattern(), "sensors/+room/+/#path");
		assert_eq!(pattern.to_string(), "sensors/+room/+/#path");
		assert_eq!(pattern.mqtt_pattern(), "sensors/+/+/#");
		assert_eq!(pattern.len(), 4);
		assert!(!pattern.is_empty());
		assert!(pattern.contains_hash());
		assert_eq!(pattern.param_names().collect::<Vec<_>>(), ["room", "path"]);
		assert_eq!(pattern.extractor().capture_count(), 3);
		assert_eq!(
			pattern.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
			["sensors", "+room", "+", "#path"]
		);

		assert!(!create_pattern("a/+b").contains_hash());
	}

	#[test]
	fn test_clone_matches_the_same() {
		let pattern = create_pattern("a/+b/#c");
		let cloned = pattern.clone();

		assert_eq!(cloned.matcher_source(), pattern.matcher_source());
		assert_eq!(cloned.match_topic("a/x/y"), pattern.match_topic("a/x/y"));
	}
}

mod format_tests {
	use super::*;

	#[test]
	fn test_format_single_and_multi() {
		let pattern = create_pattern("+foo/bar/#baz");
		let params = ParameterMap::new()
			.with_single("foo", "1")
			.with_multi("baz", ["2", "3"]);

		assert_eq!(pattern.format_topic(&params).unwrap(), "1/bar/2/3");
	}

	#[test]
	fn test_format_empty_multi_drops_level() {
		let pattern = create_pattern("foo/#bar");
		let params = ParameterMap::new().with_multi("bar", Vec::<&str>::new());

		assert_eq!(pattern.format_topic(&params).unwrap(), "foo");
	}

	#[test]
	fn test_format_raw_pattern() {
		let pattern = create_pattern("/a//b");

		assert_eq!(
			pattern.format_topic(&ParameterMap::new()).unwrap(),
			"/a//b"
		);
	}

	#[test]
	fn test_format_ignores_extra_parameters() {
		let pattern = create_pattern("a/+b");
		let params = ParameterMap::new()
			.with_single("b", "x")
			.with_single("unused", "y");

		assert_eq!(pattern.format_topic(&params).unwrap(), "a/x");
	}

	#[test]
	fn test_format_missing_parameter() {
		let pattern = create_pattern("a/+b/c");

		assert_eq!(
			pattern.format_topic(&ParameterMap::new()),
			Err(TopicFormatError::MissingParameter {
				name: "b".to_string()
			})
		);
	}

	#[test]
	fn test_format_kind_mismatch() {
		let pattern = create_pattern("a/+b/#c");

		let params = ParameterMap::new()
			.with_multi("b", ["x"])
			.with_multi("c", ["y"]);
		assert_eq!(
			pattern.format_topic(&params),
			Err(TopicFormatError::KindMismatch {
				name: "b".to_string(),
				expected: "single-level",
			})
		);

		let params = ParameterMap::new()
			.with_single("b", "x")
			.with_single("c", "y");
		assert_eq!(
			pattern.format_topic(&params),
			Err(TopicFormatError::KindMismatch {
				name: "c".to_string(),
				expected: "multi-level",
			})
		);
	}

	#[test]
	fn test_format_unnamed_wildcard() {
		let pattern = create_pattern("a/+");

		assert_eq!(
			pattern.format_topic(&ParameterMap::new()),
			Err(TopicFormatError::UnnamedWildcard { position: 1 })
		);
	}

	#[test]
	fn test_format_rejects_value_with_slash() {
		let pattern = create_pattern("a/+b/c");
		let params = ParameterMap::new().with_single("b", "x/y");

		assert_eq!(
			pattern.format_topic(&params),
			Err(TopicFormatError::invalid_value("b", "x/y"))
		);
	}

	#[test]
	fn test_format_rejects_empty_single_value() {
		let pattern = create_pattern("a/+b/c");
		let params = ParameterMap::new().with_single("b", "");

		assert_eq!(
			pattern.format_topic(&params),
			Err(TopicFormatError::invalid_value("b", ""))
		);
	}

	#[test]
	fn test_format_rejects_characters_outside_level_class() {
		let pattern = create_pattern("a/+b/c");
		let params = ParameterMap::new().with_single("b", "x-y");

		assert_eq!(
			pattern.format_topic(&params),
			Err(TopicFormatError::invalid_value("b", "x-y"))
		);
	}

	#[test]
	fn test_format_rejects_empty_multi_level() {
		let pattern = create_pattern("a/#b");
		let params = ParameterMap::new().with_multi("b", ["x", ""]);

		assert_eq!(
			pattern.format_topic(&params),
			Err(TopicFormatError::invalid_value("b", ""))
		);

		let params = ParameterMap::new().with_multi("b", ["x", "y/z"]);
		assert_eq!(
			pattern.format_topic(&params),
			Err(TopicFormatError::invalid_value("b", "y/z"))
		);
	}

	#[test]
	fn test_format_then_match_ignores_insertion_order() {
		let pattern = create_pattern("+x/+y");
		let params = ParameterMap::new().with_single("y", "2").with_single("x", "1");

		let topic = pattern.format_topic(&params).unwrap();
		assert_eq!(topic, "1/2");
		assert_eq!(pattern.match_topic(topic), Some(params));
	}

	#[test]
	fn test_format_then_match_round_trip() {
		let pattern = create_pattern("+foo/bar/#baz");
		let params = ParameterMap::new()
			.with_single("foo", "1")
			.with_multi("baz", ["2", "3"]);

		let topic = pattern.format_topic(&params).unwrap();
		assert_eq!(pattern.match_topic(topic), Some(params));
	}
}
