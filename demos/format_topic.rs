//! # Formatting topics
//!
//! Builds a concrete topic from parameter values and matches it back.

mod shared;

use mqtt_topic_pattern::{ParameterMap, TopicPatternPath};

fn main() -> Result<(), Box<dyn std::error::Error>> {
	shared::tracing::setup(None);

	let pattern = TopicPatternPath::new("+foo/bar/#baz")?;
	let params = ParameterMap::new()
		.with_single("foo", "1")
		.with_multi("baz", ["2", "3"]);

	let topic = pattern.format_topic(&params)?;
	println!("{pattern} with {params} -> {topic}");
	println!("subscribe with: {}", pattern.mqtt_pattern());

	match pattern.match_topic(topic.as_str()) {
		| Some(matched) if matched == params => println!("round trip ok"),
		| Some(matched) => println!("round trip changed values: {matched}"),
		| None => println!("formatted topic does not match its pattern"),
	}
	Ok(())
}
