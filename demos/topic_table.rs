//! # Topic table
//!
//! Compiles a set of patterns and runs sample topics against each, printing
//! the assembled matcher, the raw captures and the extracted parameters.
//!
//! Pass a pattern followed by topics to try your own:
//!
//! ```bash
//! cargo run --example topic_table -- "sensors/+room/#path" sensors/kitchen/temp
//! ```

mod shared;

use mqtt_topic_pattern::{TopicPatternError, compile};

const TABLE: &[(&str, &str, &[&str])] = &[
	("basic", "foo/bar/baz", &["foo/bar/baz", "foo/bar"]),
	("single_1", "foo/+bar/baz", &["foo/bar/baz", "foo/bar"]),
	("single_2", "foo/bar/+baz", &["foo/bar/baz", "foo/bar"]),
	("multi_1", "foo/#bar", &["foo/bar/baz", "foo/bar", "foo"]),
	(
		"multi_2",
		"foo/bar/#baz",
		&["foo/bar/baz", "foo/bar/fizz/baz", "foo/baz"],
	),
	(
		"complex_1",
		"foo/+baz/#bar",
		&["foo/bar/baz", "foo/bar/baz/fizz", "foo/bar"],
	),
];

fn run(name: &str, pattern: &str, topics: &[&str]) -> Result<(), TopicPatternError> {
	println!("Processing {name}: {pattern}");
	let compiled = compile(pattern)?;
	println!("  matcher: {}", compiled.matcher_source());

	for topic in topics {
		match compiled.exec(*topic) {
			| Some(topic_match) => {
				let captures: Vec<&str> =
					topic_match.iter().map(|c| c.as_str()).collect();
				let params = compiled.extractor().extract(Some(&topic_match));
				println!("  {topic:<20} captures={captures:?} params={params}");
			}
			| None => println!("  {topic:<20} no match"),
		}
	}
	println!();
	Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	shared::tracing::setup(None);

	let args: Vec<String> = std::env::args().skip(1).collect();
	if let Some((pattern, topics)) = args.split_first() {
		let topics: Vec<&str> = topics.iter().map(String::as_str).collect();
		run("custom", pattern, &topics)?;
		return Ok(());
	}

	for (name, pattern, topics) in TABLE {
		run(name, pattern, topics)?;
	}

	// A `#` anywhere but last is the one pattern error
	if let Err(err) = compile("foo/#bar/baz") {
		tracing::warn!("{err}");
		println!("Rejected: {err}");
	}
	Ok(())
}
