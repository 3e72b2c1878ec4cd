//! Pattern utilities for highlighting query matches in output.
//!
//! Query terms are matched literally; `|` stays available as an OR between alternatives.

use regex::{Regex, RegexBuilder};

/// Regex matching any whitespace-separated term of `query`, or `None` for a blank query.
///
/// Each `|`-separated piece of a term is an alternative of its own and matches literally,
/// so `"mem.eql|fmt*"` highlights `mem.eql` or `fmt*`. A leading `@` on a term is dropped so
/// builtin names highlight with or without it.
pub fn highlight_pattern(query: &str, ignore_case: bool) -> Option<Regex> {
	let alternatives: Vec<String> = query
		.split_whitespace()
		.flat_map(|term| term.split('|'))
		.map(|term| term.trim_start_matches('@'))
		.filter(|term| !term.is_empty())
		.map(regex::escape)
		.collect();
	if alternatives.is_empty() {
		return None;
	}
	RegexBuilder::new(&alternatives.join("|"))
		.case_insensitive(ignore_case)
		.build()
		.ok()
}
