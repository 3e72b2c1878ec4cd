use std::cmp::Reverse;
use std::path::Path;

use super::{Builtin, KeywordOutcome, RankedBuiltin};
use crate::core_api::error::{DocsError, Result};

/// Builtin list shipped with the binary.
pub const DEFAULT_BUILTINS: &str = include_str!("builtins.json");

const EXACT: u32 = 1000;
const PREFIX: u32 = 500;
const SUBSTRING: u32 = 300;

/// Parse a JSON array of builtin descriptions.
pub fn parse_builtins(json: &str) -> Result<Vec<Builtin>> {
	serde_json::from_str(json).map_err(|source| DocsError::Json {
		context: "builtin list".to_string(),
		source,
	})
}

/// The builtin list shipped with the binary.
pub fn default_builtins() -> Result<Vec<Builtin>> {
	parse_builtins(DEFAULT_BUILTINS)
}

/// Load a replacement builtin list from a JSON file.
pub fn load_builtins(path: &Path) -> Result<Vec<Builtin>> {
	let json = std::fs::read_to_string(path).map_err(|source| DocsError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	parse_builtins(&json)
}

fn comparable(name: &str) -> String {
	name.trim_start_matches('@').to_lowercase()
}

fn score(keyword: &str, builtin: &Builtin) -> Option<u32> {
	let name = comparable(&builtin.name);
	let tier = if name == keyword {
		EXACT
	} else if name.starts_with(keyword) {
		PREFIX
	} else if name.contains(keyword) {
		SUBSTRING
	} else {
		return None;
	};
	let bonus = 100 / (name.chars().count() as u32 + 1);
	Some(tier + bonus)
}

/// Rank builtins against a keyword: exact name, then prefix, then substring matches.
///
/// Shorter names win within a tier; equal scores are ordered by name.
pub fn rank_builtins(builtins: &[Builtin], query: &str) -> KeywordOutcome {
	let keyword = comparable(query.trim());
	if keyword.is_empty() {
		return KeywordOutcome::Usage;
	}

	let mut ranked: Vec<RankedBuiltin> = builtins
		.iter()
		.filter_map(|builtin| {
			score(&keyword, builtin).map(|score| RankedBuiltin {
				score,
				builtin: builtin.clone(),
			})
		})
		.collect();
	ranked.sort_by(|a, b| {
		(Reverse(a.score), &a.builtin.name).cmp(&(Reverse(b.score), &b.builtin.name))
	});
	KeywordOutcome::Matches(ranked)
}
