use serde::{Deserialize, Serialize};

use crate::index::{Category, Handle};

/// One full-text search match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
	/// Declaration that matched; may be an alias.
	pub handle: Handle,
	/// Declared name of the match.
	pub name: String,
	/// Public fully qualified name.
	pub fqn: String,
	/// Category of the alias-unwound match.
	pub category: Category,
	/// Summary of the alias-unwound match.
	pub brief: String,
}

/// A builtin function description from the hand-written language reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Builtin {
	/// Name including the leading `@`.
	pub name: String,
	/// Prototype as written in the reference.
	#[serde(default)]
	pub signature: String,
	/// Plain-text description.
	#[serde(default)]
	pub description: String,
}

/// A builtin that matched a keyword query, with its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedBuiltin {
	/// Total score, match tier plus the length bonus.
	pub score: u32,
	/// The matched builtin.
	pub builtin: Builtin,
}

/// Result of a keyword query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordOutcome {
	/// The query was blank; the caller should prompt for a keyword.
	Usage,
	/// Matches in descending score order. May be empty.
	Matches(Vec<RankedBuiltin>),
}
