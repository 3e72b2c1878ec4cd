//! Session configuration.

use std::env;
use std::path::PathBuf;

use super::error::{DocsError, Result};

/// Environment variable naming the index snapshot to load.
pub const INDEX_ENV: &str = "STDDOC_INDEX";

/// Submodules probed, in order, when a short path matches nothing else.
pub const DEFAULT_SUBMODULES: &[&str] = &[
	"mem", "fmt", "fs", "io", "heap", "math", "meta", "debug", "process", "os", "posix", "json", "Thread",
];

/// Knobs shared by resolution, listing and rendering.
#[derive(Debug, Clone)]
pub struct DocsConfig {
	/// User-facing name of the root module.
	public_alias: String,
	/// First segment of every fully qualified name inside the index.
	internal_root: String,
	/// Whether listings include private members.
	include_private: bool,
	/// Whether rendered documents carry a Source section.
	include_source: bool,
	/// Info string used for fenced code blocks.
	code_language: String,
	/// Maximum number of full-text search hits returned.
	search_limit: usize,
	/// Submodules probed by the last-resort resolver step.
	submodules: Vec<String>,
}

impl Default for DocsConfig {
	fn default() -> Self {
		Self {
			public_alias: "std".to_string(),
			internal_root: "root".to_string(),
			include_private: false,
			include_source: false,
			code_language: "zig".to_string(),
			search_limit: 20,
			submodules: DEFAULT_SUBMODULES.iter().map(|s| (*s).to_string()).collect(),
		}
	}
}

impl DocsConfig {
	/// Default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the user-facing root module name.
	pub fn with_public_alias(mut self, alias: impl Into<String>) -> Self {
		self.public_alias = alias.into();
		self
	}

	/// Set the internal root segment.
	pub fn with_internal_root(mut self, root: impl Into<String>) -> Self {
		self.internal_root = root.into();
		self
	}

	/// Include private members in listings.
	pub fn with_private(mut self, include: bool) -> Self {
		self.include_private = include;
		self
	}

	/// Render Source sections.
	pub fn with_source(mut self, include: bool) -> Self {
		self.include_source = include;
		self
	}

	/// Set the fenced code block language.
	pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
		self.code_language = language.into();
		self
	}

	/// Cap the number of search hits.
	pub fn with_search_limit(mut self, limit: usize) -> Self {
		self.search_limit = limit;
		self
	}

	/// Replace the last-resort submodule list.
	pub fn with_submodules<I, S>(mut self, submodules: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.submodules = submodules.into_iter().map(Into::into).collect();
		self
	}

	/// User-facing root module name.
	pub fn public_alias(&self) -> &str {
		&self.public_alias
	}

	/// Internal root segment.
	pub fn internal_root(&self) -> &str {
		&self.internal_root
	}

	/// Whether listings include private members.
	pub fn include_private(&self) -> bool {
		self.include_private
	}

	/// Whether rendered documents carry a Source section.
	pub fn include_source(&self) -> bool {
		self.include_source
	}

	/// Fenced code block language.
	pub fn code_language(&self) -> &str {
		&self.code_language
	}

	/// Maximum number of search hits.
	pub fn search_limit(&self) -> usize {
		self.search_limit
	}

	/// Last-resort submodule list.
	pub fn submodules(&self) -> &[String] {
		&self.submodules
	}

	/// Rewrite an internal FQN into its user-facing form.
	pub fn public_name(&self, fqn: &str) -> String {
		if fqn == self.internal_root {
			return self.public_alias.clone();
		}
		match fqn
			.strip_prefix(self.internal_root.as_str())
			.and_then(|rest| rest.strip_prefix('.'))
		{
			Some(rest) => format!("{}.{rest}", self.public_alias),
			None => fqn.to_string(),
		}
	}
}

/// Locate the index snapshot: explicit path, then [`INDEX_ENV`], then the user data directory.
pub fn index_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
	if let Some(path) = explicit {
		return Ok(path);
	}

	if let Ok(path) = env::var(INDEX_ENV)
		&& !path.trim().is_empty()
	{
		return Ok(PathBuf::from(path));
	}

	let data = dirs::data_dir()
		.ok_or_else(|| DocsError::Config(format!("could not determine a data directory; pass --index or set {INDEX_ENV}")))?;
	Ok(data.join("stddoc").join("index.json"))
}
