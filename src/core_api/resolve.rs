//! Mapping user-typed names to declarations.
//!
//! The root module re-exports many items under paths shorter than where they are implemented,
//! so a name is tried in several spellings before giving up. Precedence, first hit wins:
//!
//! 1. empty input, the public alias, or the internal root segment: the root module itself;
//! 2. inputs that look like file paths: the file's root declaration;
//! 3. the direct spellings of the name (root-prefixed, alias-prefixed, raw, as applicable);
//! 4. for a single item below the root, the item inside a snake_case submodule named after it;
//! 5. the remaining path appended to each configured common submodule.
//!
//! Steps 4 and 5 only run for user-facing spellings; internal-root paths are taken literally.

use serde::Serialize;
use tracing::debug;

use super::config::DocsConfig;
use crate::engine::RawEngine;
use crate::index::{Handle, Index, IndexResult};

/// Which resolution step produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
	/// The request named the root module.
	Root,
	/// The request was a source file path.
	FilePath,
	/// One of the direct spellings resolved.
	Direct,
	/// The item lives in a submodule named after it.
	SubmoduleGuess,
	/// The item lives in one of the common submodules.
	CommonSubmodule,
}

/// A successfully resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
	/// Declaration reached by the request; may still be an alias.
	pub handle: Handle,
	/// Step that produced the match.
	pub strategy: Strategy,
	/// Spelling that the index accepted.
	pub matched: String,
	/// Name to show the user for this request.
	pub title: String,
}

impl Resolved {
	/// Whether the request named the root module.
	pub fn is_root(&self) -> bool {
		self.strategy == Strategy::Root
	}
}

/// How a request is anchored.
enum Shape<'a> {
	/// No root prefix.
	Unprefixed(&'a str),
	/// Starts with the public alias; holds the remainder.
	AliasPrefixed(&'a str),
	/// Starts with the internal root segment.
	RootPrefixed,
}

impl<'a> Shape<'a> {
	fn of(name: &'a str, config: &DocsConfig) -> Self {
		let prefixed = |prefix: &str| name.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('.'));
		if prefixed(config.internal_root()).is_some() {
			Self::RootPrefixed
		} else if let Some(rest) = prefixed(config.public_alias()) {
			Self::AliasPrefixed(rest)
		} else {
			Self::Unprefixed(name)
		}
	}

	/// Path below the root for user-facing spellings.
	fn rest(&self) -> Option<&'a str> {
		match self {
			Self::Unprefixed(rest) | Self::AliasPrefixed(rest) => Some(rest),
			Self::RootPrefixed => None,
		}
	}
}

/// Guess the snake_case submodule name implementing a CamelCase item.
pub fn snake_case(ident: &str) -> String {
	let chars: Vec<char> = ident.chars().collect();
	let mut out = String::with_capacity(ident.len() + 4);
	for (i, &c) in chars.iter().enumerate() {
		if !c.is_uppercase() {
			out.push(c);
			continue;
		}
		let boundary = match i.checked_sub(1).map(|p| chars[p]) {
			Some(prev) if prev.is_lowercase() || prev.is_ascii_digit() => true,
			Some(prev) if prev.is_uppercase() => chars.get(i + 1).is_some_and(|next| next.is_lowercase()),
			_ => false,
		};
		if boundary && !out.ends_with('_') {
			out.push('_');
		}
		out.extend(c.to_lowercase());
	}
	out
}

fn looks_like_file(name: &str) -> bool {
	name.contains('/') || name.ends_with(".zig")
}

/// Probe spellings in order and return the first that the index knows.
fn probe<E: RawEngine>(index: &mut Index<E>, candidates: &[String]) -> IndexResult<Option<(Handle, String)>> {
	for candidate in candidates {
		if let Some(handle) = index.find_declaration(candidate)? {
			debug!(candidate = %candidate, handle = handle.index(), "resolved");
			return Ok(Some((handle, candidate.clone())));
		}
		debug!(candidate = %candidate, "no match");
	}
	Ok(None)
}

/// Resolve a user-typed name. `None` means no spelling matched.
pub fn resolve<E: RawEngine>(index: &mut Index<E>, config: &DocsConfig, input: &str) -> IndexResult<Option<Resolved>> {
	let name = input.trim().trim_matches('.');
	let alias = config.public_alias();
	let root = config.internal_root();

	if name.is_empty() || name == alias || name == root {
		let handle = match index.module_root_named(root)? {
			Some(handle) => Some(handle),
			None => index.module_root_named(alias)?,
		};
		return Ok(handle.map(|handle| Resolved {
			handle,
			strategy: Strategy::Root,
			matched: root.to_string(),
			title: alias.to_string(),
		}));
	}

	if looks_like_file(name)
		&& let Some(handle) = index.file_root(name)?
	{
		let fqn = index.fully_qualified_name(handle)?;
		return Ok(Some(Resolved {
			handle,
			strategy: Strategy::FilePath,
			matched: name.to_string(),
			title: config.public_name(&fqn),
		}));
	}

	let shape = Shape::of(name, config);
	let direct = match shape {
		Shape::Unprefixed(rest) => vec![format!("{root}.{rest}"), format!("{alias}.{rest}"), name.to_string()],
		Shape::AliasPrefixed(rest) => vec![format!("{root}.{rest}"), name.to_string()],
		Shape::RootPrefixed => vec![name.to_string()],
	};

	let Some(rest) = shape.rest() else {
		let hit = probe(index, &direct)?;
		return finish(index, config, hit, Strategy::Direct, None);
	};
	// Single items directly below the root keep their short name as the title.
	let short_title = (!rest.contains('.')).then(|| format!("{alias}.{rest}"));

	if let Some(hit) = probe(index, &direct)? {
		return finish(index, config, Some(hit), Strategy::Direct, short_title);
	}

	if short_title.is_some() {
		let module = snake_case(rest);
		if module != rest {
			let guesses = [format!("{root}.{module}.{rest}"), format!("{alias}.{module}.{rest}")];
			if let Some(hit) = probe(index, &guesses)? {
				return finish(index, config, Some(hit), Strategy::SubmoduleGuess, short_title);
			}
		}
	}

	let common: Vec<String> = config
		.submodules()
		.iter()
		.map(|module| format!("{root}.{module}.{rest}"))
		.collect();
	let hit = probe(index, &common)?;
	finish(index, config, hit, Strategy::CommonSubmodule, short_title)
}

fn finish<E: RawEngine>(
	index: &mut Index<E>,
	config: &DocsConfig,
	hit: Option<(Handle, String)>,
	strategy: Strategy,
	short_title: Option<String>,
) -> IndexResult<Option<Resolved>> {
	let Some((handle, matched)) = hit else {
		return Ok(None);
	};
	// The short title only fits spellings anchored at the root module.
	let anchored = |prefix: &str| matched.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('.'));
	let short_title = short_title.filter(|_| anchored(config.internal_root()) || anchored(config.public_alias()));
	let title = match short_title {
		Some(title) => title,
		None => config.public_name(&index.fully_qualified_name(handle)?),
	};
	Ok(Some(Resolved {
		handle,
		strategy,
		matched,
		title,
	}))
}
