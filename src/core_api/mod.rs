//! High-level documentation queries over one loaded index.
//!
//! [`DocsSession`] ties an [`Index`] to a [`DocsConfig`] and exposes the operations a frontend
//! needs: resolve a name, render its document, list its members, search, and enumerate modules.
//! Sessions are independent, so several index versions can be open side by side.

/// Alias chain unwinding.
pub mod alias;
/// Session configuration.
pub mod config;
/// Error helpers for the core API.
pub mod error;
/// Member enumeration.
pub mod members;
/// Pattern utilities for highlighting query matches.
pub mod pattern;
/// Name resolution.
pub mod resolve;
/// Full-text search and builtin keyword ranking.
pub mod search;

use std::path::Path;

use tracing::debug;

pub use self::alias::{Unwound, unwind};
pub use self::config::{DEFAULT_SUBMODULES, DocsConfig, INDEX_ENV};
pub use self::error::{DocsError, Result};
pub use self::members::Member;
pub use self::resolve::{Resolved, Strategy};
pub use self::search::{Builtin, KeywordOutcome, RankedBuiltin, SearchHit};
use crate::engine::{RawEngine, TableEngine};
use crate::index::{CategorySet, Index};
use crate::render::{RenderedDocument, Renderer};

/// One loaded index plus the settings used to query it.
///
/// Every operation takes `&mut self`: the engine stages inputs in shared scratch memory, so one
/// instance serves one caller at a time.
#[derive(Debug)]
pub struct DocsSession<E = TableEngine> {
	index: Index<E>,
	config: DocsConfig,
}

impl DocsSession<TableEngine> {
	/// Load a stddoc snapshot file (JSON or bincode) from disk.
	///
	/// This reads [`Snapshot`](crate::engine::Snapshot) files only. Other index formats go
	/// through [`DocsSession::new`] with their own [`RawEngine`] implementation.
	pub fn open(path: &Path, config: DocsConfig) -> Result<Self> {
		debug!(path = %path.display(), "opening index");
		Ok(Self::new(TableEngine::open(path)?, config))
	}
}

impl<E: RawEngine> DocsSession<E> {
	/// Wrap a ready engine instance.
	pub fn new(engine: E, config: DocsConfig) -> Self {
		Self {
			index: Index::new(engine),
			config,
		}
	}

	/// Active configuration.
	pub fn config(&self) -> &DocsConfig {
		&self.config
	}

	/// Typed access to the loaded index.
	pub fn index(&mut self) -> &mut Index<E> {
		&mut self.index
	}

	/// Resolve a user-typed name. `None` when no spelling matches.
	pub fn resolve(&mut self, name: &str) -> Result<Option<Resolved>> {
		Ok(resolve::resolve(&mut self.index, &self.config, name)?)
	}

	/// Render the document for a user-typed name.
	///
	/// `None` means no documentation was found: the name did not resolve, or it resolved to an
	/// alias whose chain is broken or cyclic.
	pub fn document(&mut self, name: &str) -> Result<Option<RenderedDocument>> {
		let Some(resolved) = self.resolve(name)? else {
			return Ok(None);
		};
		let renderer = Renderer::from_config(&self.config);
		Ok(renderer.render(&mut self.index, &self.config, &resolved)?)
	}

	/// List the members of a user-typed name. Unresolved names list nothing.
	pub fn members(&mut self, name: &str, filter: CategorySet) -> Result<Vec<Member>> {
		let Some(resolved) = self.resolve(name)? else {
			return Ok(Vec::new());
		};
		let members = if resolved.is_root() {
			members::list_root(&mut self.index, &self.config, filter)?
		} else {
			members::list_children(&mut self.index, &self.config, resolved.handle, filter)?
		};
		Ok(members)
	}

	/// Full-text search across the index.
	pub fn search(&mut self, query: &str) -> Result<Vec<SearchHit>> {
		Ok(search::search(&mut self.index, &self.config, query)?)
	}

	/// Names of every module in the index.
	pub fn modules(&mut self) -> Result<Vec<String>> {
		Ok(self.index.modules()?)
	}
}
