//! Documentation queries over a standard library declaration index.
//!
//! The index is an opaque engine reached through [`engine::RawEngine`]. [`index::Index`] wraps it
//! in typed calls, and [`DocsSession`] builds name resolution, alias unwinding, member listings,
//! Markdown rendering and search on top. The library is UI-agnostic; the `stddoc` binary is one
//! frontend.
//!
//! The only engine shipped here is [`TableEngine`], which reads stddoc's own snapshot files: a
//! declaration table serialized as JSON or bincode. It does not load the compiler's compiled
//! documentation index. Querying that artifact needs a [`RawEngine`] implementation supplied by
//! the caller and passed to [`DocsSession::new`].

/// Raw engine boundary and the snapshot-backed engine.
pub mod engine;

/// Typed call surface over a loaded engine.
pub mod index;

/// Markdown rendering of declarations.
pub mod render;

/// Core API for documentation queries.
pub mod core_api;

pub use crate::core_api::{
	Builtin, DocsConfig, DocsError, DocsSession, KeywordOutcome, Member, RankedBuiltin, Resolved, Result, SearchHit, Strategy,
	Unwound,
};
pub use crate::engine::{RawEngine, Snapshot, TableEngine};
pub use crate::index::{Category, CategorySet, Handle, Index};
pub use crate::render::{RenderedDocument, Renderer};
