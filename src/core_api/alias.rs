//! Alias unwinding.

use std::collections::HashSet;

use tracing::warn;

use crate::engine::RawEngine;
use crate::index::{Category, Handle, Index, IndexResult};

/// Outcome of following a chain of aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unwound {
	/// Reached a declaration that is not an alias.
	Concrete {
		/// The concrete declaration.
		handle: Handle,
		/// Its category, never [`Category::Alias`].
		category: Category,
	},
	/// An alias in the chain has no resolvable target.
	Dangling {
		/// The alias whose target lookup failed.
		alias: Handle,
	},
	/// The chain came back to a handle it had already visited.
	Cycle {
		/// The first revisited handle.
		at: Handle,
	},
}

impl Unwound {
	/// The concrete handle and category, if unwinding succeeded.
	pub fn concrete(self) -> Option<(Handle, Category)> {
		match self {
			Self::Concrete { handle, category } => Some((handle, category)),
			Self::Dangling { .. } | Self::Cycle { .. } => None,
		}
	}
}

/// Follow `handle` through aliases until a concrete declaration, a dead end, or a cycle.
pub fn unwind<E: RawEngine>(index: &mut Index<E>, handle: Handle) -> IndexResult<Unwound> {
	let mut visited = HashSet::new();
	let mut current = handle;
	loop {
		if !visited.insert(current) {
			warn!(start = handle.index(), at = current.index(), "alias cycle");
			return Ok(Unwound::Cycle { at: current });
		}
		match index.classify(current)? {
			(Category::Alias, Some(target)) => current = target,
			(Category::Alias, None) => {
				warn!(alias = current.index(), "alias target could not be resolved");
				return Ok(Unwound::Dangling { alias: current });
			}
			(category, _) => {
				return Ok(Unwound::Concrete {
					handle: current,
					category,
				});
			}
		}
	}
}
