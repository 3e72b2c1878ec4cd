//! Member enumeration for namespaces, containers and type functions.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::alias::unwind;
use super::config::DocsConfig;
use super::search::ignore_case_for;
use crate::engine::RawEngine;
use crate::index::{Category, CategorySet, Handle, Index, IndexResult};
use crate::render::markup;

/// One child of a listed declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
	/// The child as reached from its parent; may be an alias.
	pub handle: Handle,
	/// Name the child was reached under.
	pub display_name: String,
	/// Category of the alias-unwound child.
	pub category: Category,
	/// First paragraph of the unwound child's documentation, as plain Markdown.
	pub brief_doc: String,
	/// Public fully qualified name of the child as reached.
	pub path: String,
}

/// Describe a child, unwinding aliases for its category and summary.
///
/// Children whose alias chain is broken or cyclic are skipped.
pub(crate) fn describe<E: RawEngine>(index: &mut Index<E>, config: &DocsConfig, child: Handle) -> IndexResult<Option<Member>> {
	let display_name = index.declared_name(child)?;
	let Some((target, category)) = unwind(index, child)?.concrete() else {
		debug!(member = %display_name, "skipping member with unresolvable alias");
		return Ok(None);
	};
	let brief_doc = markup::inline(&index.docs_html(target, true)?);
	let path = config.public_name(&index.fully_qualified_name(child)?);
	Ok(Some(Member {
		handle: child,
		display_name,
		category,
		brief_doc,
		path,
	}))
}

fn describe_all<E: RawEngine>(
	index: &mut Index<E>,
	config: &DocsConfig,
	children: Vec<Handle>,
	filter: CategorySet,
) -> IndexResult<Vec<Member>> {
	let mut members = Vec::with_capacity(children.len());
	for child in children {
		if let Some(member) = describe(index, config, child)?
			&& filter.admits(member.category)
		{
			members.push(member);
		}
	}
	Ok(members)
}

/// Children of `parent`, in engine order. Anything without members yields an empty list.
pub fn list_children<E: RawEngine>(
	index: &mut Index<E>,
	config: &DocsConfig,
	parent: Handle,
	filter: CategorySet,
) -> IndexResult<Vec<Member>> {
	let Some((concrete, category)) = unwind(index, parent)?.concrete().filter(|(_, category)| category.has_members()) else {
		return Ok(Vec::new());
	};
	let children = if category == Category::TypeFunction {
		index.type_function_members(concrete, config.include_private())?
	} else {
		index.namespace_members(concrete, config.include_private())?
	};
	describe_all(index, config, children, filter)
}

/// The items reachable directly under the public alias, sorted by name.
///
/// The public alias is not a namespace of its own, so the listing is assembled from a full-text
/// query for the alias, keeping declarations exactly one level below the internal root.
pub fn list_root<E: RawEngine>(index: &mut Index<E>, config: &DocsConfig, filter: CategorySet) -> IndexResult<Vec<Member>> {
	let alias = config.public_alias();
	let hits = index.run_query(alias, ignore_case_for(alias))?;

	let mut seen = HashSet::new();
	let mut top_level = Vec::new();
	for hit in hits {
		let fqn = index.fully_qualified_name(hit)?;
		let mut segments = fqn.split('.');
		let (Some(head), Some(name), None) = (segments.next(), segments.next(), segments.next()) else {
			continue;
		};
		if head == config.internal_root() && seen.insert(name.to_string()) {
			top_level.push(hit);
		}
	}

	if top_level.is_empty() {
		debug!(alias, "root query found nothing; listing root module members");
		if let Some(root) = index.module_root_named(config.internal_root())? {
			top_level = index.namespace_members(root, config.include_private())?;
		}
	}

	let mut members = describe_all(index, config, top_level, filter)?;
	members.sort_by(|a, b| a.display_name.cmp(&b.display_name));
	Ok(members)
}
