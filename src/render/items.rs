//! Section writers used by [`Renderer::render`](super::Renderer::render).

use super::markup;
use super::state::{RenderState, indent};
use crate::core_api::config::DocsConfig;
use crate::core_api::members::{Member, list_children, list_root};
use crate::engine::RawEngine;
use crate::index::{CategorySet, Handle, Index, IndexResult};

/// Member groups in rendering order.
const GROUPS: [(&str, CategorySet); 4] = [
	("Types", CategorySet::TYPES),
	("Namespaces", CategorySet::NAMESPACES),
	("Functions", CategorySet::FUNCTIONS),
	("Values", CategorySet::VALUES),
];

fn entry(member: &Member) -> String {
	if member.brief_doc.is_empty() {
		format!("- `{}`", member.display_name)
	} else {
		format!("- `{}` - {}", member.display_name, member.brief_doc)
	}
}

fn grouped(state: &mut RenderState<'_>, members: &[Member]) {
	for (heading, set) in GROUPS {
		let body = members
			.iter()
			.filter(|m| set.admits(m.category))
			.map(entry)
			.collect::<Vec<_>>()
			.join("\n");
		state.section(heading, &body);
	}
}

/// Categorized member breakdown of a namespace, container or type function.
pub fn members<E: RawEngine>(
	state: &mut RenderState<'_>,
	index: &mut Index<E>,
	config: &DocsConfig,
	target: Handle,
) -> IndexResult<()> {
	let members = list_children(index, config, target, CategorySet::all())?;
	grouped(state, &members);
	Ok(())
}

/// Categorized breakdown of the synthesized root listing.
pub fn root_members<E: RawEngine>(state: &mut RenderState<'_>, index: &mut Index<E>, config: &DocsConfig) -> IndexResult<()> {
	let members = list_root(index, config, CategorySet::all())?;
	grouped(state, &members);
	Ok(())
}

pub fn fields<E: RawEngine>(state: &mut RenderState<'_>, index: &mut Index<E>, target: Handle) -> IndexResult<()> {
	let mut lines = Vec::new();
	for field in index.fields(target)? {
		let code = markup::code(&index.field_html(target, field)?);
		let code = code.split_whitespace().collect::<Vec<_>>().join(" ");
		if !code.is_empty() {
			lines.push(format!("- `{code}`"));
		}
	}
	state.section("Fields", &lines.join("\n"));
	Ok(())
}

/// Fenced function prototype.
pub fn signature<E: RawEngine>(state: &mut RenderState<'_>, index: &mut Index<E>, target: Handle) -> IndexResult<()> {
	let code = markup::code(&index.signature_html(target, false)?);
	let fenced = state.fenced(&code);
	state.block(&fenced);
	Ok(())
}

pub fn params<E: RawEngine>(state: &mut RenderState<'_>, index: &mut Index<E>, target: Handle) -> IndexResult<()> {
	let mut lines = Vec::new();
	for param in index.params(target)? {
		let text = markup::inline(&index.param_html(target, param)?);
		// Keep positions aligned with the signature even when a parameter has no text.
		if text.is_empty() {
			lines.push("- *(unnamed)*".to_string());
		} else {
			lines.push(format!("- {text}"));
		}
	}
	state.section("Parameters", &lines.join("\n"));
	Ok(())
}

/// Errors of the declared error set, each with its description indented below the name.
pub fn errors<E: RawEngine>(state: &mut RenderState<'_>, index: &mut Index<E>, target: Handle) -> IndexResult<()> {
	let Some(set) = index.error_set(target)? else {
		return Ok(());
	};
	let owner = index.error_set_owner(target, set)?;
	let mut entries = Vec::new();
	for error in index.error_set_entries(target, set)? {
		let (name, body) = markup::definition(&index.error_html(owner, error)?, state.config.code_language());
		if name.is_empty() {
			continue;
		}
		let mut text = format!("- `{name}`");
		if !body.is_empty() {
			text.push('\n');
			text.push_str(&indent(&body, 2));
		}
		entries.push(text);
	}
	state.section("Errors", &entries.join("\n"));
	Ok(())
}

pub fn example<E: RawEngine>(state: &mut RenderState<'_>, index: &mut Index<E>, target: Handle) -> IndexResult<()> {
	let code = markup::code(&index.example_html(target)?);
	let fenced = state.fenced(&code);
	state.section("Example", &fenced);
	Ok(())
}

/// Source section, only when enabled on the renderer.
pub fn source<E: RawEngine>(state: &mut RenderState<'_>, index: &mut Index<E>, target: Handle) -> IndexResult<()> {
	if !state.config.include_source() {
		return Ok(());
	}
	let code = markup::code(&index.source_html(target)?);
	let fenced = state.fenced(&code);
	state.section("Source", &fenced);
	Ok(())
}
