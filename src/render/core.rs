use std::fmt;

use super::items;
use super::markup;
use super::state::RenderState;
use crate::core_api::alias::unwind;
use crate::core_api::config::DocsConfig;
use crate::core_api::resolve::Resolved;
use crate::engine::RawEngine;
use crate::index::{Category, Index, IndexResult};

/// Markdown documentation for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
	title: String,
	markdown: String,
}

impl RenderedDocument {
	pub(crate) fn new(title: String, markdown: String) -> Self {
		Self { title, markdown }
	}

	/// Title shown in the heading.
	pub fn title(&self) -> &str {
		&self.title
	}

	/// The Markdown text.
	pub fn as_str(&self) -> &str {
		&self.markdown
	}

	/// Take the Markdown text.
	pub fn into_string(self) -> String {
		self.markdown
	}
}

impl fmt::Display for RenderedDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.markdown)
	}
}

/// Configurable renderer that turns a resolved declaration into Markdown.
#[derive(Debug, Clone)]
pub struct Renderer {
	/// Info string for fenced code blocks.
	code_language: String,
	/// Whether to emit Source sections.
	include_source: bool,
}

impl Default for Renderer {
	fn default() -> Self {
		Self {
			code_language: "zig".to_string(),
			include_source: false,
		}
	}
}

impl Renderer {
	/// Renderer matching a session configuration.
	pub fn from_config(config: &DocsConfig) -> Self {
		Self::default()
			.with_code_language(config.code_language())
			.with_source(config.include_source())
	}

	/// Set the fenced code block language.
	pub fn with_code_language(mut self, language: &str) -> Self {
		self.code_language = language.to_string();
		self
	}

	/// Enable or disable Source sections.
	pub fn with_source(mut self, include: bool) -> Self {
		self.include_source = include;
		self
	}

	/// Fenced code block language.
	pub fn code_language(&self) -> &str {
		&self.code_language
	}

	/// Whether Source sections are emitted.
	pub fn include_source(&self) -> bool {
		self.include_source
	}

	/// Render the declaration a request resolved to.
	///
	/// Aliases are rendered as their concrete target under the requested title. `None` means the
	/// alias chain led nowhere and there is nothing to document.
	pub fn render<E: RawEngine>(
		&self,
		index: &mut Index<E>,
		config: &DocsConfig,
		resolved: &Resolved,
	) -> IndexResult<Option<RenderedDocument>> {
		let mut state = RenderState::new(self, &resolved.title);

		if resolved.is_root() {
			state.block(&format!("*namespace* `{}`", config.public_alias()));
			state.block(&markup::prose(&index.docs_html(resolved.handle, false)?, self.code_language()));
			items::root_members(&mut state, index, config)?;
			return Ok(Some(state.finish()));
		}

		let Some((target, category)) = unwind(index, resolved.handle)?.concrete() else {
			return Ok(None);
		};

		let declared = index.declared_name(target)?;
		state.block(&format!("*{}* `{declared}`", category.label()));
		state.block(&markup::prose(&index.docs_html(target, false)?, self.code_language()));

		match category {
			Category::Namespace | Category::Container => {
				items::members(&mut state, index, config, target)?;
				items::fields(&mut state, index, target)?;
			}
			Category::Function | Category::TypeFunction => {
				items::signature(&mut state, index, target)?;
				items::params(&mut state, index, target)?;
				items::errors(&mut state, index, target)?;
				items::example(&mut state, index, target)?;
				if category == Category::TypeFunction {
					items::members(&mut state, index, config, target)?;
				}
				items::source(&mut state, index, target)?;
			}
			Category::ErrorSet => {
				items::errors(&mut state, index, target)?;
				items::source(&mut state, index, target)?;
			}
			Category::GlobalVariable | Category::GlobalConst | Category::Primitive | Category::Type | Category::TypeType => {
				items::source(&mut state, index, target)?;
			}
			Category::Alias => unreachable!("unwinding never yields an alias"),
		}

		Ok(Some(state.finish()))
	}
}
