use super::core::{RenderedDocument, Renderer};

/// Markdown being assembled for one declaration.
///
/// Sections with an empty body are dropped instead of rendered as bare headings.
pub struct RenderState<'a> {
	/// Renderer configuration.
	pub config: &'a Renderer,
	title: String,
	out: String,
}

impl<'a> RenderState<'a> {
	/// Start a document with its `# title` heading.
	pub fn new(config: &'a Renderer, title: &str) -> Self {
		Self {
			config,
			title: title.to_string(),
			out: format!("# {title}"),
		}
	}

	/// Append a block of text separated by a blank line.
	pub fn block(&mut self, text: &str) {
		let text = text.trim_end();
		if text.trim().is_empty() {
			return;
		}
		self.out.push_str("\n\n");
		self.out.push_str(text);
	}

	/// Append a `## heading` section unless `body` is empty.
	pub fn section(&mut self, heading: &str, body: &str) {
		if body.trim().is_empty() {
			return;
		}
		self.out.push_str("\n\n## ");
		self.out.push_str(heading);
		self.block(body);
	}

	/// Fenced code block in the configured language, or nothing for empty code.
	pub fn fenced(&self, code: &str) -> String {
		if code.trim().is_empty() {
			return String::new();
		}
		format!("```{}\n{}\n```", self.config.code_language(), code)
	}

	/// Finish the document.
	pub fn finish(mut self) -> RenderedDocument {
		self.out.push('\n');
		RenderedDocument::new(self.title, self.out)
	}
}

/// Indent every non-empty line of `text` by `width` spaces.
pub fn indent(text: &str, width: usize) -> String {
	let pad = " ".repeat(width);
	text.lines()
		.map(|line| if line.is_empty() { String::new() } else { format!("{pad}{line}") })
		.collect::<Vec<_>>()
		.join("\n")
}
