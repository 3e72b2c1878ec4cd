//! Conversion of engine-supplied HTML fragments into Markdown.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

fn compile(pattern: &str) -> Regex {
	Regex::new(pattern).expect("markup pattern is valid")
}

static PRE: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<pre[^>]*>(.*?)</pre>"));
static BREAK: Lazy<Regex> = Lazy::new(|| compile(r"(?i)<br\s*/?>"));
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| compile(r"(?i)</?p(\s[^>]*)?>"));
static LIST: Lazy<Regex> = Lazy::new(|| compile(r"(?i)</?(ul|ol)(\s[^>]*)?>"));
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| compile(r"(?i)<li(\s[^>]*)?>"));
static HEADING: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]>"));
static CODE: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<code[^>]*>(.*?)</code>"));
static STRONG: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<(?:strong|b)(?:\s[^>]*)?>(.*?)</(?:strong|b)>"));
static EMPHASIS: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<(?:em|i)(?:\s[^>]*)?>(.*?)</(?:em|i)>"));
static LINK: Lazy<Regex> = Lazy::new(|| compile(r#"(?is)<a\s[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#));
static TAG: Lazy<Regex> = Lazy::new(|| compile(r"(?s)<[^>]+>"));
static ENTITY: Lazy<Regex> = Lazy::new(|| compile(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);"));
static SPACES: Lazy<Regex> = Lazy::new(|| compile(r"[ \t\r\x0C]+"));
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| compile("\u{1}([0-9]+)\u{1}"));
static TERM: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<dt[^>]*>(.*?)</dt>"));
static DEFINITION: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<dd[^>]*>(.*?)</dd>"));

/// Decode the HTML entities the engine emits; unknown entities are left as written.
fn decode_entities(text: &str) -> String {
	ENTITY
		.replace_all(text, |caps: &Captures| {
			let entity = &caps[1];
			let decoded = match entity {
				"lt" => Some('<'),
				"gt" => Some('>'),
				"amp" => Some('&'),
				"quot" => Some('"'),
				"apos" => Some('\''),
				"nbsp" => Some(' '),
				_ => {
					let number = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
						u32::from_str_radix(hex, 16).ok()
					} else {
						entity.strip_prefix('#').and_then(|dec| dec.parse().ok())
					};
					number.and_then(char::from_u32)
				}
			};
			decoded.map_or_else(|| caps[0].to_string(), String::from)
		})
		.into_owned()
}

fn strip_tags(html: &str) -> String {
	TAG.replace_all(html, "").into_owned()
}

/// Code-like fragment (signature, example, source): tags stripped, line structure kept.
pub fn code(html: &str) -> String {
	let text = decode_entities(&strip_tags(&BREAK.replace_all(html, "\n")));
	let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
	let start = lines.iter().position(|line| !line.is_empty()).unwrap_or(lines.len());
	let end = lines.iter().rposition(|line| !line.is_empty()).map_or(start, |i| i + 1);
	lines[start..end].join("\n")
}

/// Documentation prose: inline markup converted to Markdown, whitespace collapsed.
///
/// `<pre>` blocks become fenced code blocks tagged with `language`.
pub fn prose(html: &str, language: &str) -> String {
	let mut blocks = Vec::new();
	let text = PRE.replace_all(html, |caps: &Captures| {
		blocks.push(code(&caps[1]));
		format!("\n\n\u{1}{}\u{1}\n\n", blocks.len() - 1)
	});

	let text = BREAK.replace_all(&text, "\n");
	let text = PARAGRAPH.replace_all(&text, "\n\n");
	let text = LIST.replace_all(&text, "\n\n");
	let text = LIST_ITEM.replace_all(&text, "\n- ");
	let text = HEADING.replace_all(&text, |caps: &Captures| format!("\n\n**{}**\n\n", strip_tags(&caps[1]).trim()));
	let text = CODE.replace_all(&text, |caps: &Captures| format!("`{}`", strip_tags(&caps[1])));
	let text = STRONG.replace_all(&text, "**$1**");
	let text = EMPHASIS.replace_all(&text, "*$1*");
	let text = LINK.replace_all(&text, |caps: &Captures| {
		let href = &caps[1];
		let label = strip_tags(&caps[2]);
		if href.starts_with("http://") || href.starts_with("https://") {
			format!("[{label}]({href})")
		} else {
			label
		}
	});
	let text = decode_entities(&strip_tags(&text));
	let collapsed = collapse_whitespace(&text);

	PLACEHOLDER
		.replace_all(&collapsed, |caps: &Captures| {
			let block = caps[1].parse::<usize>().ok().and_then(|i| blocks.get(i));
			match block {
				Some(block) => format!("```{language}\n{block}\n```"),
				None => String::new(),
			}
		})
		.trim()
		.to_string()
}

/// Single-line summary suitable for list entries.
pub fn inline(html: &str) -> String {
	prose(html, "").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a `<dt>term</dt><dd>definition</dd>` fragment into plain term and Markdown definition.
///
/// Fragments without a `<dt>` are treated as a bare term.
pub fn definition(html: &str, language: &str) -> (String, String) {
	let term = match TERM.captures(html) {
		Some(caps) => inline(&caps[1]),
		None => inline(&DEFINITION.replace_all(html, "")),
	};
	let body = DEFINITION
		.captures(html)
		.map(|caps| prose(&caps[1], language))
		.unwrap_or_default();
	(term, body)
}

/// Join wrapped lines into paragraphs and list items, keeping item starts and paragraph breaks.
fn collapse_whitespace(text: &str) -> String {
	let mut lines: Vec<String> = Vec::new();
	let mut pending_break = false;
	for raw in text.lines() {
		let line = SPACES.replace_all(raw, " ");
		let line = line.trim();
		if line.is_empty() {
			pending_break = true;
			continue;
		}

		let is_item = line.starts_with("- ");
		let last = lines.last().map(String::as_str);
		let last_is_item = last.is_some_and(|l| l.starts_with("- "));
		let needs_blank = match last {
			None | Some("") => false,
			Some(_) => pending_break || (is_item && !last_is_item),
		};

		if needs_blank {
			lines.push(String::new());
			lines.push(line.to_string());
		} else if !is_item && !pending_break && let Some(previous) = lines.last_mut().filter(|l| !l.is_empty()) {
			previous.push(' ');
			previous.push_str(line);
		} else {
			lines.push(line.to_string());
		}
		pending_break = false;
	}
	lines.join("\n")
}
