//! Engine backed by a serialized declaration table.
//!
//! [`TableEngine`] speaks the same ABI as the compiled engine: inputs are staged in scratch
//! memory, slices come back as packed `(ptr, len)` values that are overwritten by the next call,
//! and the aliasee of an alias is only available right after it was categorized.
//!
//! A [`Snapshot`] is stddoc's own file format, not the compiler's documentation artifact.
//! Snapshots are produced by serializing a [`Snapshot`] value to JSON or bincode.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ABSENT, EngineFault, Export, RawEngine};
use crate::core_api::error::{DocsError, Result};
use crate::index::Category;

/// A module known to the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
	/// Module name, the first segment of every path inside it.
	pub name: String,
	/// Index of the module's root declaration.
	pub root: u32,
}

/// A source file mapped to its root declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
	/// Path relative to the library root, e.g. `std/mem.zig`.
	pub path: String,
	/// Index of the file's root declaration.
	pub root: u32,
}

/// One error inside an error set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
	/// Error name.
	pub name: String,
	/// Documentation HTML.
	#[serde(default)]
	pub docs_html: String,
}

impl ErrorRecord {
	/// Create an error entry.
	pub fn new(name: impl Into<String>, docs_html: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			docs_html: docs_html.into(),
		}
	}
}

/// Error set attached to a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSetRecord {
	/// Declaration owning the error nodes; defaults to the declaring declaration.
	#[serde(default)]
	pub owner: Option<u32>,
	/// Errors in declaration order.
	#[serde(default)]
	pub errors: Vec<ErrorRecord>,
}

/// A declaration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclRecord {
	/// Declared name. Module roots carry the module name.
	pub name: String,
	/// Enclosing declaration.
	#[serde(default)]
	pub parent: Option<u32>,
	/// Declaration category.
	pub category: Category,
	/// Redirect target for aliases.
	#[serde(default)]
	pub aliasee: Option<u32>,
	/// Child declarations in source order.
	#[serde(default)]
	pub members: Vec<u32>,
	/// Hidden from listings unless private members are requested.
	#[serde(default)]
	pub private: bool,
	/// Documentation HTML.
	#[serde(default)]
	pub docs_html: String,
	/// Prototype HTML for functions.
	#[serde(default)]
	pub signature_html: String,
	/// Per-parameter HTML.
	#[serde(default)]
	pub params: Vec<String>,
	/// Per-field HTML.
	#[serde(default)]
	pub fields: Vec<String>,
	/// Declared error set.
	#[serde(default)]
	pub error_set: Option<ErrorSetRecord>,
	/// Doctest HTML.
	#[serde(default)]
	pub example_html: String,
	/// Source HTML.
	#[serde(default)]
	pub source_html: String,
}

impl DeclRecord {
	/// Create a declaration with no parent, docs or members.
	pub fn new(name: impl Into<String>, category: Category) -> Self {
		Self {
			name: name.into(),
			parent: None,
			category,
			aliasee: None,
			members: Vec::new(),
			private: false,
			docs_html: String::new(),
			signature_html: String::new(),
			params: Vec::new(),
			fields: Vec::new(),
			error_set: None,
			example_html: String::new(),
			source_html: String::new(),
		}
	}

	/// Alias declaration redirecting to `target`.
	pub fn alias(name: impl Into<String>, target: u32) -> Self {
		let mut decl = Self::new(name, Category::Alias);
		decl.aliasee = Some(target);
		decl
	}

	/// Set the enclosing declaration.
	pub fn in_scope(mut self, parent: u32) -> Self {
		self.parent = Some(parent);
		self
	}

	/// Set the documentation HTML.
	pub fn with_docs(mut self, html: impl Into<String>) -> Self {
		self.docs_html = html.into();
		self
	}

	/// Set the prototype HTML.
	pub fn with_signature(mut self, html: impl Into<String>) -> Self {
		self.signature_html = html.into();
		self
	}

	/// Append a parameter.
	pub fn with_param(mut self, html: impl Into<String>) -> Self {
		self.params.push(html.into());
		self
	}

	/// Append a field.
	pub fn with_field(mut self, html: impl Into<String>) -> Self {
		self.fields.push(html.into());
		self
	}

	/// Attach an error set owned by this declaration.
	pub fn with_errors(mut self, errors: Vec<ErrorRecord>) -> Self {
		self.error_set = Some(ErrorSetRecord { owner: None, errors });
		self
	}

	/// Set the doctest HTML.
	pub fn with_example(mut self, html: impl Into<String>) -> Self {
		self.example_html = html.into();
		self
	}

	/// Set the source HTML.
	pub fn with_source(mut self, html: impl Into<String>) -> Self {
		self.source_html = html.into();
		self
	}

	/// Mark the declaration private.
	pub fn private(mut self) -> Self {
		self.private = true;
		self
	}
}

/// Serializable declaration table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
	/// Modules in engine order. Several names may share one root.
	pub modules: Vec<ModuleRecord>,
	/// Declarations; a declaration's position is its index.
	pub decls: Vec<DeclRecord>,
	/// File roots.
	#[serde(default)]
	pub files: Vec<FileRecord>,
}

impl Snapshot {
	/// Empty snapshot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a declaration and register it with its parent. Returns its index.
	pub fn push(&mut self, decl: DeclRecord) -> u32 {
		let index = self.decls.len() as u32;
		if let Some(parent) = decl.parent
			&& let Some(parent) = self.decls.get_mut(parent as usize)
		{
			parent.members.push(index);
		}
		self.decls.push(decl);
		index
	}

	/// Register a module name for a root declaration.
	pub fn add_module(&mut self, name: impl Into<String>, root: u32) {
		self.modules.push(ModuleRecord { name: name.into(), root });
	}

	/// Register a source file for a root declaration.
	pub fn add_file(&mut self, path: impl Into<String>, root: u32) {
		self.files.push(FileRecord { path: path.into(), root });
	}

	/// Parse a JSON snapshot.
	pub fn from_json(bytes: &[u8]) -> Result<Self> {
		serde_json::from_slice(bytes).map_err(|source| DocsError::Json {
			context: "index snapshot".to_string(),
			source,
		})
	}

	/// Decode a bincode snapshot.
	pub fn from_bincode(bytes: &[u8]) -> Result<Self> {
		let (snapshot, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
		Ok(snapshot)
	}

	/// Encode the snapshot as bincode.
	pub fn to_bincode(&self) -> Result<Vec<u8>> {
		Ok(bincode::serde::encode_to_vec(self, bincode::config::standard())?)
	}

	/// Load a snapshot, picking JSON for `.json` files and bincode otherwise.
	pub fn load(path: &Path) -> Result<Self> {
		let bytes = std::fs::read(path).map_err(|source| DocsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let is_json = path
			.extension()
			.is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
		debug!(path = %path.display(), bytes = bytes.len(), is_json, "loading index snapshot");
		if is_json {
			Self::from_json(&bytes)
		} else {
			Self::from_bincode(&bytes)
		}
	}
}

/// [`RawEngine`] over a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct TableEngine {
	snapshot: Snapshot,
	memory: Vec<u8>,
	input_len: usize,
	aliasee: Option<u64>,
}

impl TableEngine {
	/// Load a snapshot into a fresh engine instance.
	pub fn new(snapshot: Snapshot) -> Self {
		Self {
			snapshot,
			memory: Vec::new(),
			input_len: 0,
			aliasee: None,
		}
	}

	/// Load a snapshot file into a fresh engine instance.
	pub fn open(path: &Path) -> Result<Self> {
		Snapshot::load(path).map(Self::new)
	}

	/// The loaded table.
	pub fn snapshot(&self) -> &Snapshot {
		&self.snapshot
	}

	fn decl(&self, raw: u64) -> std::result::Result<&DeclRecord, EngineFault> {
		usize::try_from(raw)
			.ok()
			.and_then(|i| self.snapshot.decls.get(i))
			.ok_or(EngineFault::UnknownDecl(raw))
	}

	fn input(&self) -> String {
		String::from_utf8_lossy(&self.memory[..self.input_len]).into_owned()
	}

	fn stage(&mut self, len: u64) -> u64 {
		let len = len as usize;
		self.memory.clear();
		self.memory.resize(len, 0);
		self.input_len = len;
		0
	}

	fn emit_bytes(&mut self, bytes: &[u8], count: usize) -> u64 {
		self.memory.truncate(self.input_len);
		let ptr = self.memory.len();
		self.memory.extend_from_slice(bytes);
		((count as u64) << 32) | ptr as u64
	}

	fn emit_str(&mut self, text: &str) -> u64 {
		self.emit_bytes(text.as_bytes(), text.len())
	}

	fn emit_u32s(&mut self, values: &[u32]) -> u64 {
		let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
		self.emit_bytes(&bytes, values.len())
	}

	fn emit_u64s(&mut self, values: &[u64]) -> u64 {
		let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
		self.emit_bytes(&bytes, values.len())
	}

	/// Follow aliases from `start`, giving up after as many hops as there are declarations.
	fn follow(&self, start: u32) -> Option<u32> {
		let mut current = start;
		for _ in 0..=self.snapshot.decls.len() {
			let decl = self.snapshot.decls.get(current as usize)?;
			match (decl.category, decl.aliasee) {
				(Category::Alias, Some(next)) => current = next,
				(Category::Alias, None) => return None,
				_ => return Some(current),
			}
		}
		None
	}

	fn lookup_path(&self, path: &str) -> Option<u32> {
		let mut segments = path.split('.');
		let first = segments.next()?;
		let mut current = self.snapshot.modules.iter().find(|m| m.name == first)?.root;
		for segment in segments {
			let scope = self.snapshot.decls.get(self.follow(current)? as usize)?;
			current = *scope
				.members
				.iter()
				.find(|&&m| self.snapshot.decls.get(m as usize).is_some_and(|d| d.name == segment))?;
		}
		Some(current)
	}

	fn fqn(&self, index: u32) -> String {
		let mut segments = Vec::new();
		let mut current = Some(index);
		while let Some(i) = current {
			let Some(decl) = self.snapshot.decls.get(i as usize) else {
				break;
			};
			segments.push(decl.name.as_str());
			if segments.len() > self.snapshot.decls.len() {
				break;
			}
			current = decl.parent;
		}
		segments.reverse();
		segments.join(".")
	}

	fn visible_members(&self, raw: u64, include_private: bool, wanted: fn(Category) -> bool) -> std::result::Result<Vec<u32>, EngineFault> {
		let decl = self.decl(raw)?;
		if !wanted(decl.category) {
			return Ok(Vec::new());
		}
		Ok(decl
			.members
			.iter()
			.copied()
			.filter(|&m| include_private || self.snapshot.decls.get(m as usize).is_some_and(|d| !d.private))
			.collect())
	}

	/// Every spelling of the declaration's path, one per module name sharing its root.
	fn path_spellings(&self, index: u32) -> Vec<String> {
		let fqn = self.fqn(index);
		let (head, tail) = match fqn.split_once('.') {
			Some((head, tail)) => (head, Some(tail)),
			None => (fqn.as_str(), None),
		};
		let root = self.snapshot.modules.iter().find(|m| m.name == head).map(|m| m.root);
		let mut spellings = vec![fqn.clone()];
		for module in &self.snapshot.modules {
			if Some(module.root) != root || module.name == head {
				continue;
			}
			spellings.push(match tail {
				Some(tail) => format!("{}.{tail}", module.name),
				None => module.name.clone(),
			});
		}
		spellings
	}

	fn query(&self, text: &str, ignore_case: bool) -> Vec<u32> {
		let fold = |s: &str| -> String { if ignore_case { s.to_lowercase() } else { s.to_string() } };
		let terms: Vec<String> = text.split_whitespace().map(fold).collect();
		if terms.is_empty() {
			return Vec::new();
		}

		let mut hits: Vec<(bool, usize, String, u32)> = Vec::new();
		for (i, decl) in self.snapshot.decls.iter().enumerate() {
			if decl.private {
				continue;
			}
			let index = i as u32;
			let spellings: Vec<String> = self.path_spellings(index).iter().map(|s| fold(s.as_str())).collect();
			let matched = terms.iter().all(|term| spellings.iter().any(|s| s.contains(term.as_str())));
			if !matched {
				continue;
			}
			let name = fold(decl.name.as_str());
			let exact = terms.iter().any(|term| *term == name);
			let fqn = self.fqn(index);
			hits.push((!exact, fqn.matches('.').count(), fqn, index));
		}
		hits.sort();
		hits.into_iter().map(|(_, _, _, index)| index).collect()
	}

	fn short_docs(html: &str) -> &str {
		if let Some(end) = html.find("</p>") {
			&html[..end + "</p>".len()]
		} else {
			html.lines().next().unwrap_or_default()
		}
	}

	fn arity(export: Export) -> usize {
		match export {
			Export::FindDecl | Export::GetAliasee | Export::FindFileRoot => 0,
			Export::NamespaceMembers
			| Export::TypeFnMembers
			| Export::DeclDocsHtml
			| Export::DeclFnProtoHtml
			| Export::DeclParamHtml
			| Export::DeclFieldHtml
			| Export::FnErrorSetDecl
			| Export::ErrorSetNodeList
			| Export::ErrorHtml => 2,
			_ => 1,
		}
	}

	fn indexed<'a>(items: &'a [String], raw: u64, export: Export) -> std::result::Result<&'a str, EngineFault> {
		usize::try_from(raw)
			.ok()
			.and_then(|i| items.get(i))
			.map(String::as_str)
			.ok_or_else(|| EngineFault::Trap {
				export,
				message: format!("index {raw} out of range"),
			})
	}
}

impl RawEngine for TableEngine {
	fn invoke(&mut self, export: Export, args: &[u64]) -> std::result::Result<u64, EngineFault> {
		let expected = Self::arity(export);
		if args.len() != expected {
			return Err(EngineFault::Arity {
				export,
				expected,
				actual: args.len(),
			});
		}

		match export {
			Export::SetInput | Export::QueryBegin => Ok(self.stage(args[0])),
			Export::FindDecl => {
				let path = self.input();
				Ok(self.lookup_path(&path).map_or(ABSENT, u64::from))
			}
			Export::CategorizeDecl => {
				let decl = self.decl(args[0])?;
				let category = decl.category;
				self.aliasee = match category {
					Category::Alias => Some(decl.aliasee.map_or(ABSENT, u64::from)),
					_ => None,
				};
				Ok(category.code())
			}
			Export::GetAliasee => Ok(self.aliasee.take().unwrap_or(ABSENT)),
			Export::NamespaceMembers => {
				let members = self.visible_members(args[0], args[1] != 0, |c| {
					matches!(c, Category::Namespace | Category::Container)
				})?;
				Ok(self.emit_u32s(&members))
			}
			Export::TypeFnMembers => {
				let members = self.visible_members(args[0], args[1] != 0, |c| c == Category::TypeFunction)?;
				Ok(self.emit_u32s(&members))
			}
			Export::DeclFields => {
				let count = self.decl(args[0])?.fields.len() as u32;
				Ok(self.emit_u32s(&(0..count).collect::<Vec<_>>()))
			}
			Export::DeclParams => {
				let count = self.decl(args[0])?.params.len() as u32;
				Ok(self.emit_u32s(&(0..count).collect::<Vec<_>>()))
			}
			Export::DeclFqn => {
				self.decl(args[0])?;
				let fqn = self.fqn(args[0] as u32);
				Ok(self.emit_str(&fqn))
			}
			Export::DeclName => {
				let name = self.decl(args[0])?.name.clone();
				Ok(self.emit_str(&name))
			}
			Export::DeclParent => Ok(self.decl(args[0])?.parent.map_or(ABSENT, u64::from)),
			Export::DeclDocsHtml => {
				let docs = &self.decl(args[0])?.docs_html;
				let docs = if args[1] != 0 { Self::short_docs(docs) } else { docs.as_str() }.to_string();
				Ok(self.emit_str(&docs))
			}
			Export::DeclFnProtoHtml => {
				let signature = self.decl(args[0])?.signature_html.clone();
				Ok(self.emit_str(&signature))
			}
			Export::DeclParamHtml => {
				let html = Self::indexed(&self.decl(args[0])?.params, args[1], export)?.to_string();
				Ok(self.emit_str(&html))
			}
			Export::DeclFieldHtml => {
				let html = Self::indexed(&self.decl(args[0])?.fields, args[1], export)?.to_string();
				Ok(self.emit_str(&html))
			}
			Export::FnErrorSet => Ok(match self.decl(args[0])?.error_set {
				Some(_) => args[0] + 1,
				None => 0,
			}),
			Export::FnErrorSetDecl => {
				let declaring = args[1].wrapping_sub(1);
				let set = self.decl(declaring)?.error_set.as_ref();
				Ok(set.and_then(|s| s.owner).map_or(declaring, u64::from))
			}
			Export::ErrorSetNodeList => {
				let declaring = args[1].wrapping_sub(1);
				let count = self.decl(declaring)?.error_set.as_ref().map_or(0, |s| s.errors.len());
				let refs: Vec<u64> = (0..count as u64).map(|i| (declaring << 32) | i).collect();
				Ok(self.emit_u64s(&refs))
			}
			Export::ErrorHtml => {
				let declaring = args[1] >> 32;
				let position = args[1] & 0xFFFF_FFFF;
				let error = self
					.decl(declaring)?
					.error_set
					.as_ref()
					.and_then(|s| s.errors.get(position as usize))
					.ok_or_else(|| EngineFault::Trap {
						export,
						message: format!("error ref {:#x} does not exist", args[1]),
					})?;
				let html = if error.docs_html.is_empty() {
					format!("<dt>{}</dt>", error.name)
				} else {
					format!("<dt>{}</dt><dd>{}</dd>", error.name, error.docs_html)
				};
				Ok(self.emit_str(&html))
			}
			Export::DeclDoctestHtml => {
				let html = self.decl(args[0])?.example_html.clone();
				Ok(self.emit_str(&html))
			}
			Export::DeclSourceHtml => {
				let html = self.decl(args[0])?.source_html.clone();
				Ok(self.emit_str(&html))
			}
			Export::ModuleName => {
				let name = usize::try_from(args[0])
					.ok()
					.and_then(|i| self.snapshot.modules.get(i))
					.map(|m| m.name.clone())
					.unwrap_or_default();
				Ok(self.emit_str(&name))
			}
			Export::FindModuleRoot => usize::try_from(args[0])
				.ok()
				.and_then(|i| self.snapshot.modules.get(i))
				.map(|m| u64::from(m.root))
				.ok_or_else(|| EngineFault::Trap {
					export,
					message: format!("module {} does not exist", args[0]),
				}),
			Export::FindFileRoot => {
				let path = self.input();
				Ok(self
					.snapshot
					.files
					.iter()
					.find(|f| f.path == path)
					.map_or(ABSENT, |f| u64::from(f.root)))
			}
			Export::QueryExec => {
				let text = self.input();
				let hits = self.query(&text, args[0] != 0);
				Ok(self.emit_u32s(&hits))
			}
		}
	}

	fn memory(&self) -> &[u8] {
		&self.memory
	}

	fn memory_mut(&mut self) -> &mut [u8] {
		&mut self.memory
	}
}
