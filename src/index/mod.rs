//! Typed call surface over a loaded engine instance.
//!
//! [`Index`] is the only place that stages inputs into engine memory or decodes the engine's
//! integer and packed return values. Everything above it works with [`Handle`], [`Category`]
//! and owned strings.

mod category;
mod packed;

use tracing::trace;

pub use self::category::{Category, CategorySet};
use self::packed::PackedSlice;
use crate::engine::{ABSENT, EngineFault, Export, RawEngine};

/// Result type for index operations.
pub type IndexResult<T> = std::result::Result<T, EngineFault>;

/// Opaque identifier of a declaration inside one loaded index.
///
/// Handles are only produced by [`Index`] and are meaningless against any other loaded index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct Handle(u32);

impl Handle {
	/// Raw declaration index, for display and diagnostics.
	pub fn index(self) -> u32 {
		self.0
	}

	fn arg(self) -> u64 {
		u64::from(self.0)
	}
}

/// Reference to a struct-like field of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef(u32);

/// Reference to a declared function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamRef(u32);

/// Reference to the error set a function or error-set declaration carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorSetRef(u64);

/// Reference to a single error inside an error set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorRef(u64);

/// Typed adapter over a [`RawEngine`].
#[derive(Debug)]
pub struct Index<E> {
	engine: E,
}

impl<E: RawEngine> Index<E> {
	/// Wrap a loaded engine instance.
	pub fn new(engine: E) -> Self {
		Self { engine }
	}

	fn call(&mut self, export: Export, args: &[u64]) -> IndexResult<u64> {
		trace!(export = export.symbol(), ?args, "engine call");
		self.engine.invoke(export, args)
	}

	fn stage(&mut self, begin: Export, text: &str) -> IndexResult<()> {
		let bytes = text.as_bytes();
		let ptr = self.call(begin, &[bytes.len() as u64])? as usize;
		let memory = self.engine.memory_mut();
		let size = memory.len();
		let target = ptr
			.checked_add(bytes.len())
			.filter(|end| *end <= size)
			.map(|end| &mut memory[ptr..end]);
		match target {
			Some(target) => {
				target.copy_from_slice(bytes);
				Ok(())
			}
			None => Err(EngineFault::OutOfBounds {
				ptr: ptr as u64,
				len: bytes.len() as u64,
				memory: size,
			}),
		}
	}

	fn handle(raw: u64) -> IndexResult<Handle> {
		u32::try_from(raw)
			.ok()
			.filter(|_| raw != ABSENT)
			.map(Handle)
			.ok_or(EngineFault::InvalidHandle(raw))
	}

	fn maybe_handle(raw: u64) -> IndexResult<Option<Handle>> {
		if raw == ABSENT {
			Ok(None)
		} else {
			Self::handle(raw).map(Some)
		}
	}

	fn string(&mut self, export: Export, args: &[u64]) -> IndexResult<String> {
		let raw = self.call(export, args)?;
		PackedSlice::unpack(raw).read_str(self.engine.memory())
	}

	fn words(&mut self, export: Export, args: &[u64]) -> IndexResult<Vec<u32>> {
		let raw = self.call(export, args)?;
		PackedSlice::unpack(raw).read_u32s(self.engine.memory())
	}

	fn handles(&mut self, export: Export, args: &[u64]) -> IndexResult<Vec<Handle>> {
		Ok(self.words(export, args)?.into_iter().map(Handle).collect())
	}

	/// Look up a dotted path.
	pub fn find_declaration(&mut self, name: &str) -> IndexResult<Option<Handle>> {
		self.stage(Export::SetInput, name)?;
		let raw = self.call(Export::FindDecl, &[])?;
		Self::maybe_handle(raw)
	}

	/// Categorize a declaration, fetching its target in the same step when it is an alias.
	///
	/// The second element is `Some` only for [`Category::Alias`] with a resolvable target.
	pub fn classify(&mut self, handle: Handle) -> IndexResult<(Category, Option<Handle>)> {
		let code = self.call(Export::CategorizeDecl, &[handle.arg()])?;
		let category = Category::from_code(code)?;
		if category != Category::Alias {
			return Ok((category, None));
		}
		let raw = self.call(Export::GetAliasee, &[])?;
		Ok((category, Self::maybe_handle(raw)?))
	}

	/// Children of a namespace or container.
	pub fn namespace_members(&mut self, handle: Handle, include_private: bool) -> IndexResult<Vec<Handle>> {
		self.handles(Export::NamespaceMembers, &[handle.arg(), u64::from(include_private)])
	}

	/// Children of the type returned by a type function.
	pub fn type_function_members(&mut self, handle: Handle, include_private: bool) -> IndexResult<Vec<Handle>> {
		self.handles(Export::TypeFnMembers, &[handle.arg(), u64::from(include_private)])
	}

	/// Struct-like fields of a container.
	pub fn fields(&mut self, handle: Handle) -> IndexResult<Vec<FieldRef>> {
		Ok(self.words(Export::DeclFields, &[handle.arg()])?.into_iter().map(FieldRef).collect())
	}

	/// Declared parameters of a function.
	pub fn params(&mut self, handle: Handle) -> IndexResult<Vec<ParamRef>> {
		Ok(self.words(Export::DeclParams, &[handle.arg()])?.into_iter().map(ParamRef).collect())
	}

	/// Fully qualified name, rooted at the internal root segment.
	pub fn fully_qualified_name(&mut self, handle: Handle) -> IndexResult<String> {
		self.string(Export::DeclFqn, &[handle.arg()])
	}

	/// Name the declaration was declared under.
	pub fn declared_name(&mut self, handle: Handle) -> IndexResult<String> {
		self.string(Export::DeclName, &[handle.arg()])
	}

	/// Enclosing declaration, if any.
	pub fn parent(&mut self, handle: Handle) -> IndexResult<Option<Handle>> {
		let raw = self.call(Export::DeclParent, &[handle.arg()])?;
		Self::maybe_handle(raw)
	}

	/// Documentation as HTML; `short` asks for the summary only.
	pub fn docs_html(&mut self, handle: Handle, short: bool) -> IndexResult<String> {
		self.string(Export::DeclDocsHtml, &[handle.arg(), u64::from(short)])
	}

	/// Function prototype as HTML.
	pub fn signature_html(&mut self, handle: Handle, short: bool) -> IndexResult<String> {
		self.string(Export::DeclFnProtoHtml, &[handle.arg(), u64::from(short)])
	}

	/// One parameter as HTML.
	pub fn param_html(&mut self, handle: Handle, param: ParamRef) -> IndexResult<String> {
		self.string(Export::DeclParamHtml, &[handle.arg(), u64::from(param.0)])
	}

	/// One field as HTML.
	pub fn field_html(&mut self, handle: Handle, field: FieldRef) -> IndexResult<String> {
		self.string(Export::DeclFieldHtml, &[handle.arg(), u64::from(field.0)])
	}

	/// Error set declared by a function or error-set declaration.
	pub fn error_set(&mut self, handle: Handle) -> IndexResult<Option<ErrorSetRef>> {
		let raw = self.call(Export::FnErrorSet, &[handle.arg()])?;
		Ok((raw != 0).then_some(ErrorSetRef(raw)))
	}

	/// Declaration that owns the nodes of an error set.
	pub fn error_set_owner(&mut self, handle: Handle, set: ErrorSetRef) -> IndexResult<Handle> {
		let raw = self.call(Export::FnErrorSetDecl, &[handle.arg(), set.0])?;
		Self::handle(raw)
	}

	/// Individual errors of an error set.
	pub fn error_set_entries(&mut self, handle: Handle, set: ErrorSetRef) -> IndexResult<Vec<ErrorRef>> {
		let raw = self.call(Export::ErrorSetNodeList, &[handle.arg(), set.0])?;
		let entries = PackedSlice::unpack(raw).read_u64s(self.engine.memory())?;
		Ok(entries.into_iter().map(ErrorRef).collect())
	}

	/// One error as HTML, rendered against the owning declaration.
	pub fn error_html(&mut self, owner: Handle, error: ErrorRef) -> IndexResult<String> {
		self.string(Export::ErrorHtml, &[owner.arg(), error.0])
	}

	/// Doctest or example code as HTML.
	pub fn example_html(&mut self, handle: Handle) -> IndexResult<String> {
		self.string(Export::DeclDoctestHtml, &[handle.arg()])
	}

	/// Declaration source as HTML.
	pub fn source_html(&mut self, handle: Handle) -> IndexResult<String> {
		self.string(Export::DeclSourceHtml, &[handle.arg()])
	}

	/// Name of module `i`, or `None` past the last module.
	pub fn module_name(&mut self, i: u32) -> IndexResult<Option<String>> {
		let name = self.string(Export::ModuleName, &[u64::from(i)])?;
		Ok((!name.is_empty()).then_some(name))
	}

	/// Root declaration of module `i`.
	pub fn module_root(&mut self, i: u32) -> IndexResult<Handle> {
		let raw = self.call(Export::FindModuleRoot, &[u64::from(i)])?;
		Self::handle(raw)
	}

	/// Root declaration of a source file.
	pub fn file_root(&mut self, path: &str) -> IndexResult<Option<Handle>> {
		self.stage(Export::SetInput, path)?;
		let raw = self.call(Export::FindFileRoot, &[])?;
		Self::maybe_handle(raw)
	}

	/// Names of every module in the index, in engine order.
	pub fn modules(&mut self) -> IndexResult<Vec<String>> {
		let mut names = Vec::new();
		let mut i = 0u32;
		while let Some(name) = self.module_name(i)? {
			names.push(name);
			i += 1;
		}
		Ok(names)
	}

	/// Root declaration of the module called `name`.
	pub fn module_root_named(&mut self, name: &str) -> IndexResult<Option<Handle>> {
		let mut i = 0u32;
		while let Some(module) = self.module_name(i)? {
			if module == name {
				return self.module_root(i).map(Some);
			}
			i += 1;
		}
		Ok(None)
	}

	/// Full-text query over the index, in engine order.
	pub fn run_query(&mut self, text: &str, ignore_case: bool) -> IndexResult<Vec<Handle>> {
		self.stage(Export::QueryBegin, text)?;
		self.handles(Export::QueryExec, &[u64::from(ignore_case)])
	}
}
