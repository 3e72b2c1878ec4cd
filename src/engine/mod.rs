//! Raw call boundary of the compiled declaration engine.
//!
//! The engine is an opaque artifact produced by an external toolchain. Everything this crate
//! knows about it is captured by [`RawEngine`]: a table of named exports taking and returning
//! plain integers, plus a linear memory region used to pass strings in and slices out. Only
//! [`crate::index`] is allowed to interpret the integers coming back from [`RawEngine::invoke`].

/// Declaration-table engine used by tests and by the CLI.
pub mod table;

pub use table::{DeclRecord, ErrorRecord, ErrorSetRecord, FileRecord, ModuleRecord, Snapshot, TableEngine};

/// Sentinel the engine returns in place of a declaration index when nothing was found.
pub const ABSENT: u64 = 0xFFFF_FFFF;

/// Named entry points exported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Export {
	/// Reserve scratch memory for a string argument; `(len) -> ptr`.
	SetInput,
	/// Look up the staged string as a dotted path; `() -> decl | ABSENT`.
	FindDecl,
	/// `(decl) -> category code`. Arms the aliasee slot for alias declarations.
	CategorizeDecl,
	/// `() -> decl | ABSENT`. Only meaningful right after `CategorizeDecl` reported an alias.
	GetAliasee,
	/// `(decl, include_private) -> packed [u32]`.
	NamespaceMembers,
	/// `(decl, include_private) -> packed [u32]`.
	TypeFnMembers,
	/// `(decl) -> packed [u32]`.
	DeclFields,
	/// `(decl) -> packed [u32]`.
	DeclParams,
	/// `(decl) -> packed str`.
	DeclFqn,
	/// `(decl) -> packed str`.
	DeclName,
	/// `(decl) -> decl | ABSENT`.
	DeclParent,
	/// `(decl, short) -> packed str`.
	DeclDocsHtml,
	/// `(decl, short) -> packed str`.
	DeclFnProtoHtml,
	/// `(decl, param) -> packed str`.
	DeclParamHtml,
	/// `(decl, field) -> packed str`.
	DeclFieldHtml,
	/// `(decl) -> error set ref`, zero when none is declared.
	FnErrorSet,
	/// `(decl, error set ref) -> decl`.
	FnErrorSetDecl,
	/// `(decl, error set ref) -> packed [u64]`.
	ErrorSetNodeList,
	/// `(owner decl, error ref) -> packed str`.
	ErrorHtml,
	/// `(decl) -> packed str`.
	DeclDoctestHtml,
	/// `(decl) -> packed str`.
	DeclSourceHtml,
	/// `(module index) -> packed str`, empty past the last module.
	ModuleName,
	/// `(module index) -> decl`.
	FindModuleRoot,
	/// Look up the staged string as a source file path; `() -> decl | ABSENT`.
	FindFileRoot,
	/// Reserve scratch memory for query text; `(len) -> ptr`.
	QueryBegin,
	/// Run the staged query; `(ignore_case) -> packed [u32]`.
	QueryExec,
}

impl Export {
	/// Symbol name of the export inside the compiled artifact.
	pub fn symbol(self) -> &'static str {
		match self {
			Self::SetInput => "set_input_string",
			Self::FindDecl => "find_decl",
			Self::CategorizeDecl => "categorize_decl",
			Self::GetAliasee => "get_aliasee",
			Self::NamespaceMembers => "namespace_members",
			Self::TypeFnMembers => "type_fn_members",
			Self::DeclFields => "decl_fields",
			Self::DeclParams => "decl_params",
			Self::DeclFqn => "decl_fqn",
			Self::DeclName => "decl_name",
			Self::DeclParent => "decl_parent",
			Self::DeclDocsHtml => "decl_docs_html",
			Self::DeclFnProtoHtml => "decl_fn_proto_html",
			Self::DeclParamHtml => "decl_param_html",
			Self::DeclFieldHtml => "decl_field_html",
			Self::FnErrorSet => "fn_error_set",
			Self::FnErrorSetDecl => "fn_error_set_decl",
			Self::ErrorSetNodeList => "error_set_node_list",
			Self::ErrorHtml => "error_html",
			Self::DeclDoctestHtml => "decl_doctest_html",
			Self::DeclSourceHtml => "decl_source_html",
			Self::ModuleName => "module_name",
			Self::FindModuleRoot => "find_module_root",
			Self::FindFileRoot => "find_file_root",
			Self::QueryBegin => "query_begin",
			Self::QueryExec => "query_exec",
		}
	}
}

/// Failures at the engine boundary. Each one is fatal to the request that hit it.
#[derive(Debug, thiserror::Error)]
pub enum EngineFault {
	/// The engine does not provide the requested export.
	#[error("engine does not export `{}`", .0.symbol())]
	MissingExport(Export),
	/// The export was called with the wrong number of arguments.
	#[error("`{}` expects {expected} argument(s), got {actual}", .export.symbol())]
	Arity {
		/// Export that was invoked.
		export: Export,
		/// Arguments the export takes.
		expected: usize,
		/// Arguments actually supplied.
		actual: usize,
	},
	/// An argument referred to a declaration the engine does not hold.
	#[error("declaration index {0} is out of range")]
	UnknownDecl(u64),
	/// A packed `(ptr, len)` pair points outside linear memory.
	#[error("engine slice {ptr:#x}+{len} exceeds linear memory of {memory} bytes")]
	OutOfBounds {
		/// Start offset.
		ptr: u64,
		/// Length in bytes.
		len: u64,
		/// Size of linear memory.
		memory: usize,
	},
	/// A returned string was not valid UTF-8.
	#[error("engine returned a string that is not valid UTF-8")]
	InvalidUtf8,
	/// `CategorizeDecl` returned a code outside the known category set.
	#[error("engine returned unknown category code {0}")]
	UnknownCategory(u64),
	/// A value expected to fit a declaration index did not.
	#[error("engine returned {0:#x} where a declaration index was expected")]
	InvalidHandle(u64),
	/// The engine aborted while running an export.
	#[error("engine trapped in `{}`: {message}", .export.symbol())]
	Trap {
		/// Export that was running.
		export: Export,
		/// Engine-supplied reason.
		message: String,
	},
}

/// Call surface of a loaded engine instance.
///
/// Implementations are not reentrant: inputs are staged in shared scratch memory ahead of the
/// export that consumes them, and packed results stay valid only until the next call.
pub trait RawEngine {
	/// Run an export with integer arguments and return its raw integer result.
	fn invoke(&mut self, export: Export, args: &[u64]) -> Result<u64, EngineFault>;

	/// The engine's linear memory.
	fn memory(&self) -> &[u8];

	/// Mutable view of the engine's linear memory, used to stage call inputs.
	fn memory_mut(&mut self) -> &mut [u8];
}

impl<E: RawEngine + ?Sized> RawEngine for Box<E> {
	fn invoke(&mut self, export: Export, args: &[u64]) -> Result<u64, EngineFault> {
		(**self).invoke(export, args)
	}

	fn memory(&self) -> &[u8] {
		(**self).memory()
	}

	fn memory_mut(&mut self) -> &mut [u8] {
		(**self).memory_mut()
	}
}
