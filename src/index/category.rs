use bitflags::bitflags;

use crate::engine::EngineFault;

/// Classification of a declaration as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
	/// Namespace such as a file root.
	Namespace,
	/// Struct, union, enum or opaque container type.
	Container,
	/// Mutable global.
	GlobalVariable,
	/// Callable function.
	Function,
	/// Builtin primitive type.
	Primitive,
	/// Error set declaration.
	ErrorSet,
	/// Constant global value.
	GlobalConst,
	/// Declaration that only redirects to another declaration.
	Alias,
	/// Declaration whose value is a type.
	Type,
	/// The `type` type itself.
	TypeType,
	/// Function returning a type (generic container constructor).
	TypeFunction,
}

impl Category {
	/// Decode the engine's integer category code.
	pub fn from_code(code: u64) -> Result<Self, EngineFault> {
		Ok(match code {
			0 => Self::Namespace,
			1 => Self::Container,
			2 => Self::GlobalVariable,
			3 => Self::Function,
			4 => Self::Primitive,
			5 => Self::ErrorSet,
			6 => Self::GlobalConst,
			7 => Self::Alias,
			8 => Self::Type,
			9 => Self::TypeType,
			10 => Self::TypeFunction,
			other => return Err(EngineFault::UnknownCategory(other)),
		})
	}

	/// Integer code the engine uses for this category.
	pub fn code(self) -> u64 {
		match self {
			Self::Namespace => 0,
			Self::Container => 1,
			Self::GlobalVariable => 2,
			Self::Function => 3,
			Self::Primitive => 4,
			Self::ErrorSet => 5,
			Self::GlobalConst => 6,
			Self::Alias => 7,
			Self::Type => 8,
			Self::TypeType => 9,
			Self::TypeFunction => 10,
		}
	}

	/// Human-friendly label describing the category.
	pub fn label(self) -> &'static str {
		match self {
			Self::Namespace => "namespace",
			Self::Container => "container",
			Self::GlobalVariable => "global variable",
			Self::Function => "function",
			Self::Primitive => "primitive",
			Self::ErrorSet => "error set",
			Self::GlobalConst => "constant",
			Self::Alias => "alias",
			Self::Type => "type",
			Self::TypeType => "type",
			Self::TypeFunction => "type function",
		}
	}

	/// Whether members of this declaration can be enumerated.
	pub fn has_members(self) -> bool {
		matches!(self, Self::Namespace | Self::Container | Self::TypeFunction)
	}

	/// Single-category set containing `self`.
	pub fn as_set(self) -> CategorySet {
		match self {
			Self::Namespace => CategorySet::NAMESPACE,
			Self::Container => CategorySet::CONTAINER,
			Self::GlobalVariable => CategorySet::GLOBAL_VARIABLE,
			Self::Function => CategorySet::FUNCTION,
			Self::Primitive => CategorySet::PRIMITIVE,
			Self::ErrorSet => CategorySet::ERROR_SET,
			Self::GlobalConst => CategorySet::GLOBAL_CONST,
			Self::Alias => CategorySet::ALIAS,
			Self::Type => CategorySet::TYPE,
			Self::TypeType => CategorySet::TYPE_TYPE,
			Self::TypeFunction => CategorySet::TYPE_FUNCTION,
		}
	}
}

bitflags! {
	/// Set of categories, used to filter member listings and group rendered sections.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct CategorySet: u32 {
		/// [`Category::Namespace`].
		const NAMESPACE = 1 << 0;
		/// [`Category::Container`].
		const CONTAINER = 1 << 1;
		/// [`Category::GlobalVariable`].
		const GLOBAL_VARIABLE = 1 << 2;
		/// [`Category::Function`].
		const FUNCTION = 1 << 3;
		/// [`Category::Primitive`].
		const PRIMITIVE = 1 << 4;
		/// [`Category::ErrorSet`].
		const ERROR_SET = 1 << 5;
		/// [`Category::GlobalConst`].
		const GLOBAL_CONST = 1 << 6;
		/// [`Category::Alias`].
		const ALIAS = 1 << 7;
		/// [`Category::Type`].
		const TYPE = 1 << 8;
		/// [`Category::TypeType`].
		const TYPE_TYPE = 1 << 9;
		/// [`Category::TypeFunction`].
		const TYPE_FUNCTION = 1 << 10;

		/// Everything listed under "Types".
		const TYPES = Self::CONTAINER.bits()
			| Self::PRIMITIVE.bits()
			| Self::ERROR_SET.bits()
			| Self::TYPE.bits()
			| Self::TYPE_TYPE.bits()
			| Self::TYPE_FUNCTION.bits();
		/// Everything listed under "Namespaces".
		const NAMESPACES = Self::NAMESPACE.bits();
		/// Everything listed under "Functions".
		const FUNCTIONS = Self::FUNCTION.bits();
		/// Everything listed under "Values".
		const VALUES = Self::GLOBAL_VARIABLE.bits() | Self::GLOBAL_CONST.bits();
	}
}

impl Default for CategorySet {
	fn default() -> Self {
		Self::all()
	}
}

impl CategorySet {
	/// Whether `category` belongs to the set.
	pub fn admits(self, category: Category) -> bool {
		self.contains(category.as_set())
	}
}
