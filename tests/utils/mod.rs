//! Shared fixture: a small standard library laid out the way the real one is.
#![allow(dead_code)]

use stddoc::engine::{DeclRecord, ErrorRecord};
use stddoc::{Category, DocsConfig, DocsSession, Snapshot, TableEngine};

/// Build the fixture snapshot.
///
/// The root module is registered as both `root` and `std`. `ArrayList` is re-exported at the
/// root, `HashMap` only lives in `hash_map`, and `loop_a`/`loop_b` alias each other. A separate
/// `builtin` module sits beside the root.
pub fn std_snapshot() -> Snapshot {
	let mut s = Snapshot::new();
	let root = s.push(DeclRecord::new("root", Category::Namespace).with_docs("<p>The standard library.</p>"));
	s.add_module("root", root);
	s.add_module("std", root);
	s.add_file("std/std.zig", root);

	let mem = s.push(
		DeclRecord::new("mem", Category::Namespace)
			.in_scope(root)
			.with_docs("<p>Memory utilities.</p><p>Slices, allocators and byte helpers.</p>"),
	);
	s.add_file("std/mem.zig", mem);
	let allocator = s.push(
		DeclRecord::new("Allocator", Category::Container)
			.in_scope(mem)
			.with_docs("<p>Interface for allocating memory.</p>")
			.with_field("<code>ptr: *anyopaque</code>")
			.with_field("<code>vtable: *const\n    VTable</code>"),
	);
	s.push(
		DeclRecord::new("Error", Category::ErrorSet)
			.in_scope(allocator)
			.with_docs("<p>Allocation failures.</p>")
			.with_errors(vec![ErrorRecord::new("OutOfMemory", "<p>The allocator has no memory left.</p>")]),
	);
	s.push(
		DeclRecord::new("eql", Category::Function)
			.in_scope(mem)
			.with_docs("<p>Compares two slices and returns whether they are the same.</p>")
			.with_signature("<span class=\"tok-kw\">pub fn</span> eql(<span class=\"tok-kw\">comptime</span> T: type, a: []const T, b: []const T) bool")
			.with_param("<code>comptime T: type</code>")
			.with_param("<code>a: []const T</code>")
			.with_param("<code>b: []const T</code>")
			.with_source("<span class=\"tok-kw\">pub fn</span> eql(comptime T: type, a: []const T, b: []const T) bool {\n    return std.mem.order(T, a, b) == .eq;\n}"),
	);
	s.push(DeclRecord::new("page_size", Category::GlobalConst).in_scope(mem).with_docs("<p>Size of a memory page.</p>"));
	s.push(DeclRecord::new("secret", Category::Function).in_scope(mem).private());

	let array_list = s.push(
		DeclRecord::new("array_list", Category::Namespace)
			.in_scope(root)
			.with_docs("<p>Growable arrays.</p>"),
	);
	s.add_file("std/array_list.zig", array_list);
	let array_list_type = s.push(
		DeclRecord::new("ArrayList", Category::TypeFunction)
			.in_scope(array_list)
			.with_docs("<p>A contiguous, growable list of items.</p>")
			.with_signature("<span class=\"tok-kw\">pub fn</span> ArrayList(<span class=\"tok-kw\">comptime</span> T: type) type")
			.with_param("<code>comptime T: type</code> Element type."),
	);
	s.push(
		DeclRecord::new("init", Category::Function)
			.in_scope(array_list_type)
			.with_docs("<p>Initialize an empty list.</p>"),
	);
	s.push(
		DeclRecord::new("append", Category::Function)
			.in_scope(array_list_type)
			.with_docs("<p>Extend the list by one item.</p>")
			.with_errors(vec![ErrorRecord::new("OutOfMemory", "")]),
	);
	s.push(DeclRecord::new("Slice", Category::Type).in_scope(array_list_type));
	s.push(DeclRecord::alias("ArrayList", array_list_type).in_scope(root));

	let hash_map = s.push(DeclRecord::new("hash_map", Category::Namespace).in_scope(root).with_docs("<p>Hash maps.</p>"));
	s.push(
		DeclRecord::new("HashMap", Category::TypeFunction)
			.in_scope(hash_map)
			.with_docs("<p>General purpose hash map.</p>")
			.with_signature("<span class=\"tok-kw\">pub fn</span> HashMap(K: type, V: type) type"),
	);

	let math = s.push(DeclRecord::new("math", Category::Namespace).in_scope(root).with_docs("<p>Mathematical functions.</p>"));
	s.push(
		DeclRecord::new("add", Category::Function)
			.in_scope(math)
			.with_docs("<p>Returns the sum of <code>a</code> and <code>b</code>.</p>")
			.with_signature("<span class=\"tok-kw\">pub fn</span> add(<span class=\"tok-kw\">comptime</span> T: type, a: T, b: T) (error{Overflow}!T)")
			.with_param("<code>comptime T: type</code>")
			.with_param("<code>a: T</code> First operand.")
			.with_param("<code>b: T</code>")
			.with_errors(vec![ErrorRecord::new("Overflow", "<p>The sum does not fit in <code>T</code>.</p>")])
			.with_example("<pre><code>try expect((try add(u8, 1, 2)) == 3);</code></pre>"),
	);
	s.push(
		DeclRecord::new("clamp", Category::Function)
			.in_scope(math)
			.with_docs("<p>Limits a value to a range.</p>")
			.with_param("<code>val: anytype</code>")
			.with_param("<span> </span>")
			.with_param("<code>upper: anytype</code>"),
	);
	s.push(DeclRecord::new("pi", Category::GlobalConst).in_scope(math).with_docs("<p>The ratio of a circle's circumference to its diameter.</p>"));

	let heap = s.push(DeclRecord::new("heap", Category::Namespace).in_scope(root).with_docs("<p>Allocator implementations.</p>"));
	s.push(
		DeclRecord::new("page_allocator", Category::GlobalConst)
			.in_scope(heap)
			.with_docs("<p>Allocates whole pages straight from the OS.</p>")
			.with_source("pub const page_allocator: Allocator = .{ .ptr = undefined, .vtable = &PageAllocator.vtable };"),
	);

	let loop_a = s.decls.len() as u32;
	s.push(DeclRecord::alias("loop_a", loop_a + 1).in_scope(root));
	s.push(DeclRecord::alias("loop_b", loop_a).in_scope(root));
	s.push(DeclRecord::new("ghost", Category::Alias).in_scope(root));

	// A second module whose name is not reachable through the root.
	let builtin = s.push(DeclRecord::new("builtin", Category::Namespace).with_docs("<p>Compiler-provided values.</p>"));
	s.add_module("builtin", builtin);
	s.push(
		DeclRecord::new("SourceLocation", Category::Container)
			.in_scope(builtin)
			.with_docs("<p>Where a call site lives.</p>"),
	);

	s
}

/// Session over the fixture with default settings.
pub fn session() -> DocsSession {
	session_with(DocsConfig::default())
}

/// Session over the fixture with custom settings.
pub fn session_with(config: DocsConfig) -> DocsSession {
	DocsSession::new(TableEngine::new(std_snapshot()), config)
}
