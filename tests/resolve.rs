//! Integration tests for name resolution and alias unwinding.

mod utils;

use stddoc::core_api::unwind;
use stddoc::{Category, DocsConfig, Strategy, Unwound};
use utils::{session, session_with};

#[test]
fn qualified_and_alias_prefixed_paths_agree() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let full = session.resolve("root.mem.eql")?.ok_or("root path did not resolve")?;
	let public = session.resolve("std.mem.eql")?.ok_or("alias path did not resolve")?;
	let bare = session.resolve("mem.eql")?.ok_or("bare path did not resolve")?;

	assert_eq!(full.handle, public.handle);
	assert_eq!(full.handle, bare.handle);
	assert!([full.strategy, public.strategy, bare.strategy].iter().all(|s| *s == Strategy::Direct));
	assert_eq!(full.title, "std.mem.eql");
	assert_eq!(public.matched, "root.mem.eql");
	Ok(())
}

#[test]
fn empty_alias_and_root_literal_name_the_root_module() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let root = session.resolve("root")?.ok_or("root did not resolve")?;
	for input in ["", "   ", "std", "std."] {
		let resolved = session.resolve(input)?.ok_or("root request did not resolve")?;
		assert!(resolved.is_root(), "{input:?}");
		assert_eq!(resolved.handle, root.handle);
		assert_eq!(resolved.title, "std");
	}
	Ok(())
}

#[test]
fn reexported_item_keeps_its_short_title() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let resolved = session.resolve("std.ArrayList")?.ok_or("ArrayList did not resolve")?;
	assert_eq!(resolved.strategy, Strategy::Direct);
	assert_eq!(resolved.title, "std.ArrayList");
	assert_eq!(session.index().classify(resolved.handle)?.0, Category::Alias);
	Ok(())
}

#[test]
fn separate_modules_keep_their_own_name() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let resolved = session.resolve("builtin")?.ok_or("builtin did not resolve")?;
	assert_eq!(resolved.strategy, Strategy::Direct);
	assert_eq!(resolved.matched, "builtin");
	assert_eq!(resolved.title, "builtin");

	let nested = session.resolve("builtin.SourceLocation")?.ok_or("SourceLocation did not resolve")?;
	assert_eq!(nested.title, "builtin.SourceLocation");
	assert_eq!(session.resolve("std.builtin")?, None);
	Ok(())
}

#[test]
fn snake_case_submodule_guess_finds_unexported_items() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	for input in ["std.HashMap", "HashMap"] {
		let resolved = session.resolve(input)?.ok_or("HashMap did not resolve")?;
		assert_eq!(resolved.strategy, Strategy::SubmoduleGuess);
		assert_eq!(resolved.matched, "root.hash_map.HashMap");
		assert_eq!(resolved.title, "std.HashMap");
	}
	Ok(())
}

#[test]
fn common_submodules_are_the_last_resort() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let resolved = session.resolve("std.page_allocator")?.ok_or("page_allocator did not resolve")?;
	assert_eq!(resolved.strategy, Strategy::CommonSubmodule);
	assert_eq!(resolved.matched, "root.heap.page_allocator");
	assert_eq!(resolved.title, "std.page_allocator");

	let mut narrowed = session_with(DocsConfig::default().with_submodules(["mem", "fmt"]));
	assert_eq!(narrowed.resolve("std.page_allocator")?, None);
	Ok(())
}

#[test]
fn root_prefixed_paths_are_taken_literally() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	assert_eq!(session.resolve("root.HashMap")?, None);
	assert_eq!(session.resolve("root.page_allocator")?, None);
	Ok(())
}

#[test]
fn file_paths_resolve_to_their_root_declaration() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let resolved = session.resolve("std/mem.zig")?.ok_or("file did not resolve")?;
	assert_eq!(resolved.strategy, Strategy::FilePath);
	assert_eq!(resolved.title, "std.mem");
	let direct = session.resolve("std.mem")?.ok_or("mem did not resolve")?;
	assert_eq!(resolved.handle, direct.handle);
	Ok(())
}

#[test]
fn unknown_names_are_absent_not_errors() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	for input in ["std.nope", "Nope", "root.mem.nope", "std.mem.eql.deeper", "no/such/file.zig"] {
		assert_eq!(session.resolve(input)?, None, "{input}");
	}
	Ok(())
}

#[test]
fn custom_alias_and_root_names() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session_with(DocsConfig::default().with_public_alias("lib"));
	let resolved = session.resolve("lib.mem.eql")?.ok_or("lib path did not resolve")?;
	assert_eq!(resolved.title, "lib.mem.eql");
	assert!(session.resolve("lib")?.ok_or("lib did not resolve")?.is_root());
	Ok(())
}

#[test]
fn unwinding_through_the_session_index() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let eql = session.resolve("std.mem.eql")?.ok_or("eql did not resolve")?.handle;
	assert_eq!(
		unwind(session.index(), eql)?,
		Unwound::Concrete {
			handle: eql,
			category: Category::Function
		}
	);

	let alias = session.resolve("std.ArrayList")?.ok_or("alias did not resolve")?.handle;
	let target = session.resolve("std.array_list.ArrayList")?.ok_or("target did not resolve")?.handle;
	assert_eq!(unwind(session.index(), alias)?.concrete(), Some((target, Category::TypeFunction)));

	let looped = session.resolve("std.loop_a")?.ok_or("loop did not resolve")?.handle;
	assert!(matches!(unwind(session.index(), looped)?, Unwound::Cycle { .. }));

	let ghost = session.resolve("std.ghost")?.ok_or("ghost did not resolve")?.handle;
	assert_eq!(unwind(session.index(), ghost)?, Unwound::Dangling { alias: ghost });
	Ok(())
}
