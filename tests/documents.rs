//! Integration tests for rendered documents.

mod utils;

use pretty_assertions::assert_eq;
use stddoc::DocsConfig;
use utils::{session, session_with};

#[test]
fn function_document_has_every_section() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let document = session.document("std.math.add")?.ok_or("add has no document")?;
	assert_eq!(document.title(), "std.math.add");
	assert_eq!(
		document.as_str(),
		"# std.math.add

*function* `add`

Returns the sum of `a` and `b`.

```zig
pub fn add(comptime T: type, a: T, b: T) (error{Overflow}!T)
```

## Parameters

- `comptime T: type`
- `a: T` First operand.
- `b: T`

## Errors

- `Overflow`
  The sum does not fit in `T`.

## Example

```zig
try expect((try add(u8, 1, 2)) == 3);
```
"
	);
	Ok(())
}

#[test]
fn function_without_error_set_has_no_errors_heading() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let document = session.document("std.mem.eql")?.ok_or("eql has no document")?;
	let text = document.as_str();
	assert!(!text.contains("## Errors"));
	assert!(!text.contains("## Example"));
	assert!(!text.contains("## Source"));
	assert!(text.contains("## Parameters\n\n- `comptime T: type`\n- `a: []const T`\n- `b: []const T`"));
	Ok(())
}

#[test]
fn parameters_without_text_keep_their_place() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let text = session.document("std.math.clamp")?.ok_or("clamp has no document")?.into_string();
	assert!(text.ends_with("## Parameters\n\n- `val: anytype`\n- *(unnamed)*\n- `upper: anytype`\n"));
	Ok(())
}

#[test]
fn source_section_is_opt_in() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session_with(DocsConfig::default().with_source(true));
	let text = session.document("std.mem.eql")?.ok_or("eql has no document")?.into_string();
	assert!(text.ends_with(
		"## Source\n\n```zig\npub fn eql(comptime T: type, a: []const T, b: []const T) bool {\n    return std.mem.order(T, a, b) == .eq;\n}\n```\n"
	));
	Ok(())
}

#[test]
fn namespace_document_groups_members() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let document = session.document("std.mem")?.ok_or("mem has no document")?;
	assert_eq!(
		document.as_str(),
		"# std.mem

*namespace* `mem`

Memory utilities.

Slices, allocators and byte helpers.

## Types

- `Allocator` - Interface for allocating memory.

## Functions

- `eql` - Compares two slices and returns whether they are the same.

## Values

- `page_size` - Size of a memory page.
"
	);
	Ok(())
}

#[test]
fn private_members_are_listed_on_request() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session_with(DocsConfig::default().with_private(true));
	let text = session.document("std.mem")?.ok_or("mem has no document")?.into_string();
	assert!(text.contains("- `eql` - Compares two slices and returns whether they are the same.\n- `secret`"));
	Ok(())
}

#[test]
fn container_document_lists_fields() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let document = session.document("std.mem.Allocator")?.ok_or("Allocator has no document")?;
	assert_eq!(
		document.as_str(),
		"# std.mem.Allocator

*container* `Allocator`

Interface for allocating memory.

## Types

- `Error` - Allocation failures.

## Fields

- `ptr: *anyopaque`
- `vtable: *const VTable`
"
	);
	Ok(())
}

#[test]
fn error_set_document_lists_errors() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let document = session.document("std.mem.Allocator.Error")?.ok_or("Error has no document")?;
	assert_eq!(
		document.as_str(),
		"# std.mem.Allocator.Error

*error set* `Error`

Allocation failures.

## Errors

- `OutOfMemory`
  The allocator has no memory left.
"
	);
	Ok(())
}

#[test]
fn value_document_is_heading_and_prose() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let document = session.document("std.math.pi")?.ok_or("pi has no document")?;
	assert_eq!(
		document.as_str(),
		"# std.math.pi\n\n*constant* `pi`\n\nThe ratio of a circle's circumference to its diameter.\n"
	);
	Ok(())
}

#[test]
fn root_document_lists_top_level_items() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	for request in ["", "std"] {
		let document = session.document(request)?.ok_or("root has no document")?;
		assert_eq!(
			document.as_str(),
			"# std

*namespace* `std`

The standard library.

## Types

- `ArrayList` - A contiguous, growable list of items.

## Namespaces

- `array_list` - Growable arrays.
- `hash_map` - Hash maps.
- `heap` - Allocator implementations.
- `math` - Mathematical functions.
- `mem` - Memory utilities.
"
		);
	}
	Ok(())
}

#[test]
fn alias_renders_its_target_under_the_requested_title() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let document = session.document("ArrayList")?.ok_or("ArrayList has no document")?;
	assert_eq!(
		document.as_str(),
		"# std.ArrayList

*type function* `ArrayList`

A contiguous, growable list of items.

```zig
pub fn ArrayList(comptime T: type) type
```

## Parameters

- `comptime T: type` Element type.

## Types

- `Slice`

## Functions

- `init` - Initialize an empty list.
- `append` - Extend the list by one item.
"
	);
	Ok(())
}

#[test]
fn heuristic_match_is_titled_with_the_requested_path() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let document = session.document("std.HashMap")?.ok_or("HashMap has no document")?;
	assert_eq!(document.title(), "std.HashMap");
	assert!(document.as_str().starts_with("# std.HashMap\n\n*type function* `HashMap`\n\nGeneral purpose hash map.\n"));
	Ok(())
}

#[test]
fn error_without_description_is_a_bare_entry() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let text = session
		.document("std.array_list.ArrayList.append")?
		.ok_or("append has no document")?
		.into_string();
	assert!(text.ends_with("## Errors\n\n- `OutOfMemory`\n"));
	Ok(())
}

#[test]
fn separate_module_document_uses_its_own_name() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	let document = session.document("builtin")?.ok_or("builtin has no document")?;
	assert_eq!(
		document.as_str(),
		"# builtin

*namespace* `builtin`

Compiler-provided values.

## Types

- `SourceLocation` - Where a call site lives.
"
	);
	Ok(())
}

#[test]
fn unresolvable_requests_have_no_document() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = session();
	for request in ["std.nope", "root.HashMap", "std.loop_a", "std.ghost"] {
		assert_eq!(session.document(request)?, None, "{request}");
	}
	Ok(())
}
