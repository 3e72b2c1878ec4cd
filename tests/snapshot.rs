//! Integration tests for loading index snapshots from disk.

mod utils;

use std::fs;

use stddoc::{DocsConfig, DocsError, DocsSession, Snapshot};
use tempfile::TempDir;

#[test]
fn json_snapshot_loads_into_a_session() -> Result<(), Box<dyn std::error::Error>> {
	let temp_dir = TempDir::new()?;
	let path = temp_dir.path().join("index.json");
	fs::write(&path, serde_json::to_vec(&utils::std_snapshot())?)?;

	let mut session = DocsSession::open(&path, DocsConfig::default())?;
	let document = session.document("std.math.add")?.ok_or("add has no document")?;
	assert!(document.as_str().starts_with("# std.math.add\n"));
	Ok(())
}

#[test]
fn bincode_snapshot_loads_into_a_session() -> Result<(), Box<dyn std::error::Error>> {
	let temp_dir = TempDir::new()?;
	let path = temp_dir.path().join("index.bin");
	fs::write(&path, utils::std_snapshot().to_bincode()?)?;

	assert_eq!(Snapshot::load(&path)?, utils::std_snapshot());
	let mut session = DocsSession::open(&path, DocsConfig::default())?;
	assert_eq!(session.modules()?, ["root", "std", "builtin"]);
	Ok(())
}

#[test]
fn hand_written_json_uses_field_defaults() -> Result<(), Box<dyn std::error::Error>> {
	let json = r#"{
		"modules": [{ "name": "root", "root": 0 }, { "name": "std", "root": 0 }],
		"decls": [
			{ "name": "root", "category": "namespace", "members": [1] },
			{ "name": "fmt", "parent": 0, "category": "namespace", "members": [2], "docs_html": "<p>Formatting.</p>" },
			{ "name": "format", "parent": 1, "category": "function", "docs_html": "<p>Writes formatted text.</p>" }
		]
	}"#;
	let snapshot = Snapshot::from_json(json.as_bytes())?;
	let mut session = DocsSession::new(stddoc::TableEngine::new(snapshot), DocsConfig::default());
	let members = session.members("fmt", stddoc::CategorySet::all())?;
	assert_eq!(members.len(), 1);
	assert_eq!(members[0].path, "std.fmt.format");
	assert_eq!(members[0].brief_doc, "Writes formatted text.");
	Ok(())
}

#[test]
fn missing_and_malformed_files_are_errors() -> Result<(), Box<dyn std::error::Error>> {
	let temp_dir = TempDir::new()?;

	let missing = temp_dir.path().join("absent.json");
	assert!(matches!(
		DocsSession::open(&missing, DocsConfig::default()),
		Err(DocsError::Io { .. })
	));

	let broken_json = temp_dir.path().join("broken.json");
	fs::write(&broken_json, "{ not json")?;
	assert!(matches!(
		DocsSession::open(&broken_json, DocsConfig::default()),
		Err(DocsError::Json { .. })
	));

	let broken_bin = temp_dir.path().join("broken.bin");
	fs::write(&broken_bin, [0xff_u8; 3])?;
	assert!(matches!(
		DocsSession::open(&broken_bin, DocsConfig::default()),
		Err(DocsError::Decode(_))
	));
	Ok(())
}
