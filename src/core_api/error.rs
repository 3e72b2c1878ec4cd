use std::path::PathBuf;

use crate::engine::EngineFault;

/// Aggregate errors produced by the stddoc API.
///
/// A name that resolves to nothing is not an error; lookups report it as `None` or an empty list.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
	/// The engine misbehaved or was handed a malformed index.
	#[error(transparent)]
	Engine(#[from] EngineFault),
	/// Failed to read an index or builtin list from disk.
	#[error("failed to read {}: {source}", .path.display())]
	Io {
		/// File that could not be read.
		path: PathBuf,
		/// Underlying IO error.
		source: std::io::Error,
	},
	/// Failed to decode JSON input.
	#[error("invalid JSON in {context}: {source}")]
	Json {
		/// What was being parsed.
		context: String,
		/// Underlying parse error.
		source: serde_json::Error,
	},
	/// Failed to decode a binary index snapshot.
	#[error("invalid index snapshot: {0}")]
	Decode(#[from] bincode::error::DecodeError),
	/// Failed to encode a binary index snapshot.
	#[error("failed to encode index snapshot: {0}")]
	Encode(#[from] bincode::error::EncodeError),
	/// Configuration could not be completed.
	#[error("{0}")]
	Config(String),
}

/// Result type returned by the stddoc library.
pub type Result<T> = std::result::Result<T, DocsError>;
