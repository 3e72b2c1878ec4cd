//! Full-text search over the index and keyword ranking over the builtin function list.
#![allow(clippy::missing_docs_in_private_items)]

mod keyword;
mod query;
mod types;

pub use keyword::{DEFAULT_BUILTINS, default_builtins, load_builtins, parse_builtins, rank_builtins};
pub use query::{ignore_case_for, search};
pub use types::{Builtin, KeywordOutcome, RankedBuiltin, SearchHit};
