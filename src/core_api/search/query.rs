use tracing::debug;

use super::SearchHit;
use crate::core_api::alias::unwind;
use crate::core_api::config::DocsConfig;
use crate::engine::RawEngine;
use crate::index::{Index, IndexResult};
use crate::render::markup;

/// Queries are case-insensitive unless they contain an uppercase character.
pub fn ignore_case_for(query: &str) -> bool {
	!query.chars().any(char::is_uppercase)
}

/// Engine-backed full-text search, in engine order, capped at the configured limit.
///
/// Blank queries return no hits. Matches whose alias chain leads nowhere are dropped.
pub fn search<E: RawEngine>(index: &mut Index<E>, config: &DocsConfig, query: &str) -> IndexResult<Vec<SearchHit>> {
	let query = query.trim();
	if query.is_empty() {
		return Ok(Vec::new());
	}

	let ignore_case = ignore_case_for(query);
	let handles = index.run_query(query, ignore_case)?;
	debug!(query, ignore_case, hits = handles.len(), "full-text query");

	let mut hits = Vec::new();
	for handle in handles {
		if hits.len() >= config.search_limit() {
			break;
		}
		let Some((target, category)) = unwind(index, handle)?.concrete() else {
			continue;
		};
		let name = index.declared_name(handle)?;
		let fqn = config.public_name(&index.fully_qualified_name(handle)?);
		let brief = markup::inline(&index.docs_html(target, true)?);
		hits.push(SearchHit {
			handle,
			name,
			fqn,
			category,
			brief,
		});
	}
	Ok(hits)
}
