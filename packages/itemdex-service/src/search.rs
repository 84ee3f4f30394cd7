//! The result assembler: compile, query the index, fetch relational rows,
//! fold, reorder, paginate.
//!
//! Index failures soft-fail to `Ok(None)`, indistinguishable from zero hits.
//! Relational failures propagate.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use itemdex_domain::{Content, FilterSpec, PagedResult, definition};
use itemdex_storage::es::{self, SearchResponse};

use crate::{ItemService, Result, assemble};

const ID_PROJECTION: &[&str] = &["id"];

impl ItemService {
	/// `Ok(None)` covers both "no match" and "index unavailable"; only the
	/// relational store and payload decoding produce `Err`.
	pub async fn search(&self, spec: &FilterSpec) -> Result<Option<PagedResult>> {
		let spec = self.prepared(spec);

		if input_order_requested(&spec) {
			self.search_input_order(&spec).await
		} else {
			self.search_paged(&spec).await
		}
	}

	/// The unpaged id-only variant: full matching id set plus total, no
	/// relational fetch. Soft-failed to empty.
	pub async fn search_ids(&self, spec: &FilterSpec) -> (Vec<String>, i64) {
		let spec = self.prepared(spec);
		let body = es::search_body(
			query_value(&spec),
			sort_value(&spec),
			0,
			i64::from(i32::MAX),
			Some(ID_PROJECTION),
		);

		match self.run_query(&body).await {
			Some(response) => (response.ids(), response.total),
			None => (Vec::new(), 0),
		}
	}

	fn prepared(&self, spec: &FilterSpec) -> FilterSpec {
		let mut spec = spec.clone();

		if self.cfg.index.reserved_word_search {
			spec.escape_reserved();
		}

		spec
	}

	async fn search_paged(&self, spec: &FilterSpec) -> Result<Option<PagedResult>> {
		let from = (spec.page_number - 1) * spec.page_size;
		let body = es::search_body(
			query_value(spec),
			sort_value(spec),
			from,
			spec.page_size,
			Some(ID_PROJECTION),
		);
		let Some(response) = self.run_query(&body).await else { return Ok(None) };

		if response.total == 0 {
			return Ok(None);
		}

		let ids = response.ids();
		let contents = self.contents_in_order(&ids).await?;

		Ok(Some(paginate(contents, spec.page_number, spec.page_size, response.total)))
	}

	async fn search_input_order(&self, spec: &FilterSpec) -> Result<Option<PagedResult>> {
		let requested = spec.ids.as_deref().unwrap_or(&[]);
		// The window parameters are local to the request body; the caller's
		// paging fields stay untouched for the metadata below.
		let body = es::search_body(
			query_value(spec),
			sort_value(spec),
			0,
			requested.len() as i64,
			Some(ID_PROJECTION),
		);
		let Some(response) = self.run_query(&body).await else { return Ok(None) };

		if response.total == 0 {
			return Ok(None);
		}

		let matched: HashSet<String> = response.ids().into_iter().collect();
		let surviving: Vec<String> =
			requested.iter().filter(|id| matched.contains(*id)).cloned().collect();
		let start = (spec.page_size.max(0) * (spec.page_number - 1).max(0)) as usize;
		let window: Vec<String> = surviving
			.into_iter()
			.skip(start)
			.take(spec.page_size.max(0) as usize)
			.collect();
		let contents = self.contents_in_order(&window).await?;

		Ok(Some(paginate(contents, spec.page_number, spec.page_size, response.total)))
	}

	/// Rows for `ids`, folded and re-emitted in `ids` order. Ids with no rows
	/// are silently skipped.
	async fn contents_in_order(&self, ids: &[String]) -> Result<Vec<Content>> {
		let rows = self.rows.fetch_by_ids(ids).await?;
		let mut by_id: HashMap<String, Content> = assemble::fold_rows(rows)?
			.into_iter()
			.map(|content| (content.id.clone(), content))
			.collect();

		Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
	}

	async fn run_query(&self, body: &Value) -> Option<SearchResponse> {
		match self.index.search(&self.cfg.index.item_index, body).await {
			Ok(response) => Some(response),
			Err(err) => {
				tracing::warn!(error = %err, "Item index query failed.");

				None
			},
		}
	}
}

fn input_order_requested(spec: &FilterSpec) -> bool {
	spec.sort_field.as_deref() == Some(definition::SORT_BY_INPUT_IDS)
		&& spec.ids.as_deref().map(|ids| !ids.is_empty()).unwrap_or(false)
}

fn query_value(spec: &FilterSpec) -> Value {
	itemdex_query::compile(spec).to_value()
}

fn sort_value(spec: &FilterSpec) -> Option<Value> {
	itemdex_query::compile_sort(spec).map(|sort| sort.to_value())
}

pub(crate) fn paginate(
	content: Vec<Content>,
	page_number: i64,
	page_size: i64,
	total: i64,
) -> PagedResult {
	let total_pages = if page_size <= 0 { 0 } else { (total + page_size - 1) / page_size };
	let number_of_elements = content.len() as i64;

	PagedResult {
		content,
		number: page_number,
		size: page_size,
		number_of_elements,
		total_elements: total,
		total_pages,
		has_content: number_of_elements > 0,
		has_next_page: page_number != total_pages,
		has_previous_page: page_number != 1,
		is_first_page: page_number == 1,
		is_last_page: page_number == total_pages,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn total_pages_round_up() {
		let paged = paginate(Vec::new(), 1, 10, 25);

		assert_eq!(paged.total_pages, 3);
		assert!(paged.is_first_page);
		assert!(!paged.is_last_page);
		assert!(paged.has_next_page);
		assert!(!paged.has_previous_page);
	}

	#[test]
	fn last_page_flags_flip_on_the_final_page() {
		let paged = paginate(Vec::new(), 3, 10, 25);

		assert!(paged.is_last_page);
		assert!(!paged.has_next_page);
		assert!(paged.has_previous_page);
		assert!(!paged.is_first_page);
	}

	#[test]
	fn non_positive_page_size_means_zero_pages() {
		let paged = paginate(Vec::new(), 1, 0, 25);

		assert_eq!(paged.total_pages, 0);
		assert!(!paged.is_last_page);
	}

	#[test]
	fn exact_division_has_no_partial_page() {
		assert_eq!(paginate(Vec::new(), 1, 10, 30).total_pages, 3);
		assert_eq!(paginate(Vec::new(), 1, 10, 31).total_pages, 4);
	}

	#[test]
	fn input_order_regime_needs_sentinel_and_ids() {
		let mut spec = FilterSpec {
			sort_field: Some(definition::SORT_BY_INPUT_IDS.to_string()),
			..FilterSpec::default()
		};

		assert!(!input_order_requested(&spec));

		spec.ids = Some(vec!["A".to_string()]);

		assert!(input_order_requested(&spec));

		spec.sort_field = Some("createdOn".to_string());

		assert!(!input_order_requested(&spec));
	}
}
