use serde::{Deserialize, Serialize};

use crate::reserved;

/// One faceted filter request. Every facet is independently optional: an
/// absent facet contributes no clause at all, which is different from an
/// empty list. Facets prefixed `ne_` are the exclusion counterparts of their
/// unprefixed pair and feed the must-not side of the compiled query.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
	pub page_number: i64,
	pub page_size: i64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ignore_duplicated: Option<bool>,

	/// Empty means relevance order; the `inputId` sentinel defers ordering to
	/// the assembler.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sort_field: Option<String>,
	pub ascending: bool,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub subject_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body_of_knowledge_code: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub publish_sources: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_publish_sources: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub lesson_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_lesson_ids: Option<Vec<String>>,

	/// Union keyword mode: OR across terms and fields.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub search_texts: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_search_texts: Option<Vec<String>>,

	/// Intersection keyword mode: AND across terms, OR across fields per
	/// term. Takes precedence over `search_texts` when both are populated.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub must_search_texts: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_must_search_texts: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub catalog_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_catalog_ids: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub knowledge_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_knowledge_ids: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_years: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_item_years: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub editor_remarks: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_editor_remarks: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_label_names: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub product_codes: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_ids: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub sources: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_sources: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub version_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_version_ids: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub discrete_knowledge_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_discrete_knowledge_ids: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub recognition_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_recognition_ids: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub discrete_lesson_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_discrete_lesson_ids: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_types: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_user_types: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub answering_methods: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_answering_methods: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub answers: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub file_names: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_file_names: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub topics: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub import_record_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_import_record_ids: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub document_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_document_ids: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub document_repository_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ne_document_repository_ids: Option<Vec<String>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub online_readiness: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub product_status: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub copyright: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub has_latex: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_literacy: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_set: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub has_solution: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub has_video_urls: Option<bool>,
}
impl FilterSpec {
	/// Rewrites reserved operator tokens inside the free-text facets; run
	/// before compiling when the index was written with the same rewrite.
	pub fn escape_reserved(&mut self) {
		for texts in [
			self.editor_remarks.as_mut(),
			self.ne_editor_remarks.as_mut(),
			self.search_texts.as_mut(),
			self.must_search_texts.as_mut(),
			self.ne_must_search_texts.as_mut(),
		]
		.into_iter()
		.flatten()
		{
			reserved::escape_all(texts);
		}
	}

	/// The documented request contract: at least one of subject, years,
	/// keyword modes, or ids must be populated. The search path does not
	/// enforce this; it only exists so callers can check it themselves.
	pub fn has_required_facets(&self) -> bool {
		fn filled(list: &Option<Vec<String>>) -> bool {
			list.as_ref().map(|values| !values.is_empty()).unwrap_or(false)
		}

		self.subject_id.as_ref().map(|id| !id.is_empty()).unwrap_or(false)
			|| filled(&self.item_years)
			|| filled(&self.search_texts)
			|| filled(&self.must_search_texts)
			|| filled(&self.ids)
	}
}
