use serde::{Deserialize, Serialize};

use crate::reserved;

/// The canonical index-side item record. Field names match the index mapping;
/// conditions on the nested arrays must hold within a single array element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDoc {
	pub id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub product_codes: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label_names: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sources: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub publish_sources: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub version_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub document_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub document_repository_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub regular_knowledge_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discrete_knowledge_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub regular_lesson_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discrete_lesson_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub recognition_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub subject_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body_of_knowledge_codes: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body_of_knowledge_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_years: Option<Vec<ItemYear>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub catalogs: Option<Vec<Catalog>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub product_statuses: Option<Vec<ProductStatus>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_types: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub file_names: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub import_record_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub online_readiness: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub catalog_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_literacy: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub copyright: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_set: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub solution: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub preamble: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub editor_remark: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub topic: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub has_video_urls: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub questions: Option<Vec<Question>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_on: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_on: Option<String>,
}
impl ItemDoc {
	/// Rewrites reserved operator tokens in every text-typed field; run
	/// before writing when reserved-word search is enabled so queries going
	/// through the same rewrite keep matching.
	pub fn escape_reserved(&mut self) {
		for text in [
			self.editor_remark.as_mut(),
			self.preamble.as_mut(),
			self.solution.as_mut(),
		]
		.into_iter()
		.flatten()
		{
			reserved::escape_in_place(text);
		}

		if let Some(statuses) = self.product_statuses.as_mut() {
			for status in statuses {
				if let Some(comment) = status.comment.as_mut() {
					reserved::escape_in_place(comment);
				}
			}
		}
		if let Some(questions) = self.questions.as_mut() {
			for question in questions {
				if let Some(stem) = question.stem.as_mut() {
					reserved::escape_in_place(stem);
				}
				if let Some(options) = question.options.as_mut() {
					reserved::escape_all(options);
				}
				if let Some(keywords) = question.answer_keywords.as_mut() {
					reserved::escape_all(keywords);
				}
			}
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Question {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub stem: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub options: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub answer_keywords: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub answering_method: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub answers: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub propose_answers: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub latex_answers: Option<Vec<bool>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemYear {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub year: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body_of_knowledge_codes: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dimension_value_ids: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub usage_types: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_shared: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sources: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_types: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductStatus {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub target: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escape_reserved_covers_nested_question_texts() {
		let mut doc = ItemDoc {
			id: "A".to_string(),
			preamble: Some("solve x+1".to_string()),
			questions: Some(vec![Question {
				stem: Some("what is (x)?".to_string()),
				options: Some(vec!["a=1".to_string(), "none".to_string()]),
				answer_keywords: Some(vec!["x*2".to_string()]),
				..Question::default()
			}]),
			product_statuses: Some(vec![ProductStatus {
				status: Some("on_shelf".to_string()),
				comment: Some("shelf [A]".to_string()),
				..ProductStatus::default()
			}]),
			..ItemDoc::default()
		};

		doc.escape_reserved();

		assert_eq!(doc.preamble.as_deref(), Some("solve x＋1"));

		let question = &doc.questions.as_ref().unwrap()[0];

		assert_eq!(question.stem.as_deref(), Some("what is （x）？"));
		assert_eq!(question.options.as_deref().unwrap()[0], "a＝1");
		assert_eq!(question.answer_keywords.as_deref().unwrap()[0], "x＊2");
		assert_eq!(
			doc.product_statuses.as_ref().unwrap()[0].comment.as_deref(),
			Some("shelf ［A］")
		);
	}

	#[test]
	fn doc_serializes_with_index_field_names() {
		let doc = ItemDoc {
			id: "A".to_string(),
			item_years: Some(vec![ItemYear { year: Some("2023".to_string()), ..ItemYear::default() }]),
			..ItemDoc::default()
		};
		let value = serde_json::to_value(&doc).expect("serialize");

		assert_eq!(value["id"], "A");
		assert_eq!(value["itemYears"][0]["year"], "2023");
	}
}
