use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One assembled hierarchical record per distinct item id, produced by
/// folding the flat relational rows that share that id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Content {
	pub id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fidelity: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub difficulty: Option<String>,
	pub applicable_years: Vec<i32>,
	pub subject_ids: Vec<String>,
	pub content: ItemContent,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub solution: Option<String>,
	pub is_set: bool,
	pub is_online_ready: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub online_readiness: Option<String>,
	pub metadata: HashMap<String, String>,
	pub resource_links: Vec<ResourceLink>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_on: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_on: Option<String>,
	pub body_of_knowledges: Vec<BodyOfKnowledge>,
}

/// JSON payload stored in the relational `content` column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemContent {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub preamble: Option<String>,
	pub questions: Vec<ContentQuestion>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub question_count: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub answer_count: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentQuestion {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub stem: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub solution: Option<String>,
	pub options: Vec<String>,
	pub answers: Vec<Vec<String>>,
	pub propose_answers: Vec<Vec<String>>,
	pub supplementals: HashMap<String, String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub option_first_letter: Option<String>,
	pub latex_answers: Vec<bool>,
	/// Set positionally from the row's `question_index` column, not from the
	/// JSON payload.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub answering_method: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyOfKnowledge {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub subject_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub initiation_year: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub final_year: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceLink {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rel: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub href: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub content_type: Option<String>,
}

/// The paged response envelope exposed to the HTTP layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagedResult {
	pub content: Vec<Content>,
	pub number: i64,
	pub size: i64,
	pub number_of_elements: i64,
	pub total_elements: i64,
	pub total_pages: i64,
	pub has_content: bool,
	pub has_next_page: bool,
	pub has_previous_page: bool,
	pub is_first_page: bool,
	pub is_last_page: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn paged_result_serializes_with_camel_case_envelope() {
		let result = PagedResult {
			number: 1,
			size: 10,
			total_elements: 25,
			total_pages: 3,
			has_content: false,
			is_first_page: true,
			..PagedResult::default()
		};
		let value = serde_json::to_value(&result).expect("serialize");

		assert_eq!(value["totalElements"], 25);
		assert_eq!(value["totalPages"], 3);
		assert_eq!(value["isFirstPage"], true);
		assert_eq!(value["numberOfElements"], 0);
	}

	#[test]
	fn item_content_decodes_relational_payload() {
		let raw = r#"{
			"id": "A",
			"preamble": "read the passage",
			"questionCount": 2,
			"questions": [
				{ "stem": "first", "options": ["a", "b"] },
				{ "stem": "second", "answers": [["b"]] }
			]
		}"#;
		let content: ItemContent = serde_json::from_str(raw).expect("decode");

		assert_eq!(content.question_count, Some(2));
		assert_eq!(content.questions.len(), 2);
		assert_eq!(content.questions[0].options, vec!["a", "b"]);
		assert_eq!(content.questions[1].answers, vec![vec!["b".to_string()]]);
	}
}
