//! Boolean query tree for the item index, plus the filter-spec compiler.
//!
//! [`compile`] turns a [`FilterSpec`](itemdex_domain::FilterSpec) into a
//! [`Query`]; [`Query::to_value`] renders the index's bool-query DSL. The
//! tree itself is backend-agnostic so the compiler stays pure and testable.

pub mod compile;
pub mod field;

pub use compile::{compile, compile_sort};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Query {
	/// Composite clause. Empty sections are omitted from the rendered DSL.
	Bool { must: Vec<Query>, must_not: Vec<Query>, should: Vec<Query>, min_should: Option<u32> },
	/// Membership of a field value in a set.
	Terms { field: &'static str, values: Vec<String> },
	/// Exact boolean term match.
	Term { field: &'static str, value: bool },
	/// Full-phrase match against an analyzed text field.
	MatchPhrase { field: &'static str, phrase: String },
	Exists { field: &'static str },
	Wildcard { field: &'static str, pattern: &'static str },
	/// Scopes the inner query to a single element of an array-of-objects
	/// field; conditions inside must hold within one element.
	Nested { path: &'static str, query: Box<Query> },
}
impl Query {
	pub fn bool_must(must: Vec<Query>) -> Self {
		Self::Bool { must, must_not: Vec::new(), should: Vec::new(), min_should: None }
	}

	pub fn bool_should(should: Vec<Query>) -> Self {
		Self::Bool { must: Vec::new(), must_not: Vec::new(), should, min_should: Some(1) }
	}

	pub fn nested(path: &'static str, query: Query) -> Self {
		Self::Nested { path, query: Box::new(query) }
	}

	pub fn to_value(&self) -> Value {
		match self {
			Self::Bool { must, must_not, should, min_should } => {
				let mut body = serde_json::Map::new();

				if !must.is_empty() {
					body.insert(
						"must".to_string(),
						Value::Array(must.iter().map(Self::to_value).collect()),
					);
				}
				if !must_not.is_empty() {
					body.insert(
						"must_not".to_string(),
						Value::Array(must_not.iter().map(Self::to_value).collect()),
					);
				}
				if !should.is_empty() {
					body.insert(
						"should".to_string(),
						Value::Array(should.iter().map(Self::to_value).collect()),
					);
				}
				if let Some(min) = min_should {
					body.insert("minimum_should_match".to_string(), Value::from(*min));
				}

				serde_json::json!({ "bool": body })
			},
			Self::Terms { field, values } => {
				serde_json::json!({ "terms": { *field: values } })
			},
			Self::Term { field, value } => {
				serde_json::json!({ "term": { *field: { "value": value } } })
			},
			Self::MatchPhrase { field, phrase } => {
				serde_json::json!({ "match_phrase": { *field: { "query": phrase } } })
			},
			Self::Exists { field } => {
				serde_json::json!({ "exists": { "field": *field } })
			},
			Self::Wildcard { field, pattern } => {
				serde_json::json!({ "wildcard": { *field: { "value": *pattern } } })
			},
			Self::Nested { path, query } => {
				serde_json::json!({ "nested": { "path": *path, "query": query.to_value() } })
			},
		}
	}

	/// Clauses on the must side, when this is a bool query.
	pub fn must_clauses(&self) -> &[Query] {
		match self {
			Self::Bool { must, .. } => must,
			_ => &[],
		}
	}

	/// Clauses on the must-not side, when this is a bool query.
	pub fn must_not_clauses(&self) -> &[Query] {
		match self {
			Self::Bool { must_not, .. } => must_not,
			_ => &[],
		}
	}
}

/// Index-level sort request. `None` from [`compile_sort`] means natural
/// (relevance) order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
	pub field: String,
	pub ascending: bool,
}
impl SortSpec {
	pub fn to_value(&self) -> Value {
		let order = if self.ascending { "asc" } else { "desc" };

		serde_json::json!([{ self.field.clone(): { "order": order } }])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bool_rendering_omits_empty_sections() {
		let query = Query::bool_must(vec![Query::Terms {
			field: field::SOURCES,
			values: vec!["s1".to_string()],
		}]);
		let value = query.to_value();

		assert_eq!(value["bool"]["must"][0]["terms"]["sources"][0], "s1");
		assert!(value["bool"].get("must_not").is_none());
		assert!(value["bool"].get("should").is_none());
		assert!(value["bool"].get("minimum_should_match").is_none());
	}

	#[test]
	fn should_group_carries_minimum_should_match() {
		let query = Query::bool_should(vec![
			Query::MatchPhrase { field: field::PREAMBLE, phrase: "a".to_string() },
			Query::MatchPhrase { field: field::SOLUTION, phrase: "a".to_string() },
		]);
		let value = query.to_value();

		assert_eq!(value["bool"]["minimum_should_match"], 1);
		assert_eq!(value["bool"]["should"].as_array().map(Vec::len), Some(2));
	}

	#[test]
	fn nested_rendering_wraps_inner_query() {
		let query = Query::nested(
			field::QUESTIONS,
			Query::Terms { field: field::QUESTION_ANSWERING_METHOD, values: vec!["mc".to_string()] },
		);
		let value = query.to_value();

		assert_eq!(value["nested"]["path"], "questions");
		assert_eq!(
			value["nested"]["query"]["terms"]["questions.answeringMethod"][0],
			"mc"
		);
	}

	#[test]
	fn sort_spec_renders_order_keyword() {
		let sort = SortSpec { field: "createdOn".to_string(), ascending: false };

		assert_eq!(sort.to_value()[0]["createdOn"]["order"], "desc");
	}
}
