//! Minimal Elasticsearch REST client. Only the handful of endpoints the
//! service layer touches: `_search`, `_doc` get/put, `_bulk`, `_refresh`.

use std::time::Duration;

use base64::Engine as _;
use reqwest::{
	Client, StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

pub struct IndexClient {
	client: Client,
	base_url: String,
}
impl IndexClient {
	pub fn new(cfg: &itemdex_config::Index) -> Result<Self> {
		let mut headers = HeaderMap::new();

		if !cfg.api_key_id.is_empty() && !cfg.api_key.is_empty() {
			let encoded = base64::engine::general_purpose::STANDARD
				.encode(format!("{}:{}", cfg.api_key_id, cfg.api_key));
			let mut value: HeaderValue = format!("ApiKey {encoded}").parse()?;

			value.set_sensitive(true);
			headers.insert(AUTHORIZATION, value);
		}

		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(headers)
			.build()?;

		Ok(Self { client, base_url: cfg.url.trim_end_matches('/').to_string() })
	}

	pub async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse> {
		let url = format!("{}/{index}/_search", self.base_url);
		let res = self.client.post(url).json(body).send().await?;
		let json: Value = check_status(res).await?.json().await?;

		Ok(SearchResponse::from_value(&json))
	}

	/// Source payload of one document, `None` when the index has no document
	/// under that id.
	pub async fn get(&self, index: &str, id: &str) -> Result<Option<Value>> {
		let url = format!("{}/{index}/_doc/{id}", self.base_url);
		let res = self.client.get(url).send().await?;

		if res.status() == StatusCode::NOT_FOUND {
			return Ok(None);
		}

		let json: Value = check_status(res).await?.json().await?;

		Ok(json.get("_source").cloned())
	}

	/// Indexes one document. With an explicit id the write is an upsert;
	/// without one the index generates the id, which is returned either way.
	pub async fn put<T: Serialize>(&self, index: &str, id: Option<&str>, doc: &T) -> Result<String> {
		let res = match id {
			Some(id) => {
				let url = format!("{}/{index}/_doc/{id}", self.base_url);

				self.client.put(url).json(doc).send().await?
			},
			None => {
				let url = format!("{}/{index}/_doc", self.base_url);

				self.client.post(url).json(doc).send().await?
			},
		};
		let json: Value = check_status(res).await?.json().await?;

		json.get("_id")
			.and_then(Value::as_str)
			.map(str::to_string)
			.ok_or_else(|| Error::InvalidArgument("Index response is missing _id.".to_string()))
	}

	/// Bulk-indexes documents. `Ok(true)` only when no item-level error is
	/// reported; callers collapse partial failures to a single flag.
	pub async fn bulk<T: Serialize>(&self, index: &str, docs: &[(String, T)]) -> Result<bool> {
		let url = format!("{}/_bulk", self.base_url);
		let body = bulk_body(index, docs)?;
		let res = self
			.client
			.post(url)
			.header(CONTENT_TYPE, "application/x-ndjson")
			.body(body)
			.send()
			.await?;
		let json: Value = check_status(res).await?.json().await?;

		Ok(!json.get("errors").and_then(Value::as_bool).unwrap_or(true))
	}

	/// Forces a refresh so documents written moments ago become searchable
	/// and gettable.
	pub async fn refresh(&self, index: &str) -> Result<()> {
		let url = format!("{}/{index}/_refresh", self.base_url);
		let res = self.client.post(url).send().await?;

		check_status(res).await?;

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResponse {
	pub total: i64,
	pub sources: Vec<Value>,
}
impl SearchResponse {
	pub fn from_value(json: &Value) -> Self {
		let total = json["hits"]["total"]["value"].as_i64().unwrap_or(0);
		let sources = json["hits"]["hits"]
			.as_array()
			.map(|hits| hits.iter().filter_map(|hit| hit.get("_source").cloned()).collect())
			.unwrap_or_default();

		Self { total, sources }
	}

	/// Hit ids in result order, read from the `id` source field.
	pub fn ids(&self) -> Vec<String> {
		self.sources
			.iter()
			.filter_map(|source| source.get("id").and_then(Value::as_str))
			.map(str::to_string)
			.collect()
	}
}

/// Renders a `_search` request body. `sort` and `source` are omitted when
/// absent so the index applies its defaults.
pub fn search_body(
	query: Value,
	sort: Option<Value>,
	from: i64,
	size: i64,
	source: Option<&[&str]>,
) -> Value {
	let mut body = serde_json::Map::new();

	body.insert("query".to_string(), query);
	body.insert("from".to_string(), Value::from(from));
	body.insert("size".to_string(), Value::from(size));
	if let Some(sort) = sort {
		body.insert("sort".to_string(), sort);
	}
	if let Some(fields) = source {
		body.insert("_source".to_string(), serde_json::json!(fields));
	}

	Value::Object(body)
}

fn bulk_body<T: Serialize>(index: &str, docs: &[(String, T)]) -> Result<String> {
	let mut body = String::new();

	for (id, doc) in docs {
		let action = serde_json::json!({ "index": { "_index": index, "_id": id } });

		body.push_str(&serde_json::to_string(&action)?);
		body.push('\n');
		body.push_str(&serde_json::to_string(doc)?);
		body.push('\n');
	}

	Ok(body)
}

async fn check_status(res: reqwest::Response) -> Result<reqwest::Response> {
	let status = res.status();

	if status.is_success() {
		return Ok(res);
	}

	let body = res.text().await.unwrap_or_default();

	Err(Error::Status { status: status.as_u16(), body })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn search_body_omits_absent_sections() {
		let body =
			search_body(serde_json::json!({ "bool": {} }), None, 20, 10, None);

		assert_eq!(body["from"], 20);
		assert_eq!(body["size"], 10);
		assert!(body.get("sort").is_none());
		assert!(body.get("_source").is_none());
	}

	#[test]
	fn search_body_carries_sort_and_projection() {
		let sort = serde_json::json!([{ "createdOn": { "order": "desc" } }]);
		let body = search_body(serde_json::json!({ "bool": {} }), Some(sort), 0, 5, Some(&["id"]));

		assert_eq!(body["sort"][0]["createdOn"]["order"], "desc");
		assert_eq!(body["_source"][0], "id");
	}

	#[test]
	fn bulk_body_is_one_action_line_per_document() {
		let docs = vec![
			("A".to_string(), serde_json::json!({ "id": "A" })),
			("B".to_string(), serde_json::json!({ "id": "B" })),
		];
		let body = bulk_body("item", &docs).expect("render bulk body");
		let lines: Vec<&str> = body.lines().collect();

		assert_eq!(lines.len(), 4);
		assert!(lines[0].contains(r#""_id":"A""#));
		assert!(lines[2].contains(r#""_id":"B""#));
		assert!(body.ends_with('\n'));
	}

	#[test]
	fn search_response_reads_totals_and_sources() {
		let json = serde_json::json!({
			"hits": {
				"total": { "value": 42, "relation": "eq" },
				"hits": [
					{ "_id": "A", "_source": { "id": "A" } },
					{ "_id": "B", "_source": { "id": "B" } }
				]
			}
		});
		let response = SearchResponse::from_value(&json);

		assert_eq!(response.total, 42);
		assert_eq!(response.ids(), vec!["A".to_string(), "B".to_string()]);
	}

	#[test]
	fn search_response_tolerates_malformed_payloads() {
		let response = SearchResponse::from_value(&serde_json::json!({}));

		assert_eq!(response.total, 0);
		assert!(response.sources.is_empty());
	}
}
