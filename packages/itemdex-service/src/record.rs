//! Saved searches, persisted in the record index as `{"data": "<json>"}`
//! documents. Both directions soft-fail: the caller gets a sentinel, never
//! an error.

use serde_json::Value;
use uuid::Uuid;

use itemdex_domain::FilterSpec;

use crate::ItemService;

impl ItemService {
	/// Persists a filter and returns its record id, `None` on any failure.
	pub async fn save_search(&self, spec: &FilterSpec) -> Option<String> {
		let data = match serde_json::to_string(spec) {
			Ok(data) => data,
			Err(err) => {
				tracing::warn!(error = %err, "Failed to serialize a search record.");

				return None;
			},
		};
		let id = Uuid::new_v4().to_string();
		let doc = serde_json::json!({ "data": data });

		match self.index.put(&self.cfg.index.record_index, Some(&id), &doc).await {
			Ok(written) => Some(written),
			Err(err) => {
				tracing::warn!(error = %err, "Failed to write a search record.");

				None
			},
		}
	}

	/// Loads a saved filter by record id. The record index is refreshed first
	/// so a record saved moments ago is already readable. Not-found and every
	/// failure mode collapse to `None`.
	pub async fn load_search(&self, id: &str) -> Option<FilterSpec> {
		if let Err(err) = self.index.refresh(&self.cfg.index.record_index).await {
			tracing::warn!(error = %err, "Failed to refresh the record index.");

			return None;
		}

		let doc = match self.index.get(&self.cfg.index.record_index, id).await {
			Ok(Some(doc)) => doc,
			Ok(None) => {
				tracing::warn!(record_id = id, "Search record not found.");

				return None;
			},
			Err(err) => {
				tracing::warn!(error = %err, "Failed to read a search record.");

				return None;
			},
		};

		match doc.get("data").and_then(Value::as_str).map(serde_json::from_str) {
			Some(Ok(spec)) => Some(spec),
			_ => {
				tracing::warn!(record_id = id, "Search record payload is malformed.");

				None
			},
		}
	}
}
