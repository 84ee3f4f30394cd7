//! The index write path. Every outcome collapses to one boolean; bulk mode
//! reports no partial successes.

use itemdex_domain::ItemDoc;

use crate::ItemService;

impl ItemService {
	pub async fn upsert(&self, doc: ItemDoc) -> bool {
		let mut doc = doc;

		if self.cfg.index.reserved_word_search {
			doc.escape_reserved();
		}

		let value = match serde_json::to_value(&doc) {
			Ok(value) => value,
			Err(err) => {
				tracing::warn!(error = %err, "Failed to serialize an item document.");

				return false;
			},
		};

		match self.index.put(&self.cfg.index.item_index, Some(&doc.id), &value).await {
			Ok(_) => true,
			Err(err) => {
				tracing::warn!(error = %err, item_id = %doc.id, "Item upsert failed.");

				false
			},
		}
	}

	/// `false` for an empty batch and for any failure anywhere in the batch.
	pub async fn bulk_upsert(&self, docs: Vec<ItemDoc>) -> bool {
		if docs.is_empty() {
			return false;
		}

		let mut pairs = Vec::with_capacity(docs.len());

		for mut doc in docs {
			if self.cfg.index.reserved_word_search {
				doc.escape_reserved();
			}

			match serde_json::to_value(&doc) {
				Ok(value) => pairs.push((doc.id, value)),
				Err(err) => {
					tracing::warn!(error = %err, "Failed to serialize an item document.");

					return false;
				},
			}
		}

		match self.index.bulk(&self.cfg.index.item_index, &pairs).await {
			Ok(ok) => ok,
			Err(err) => {
				tracing::warn!(error = %err, "Bulk item upsert failed.");

				false
			},
		}
	}
}
