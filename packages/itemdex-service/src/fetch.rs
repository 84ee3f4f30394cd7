//! Batch object fetches with bounded concurrency: ids are drained in fixed
//! groups, each group fully awaited before the next starts. No persistent
//! worker pool, no unbounded fan-out.

use futures::future;

use itemdex_storage::object::ItemObject;

use crate::{ItemService, Result};

const FETCH_GROUP_SIZE: usize = 20;

impl ItemService {
	/// One slot per requested id, in request order. Misses and per-id fetch
	/// failures are `None`; only task join failures error the whole batch.
	pub async fn fetch_objects(&self, ids: &[String]) -> Result<Vec<Option<ItemObject>>> {
		let mut results = Vec::with_capacity(ids.len());

		for group in ids.chunks(FETCH_GROUP_SIZE) {
			let handles: Vec<_> = group
				.iter()
				.map(|id| {
					let objects = self.objects.clone();
					let id = id.clone();

					tokio::spawn(async move { objects.get(&id).await })
				})
				.collect();

			for joined in future::join_all(handles).await {
				match joined? {
					Ok(object) => results.push(object),
					Err(err) => {
						tracing::warn!(error = %err, "Object fetch failed.");

						results.push(None);
					},
				}
			}
		}

		Ok(results)
	}
}
