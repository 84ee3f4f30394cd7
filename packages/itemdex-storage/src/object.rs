use std::time::Duration;

use reqwest::Client;

use crate::Result;

/// One fetched per-item document from the object store.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemObject {
	pub id: String,
	pub content_type: Option<String>,
	pub bytes: Vec<u8>,
}

pub struct ObjectClient {
	client: Client,
	base_url: String,
}
impl ObjectClient {
	pub fn new(cfg: &itemdex_config::ObjectStore) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self { client, base_url: cfg.url.trim_end_matches('/').to_string() })
	}

	/// One document by id. Any non-success status maps to `None`; the batch
	/// fetcher reports per-id misses rather than failing the whole batch.
	pub async fn get(&self, id: &str) -> Result<Option<ItemObject>> {
		let url = format!("{}/{id}", self.base_url);
		let res = self.client.get(url).send().await?;

		if !res.status().is_success() {
			return Ok(None);
		}

		let content_type = res
			.headers()
			.get(reqwest::header::CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.map(str::to_string);
		let bytes = res.bytes().await?.to_vec();

		Ok(Some(ItemObject { id: id.to_string(), content_type, bytes }))
	}
}
