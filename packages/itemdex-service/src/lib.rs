//! Item search orchestration: filter compilation, index queries, relational
//! row assembly, saved searches, the write path, and batch object fetches.
//!
//! Backends sit behind the [`SearchIndex`], [`RowStore`], and [`ObjectStore`]
//! traits so tests swap in in-memory fakes; the default impls delegate to
//! `itemdex-storage`.

pub mod assemble;
pub mod fetch;
pub mod record;
pub mod search;
pub mod write;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use itemdex_config::Config;
use itemdex_storage::{
	db::Db,
	es::{IndexClient, SearchResponse},
	models::ItemRow,
	object::{ItemObject, ObjectClient},
	rows,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait SearchIndex
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, itemdex_storage::Result<SearchResponse>>;

	fn get<'a>(
		&'a self,
		index: &'a str,
		id: &'a str,
	) -> BoxFuture<'a, itemdex_storage::Result<Option<Value>>>;

	fn put<'a>(
		&'a self,
		index: &'a str,
		id: Option<&'a str>,
		doc: &'a Value,
	) -> BoxFuture<'a, itemdex_storage::Result<String>>;

	fn bulk<'a>(
		&'a self,
		index: &'a str,
		docs: &'a [(String, Value)],
	) -> BoxFuture<'a, itemdex_storage::Result<bool>>;

	fn refresh<'a>(&'a self, index: &'a str) -> BoxFuture<'a, itemdex_storage::Result<()>>;
}

pub trait RowStore
where
	Self: Send + Sync,
{
	fn fetch_by_ids<'a>(
		&'a self,
		ids: &'a [String],
	) -> BoxFuture<'a, itemdex_storage::Result<Vec<ItemRow>>>;
}

pub trait ObjectStore
where
	Self: Send + Sync,
{
	fn get<'a>(&'a self, id: &'a str)
	-> BoxFuture<'a, itemdex_storage::Result<Option<ItemObject>>>;
}

pub struct ItemService {
	pub cfg: Config,
	pub index: Arc<dyn SearchIndex>,
	pub rows: Arc<dyn RowStore>,
	pub objects: Arc<dyn ObjectStore>,
}
impl ItemService {
	pub async fn connect(cfg: Config) -> Result<Self> {
		let index = Arc::new(IndexBackend { client: IndexClient::new(&cfg.index)? });
		let rows = Arc::new(PgRowStore { db: Db::connect(&cfg.postgres).await? });
		let objects = Arc::new(HttpObjectStore { client: ObjectClient::new(&cfg.object_store)? });

		Ok(Self::with_backends(cfg, index, rows, objects))
	}

	pub fn with_backends(
		cfg: Config,
		index: Arc<dyn SearchIndex>,
		rows: Arc<dyn RowStore>,
		objects: Arc<dyn ObjectStore>,
	) -> Self {
		Self { cfg, index, rows, objects }
	}
}

pub struct IndexBackend {
	pub client: IndexClient,
}
impl SearchIndex for IndexBackend {
	fn search<'a>(
		&'a self,
		index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, itemdex_storage::Result<SearchResponse>> {
		Box::pin(self.client.search(index, body))
	}

	fn get<'a>(
		&'a self,
		index: &'a str,
		id: &'a str,
	) -> BoxFuture<'a, itemdex_storage::Result<Option<Value>>> {
		Box::pin(self.client.get(index, id))
	}

	fn put<'a>(
		&'a self,
		index: &'a str,
		id: Option<&'a str>,
		doc: &'a Value,
	) -> BoxFuture<'a, itemdex_storage::Result<String>> {
		Box::pin(self.client.put(index, id, doc))
	}

	fn bulk<'a>(
		&'a self,
		index: &'a str,
		docs: &'a [(String, Value)],
	) -> BoxFuture<'a, itemdex_storage::Result<bool>> {
		Box::pin(self.client.bulk(index, docs))
	}

	fn refresh<'a>(&'a self, index: &'a str) -> BoxFuture<'a, itemdex_storage::Result<()>> {
		Box::pin(self.client.refresh(index))
	}
}

pub struct PgRowStore {
	pub db: Db,
}
impl RowStore for PgRowStore {
	fn fetch_by_ids<'a>(
		&'a self,
		ids: &'a [String],
	) -> BoxFuture<'a, itemdex_storage::Result<Vec<ItemRow>>> {
		Box::pin(rows::fetch_by_ids(&self.db.pool, ids))
	}
}

pub struct HttpObjectStore {
	pub client: ObjectClient,
}
impl ObjectStore for HttpObjectStore {
	fn get<'a>(
		&'a self,
		id: &'a str,
	) -> BoxFuture<'a, itemdex_storage::Result<Option<ItemObject>>> {
		Box::pin(self.client.get(id))
	}
}
