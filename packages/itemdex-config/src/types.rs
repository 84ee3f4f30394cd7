use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub index: Index,
	pub postgres: Postgres,
	pub object_store: ObjectStore,
}

/// Search index connection and index names.
#[derive(Debug, Deserialize)]
pub struct Index {
	pub url: String,
	/// Overridden by `ELASTICSEARCH_API_KEY` when set.
	#[serde(default)]
	pub api_key: String,
	/// Overridden by `ELASTICSEARCH_API_KEY_ID` when set.
	#[serde(default)]
	pub api_key_id: String,
	pub item_index: String,
	pub record_index: String,
	/// Whether full-width escaping of query operator characters is applied to
	/// text facets before compilation.
	#[serde(default = "default_reserved_word_search")]
	pub reserved_word_search: bool,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	/// Overridden by `POSTGRES_DSN` when set.
	#[serde(default)]
	pub dsn: String,
	#[serde(default = "default_pool_max_conns")]
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct ObjectStore {
	pub url: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

fn default_reserved_word_search() -> bool {
	true
}

fn default_timeout_ms() -> u64 {
	30_000
}

fn default_pool_max_conns() -> u32 {
	8
}
