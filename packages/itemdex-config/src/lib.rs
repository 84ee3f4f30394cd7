mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Index, ObjectStore, Postgres};

use std::{env, fs, path::Path};

/// Reads, overlays environment secrets onto, and validates a config file.
/// Environment lookups happen here once; nothing downstream reads the
/// environment again.
pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	overlay_env(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.index.url.trim().is_empty() {
		return Err(Error::Validation { message: "index.url must be non-empty.".to_string() });
	}
	if cfg.index.item_index.trim().is_empty() {
		return Err(Error::Validation {
			message: "index.item_index must be non-empty.".to_string(),
		});
	}
	if cfg.index.record_index.trim().is_empty() {
		return Err(Error::Validation {
			message: "index.record_index must be non-empty.".to_string(),
		});
	}
	if cfg.index.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "index.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation { message: "postgres.dsn must be non-empty.".to_string() });
	}
	if cfg.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.object_store.url.trim().is_empty() {
		return Err(Error::Validation {
			message: "object_store.url must be non-empty.".to_string(),
		});
	}
	if cfg.object_store.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "object_store.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn overlay_env(cfg: &mut Config) {
	if let Ok(key) = env::var("ELASTICSEARCH_API_KEY")
		&& !key.trim().is_empty()
	{
		cfg.index.api_key = key;
	}
	if let Ok(id) = env::var("ELASTICSEARCH_API_KEY_ID")
		&& !id.trim().is_empty()
	{
		cfg.index.api_key_id = id;
	}
	if let Ok(dsn) = env::var("POSTGRES_DSN")
		&& !dsn.trim().is_empty()
	{
		cfg.postgres.dsn = dsn;
	}
}
