pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Index error: {message}")]
	Index { message: String },
	#[error("Decode error: {message}")]
	Decode { message: String },
	#[error("Background task failed: {message}")]
	Join { message: String },
}
impl From<itemdex_storage::Error> for Error {
	fn from(err: itemdex_storage::Error) -> Self {
		match err {
			itemdex_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			itemdex_storage::Error::Http(inner) => Self::Index { message: inner.to_string() },
			itemdex_storage::Error::SerdeJson(inner) =>
				Self::Decode { message: inner.to_string() },
			itemdex_storage::Error::InvalidHeaderValue(inner) =>
				Self::InvalidRequest { message: inner.to_string() },
			itemdex_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			itemdex_storage::Error::NotFound(message) => Self::Storage { message },
			itemdex_storage::Error::Status { status, body } =>
				Self::Index { message: format!("status {status}: {body}") },
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode { message: err.to_string() }
	}
}

impl From<tokio::task::JoinError> for Error {
	fn from(err: tokio::task::JoinError) -> Self {
		Self::Join { message: err.to_string() }
	}
}
