use std::fmt;

/// The facade's error type: wraps whatever the storage or query crate
/// reported, plus the ingestion-codec failures that only exist at this
/// layer.
#[derive(Debug)]
pub enum Error {
    /// A shared-taxonomy kind (§7) raised directly at this layer, e.g. an
    /// ingested document's `UnsupportedLiteral` scalar.
    Api(hexastore_api::Error),
    Storage(hexastore_storage::Error),
    Query(hexastore_query::Error),
    /// A JSON/JSON-LD document could not be decoded into a triple bag for
    /// a reason outside the shared taxonomy (malformed JSON, an
    /// unsupported document shape).
    Ingest(String),
    /// A binary-codec record was truncated or failed its checksum.
    Codec(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api(e) => write!(f, "{e}"),
            Error::Storage(e) => write!(f, "storage error: {e}"),
            Error::Query(e) => write!(f, "query error: {e}"),
            Error::Ingest(msg) => write!(f, "ingestion error: {msg}"),
            Error::Codec(msg) => write!(f, "codec error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Api(e) => Some(e),
            Error::Storage(e) => Some(e),
            Error::Query(e) => Some(e),
            _ => None,
        }
    }
}

impl From<hexastore_storage::Error> for Error {
    fn from(e: hexastore_storage::Error) -> Self {
        Error::Storage(e)
    }
}

impl From<hexastore_query::Error> for Error {
    fn from(e: hexastore_query::Error) -> Self {
        Error::Query(e)
    }
}

impl From<hexastore_api::Error> for Error {
    fn from(e: hexastore_api::Error) -> Self {
        Error::Api(e)
    }
}

/// A specialized `Result` type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
