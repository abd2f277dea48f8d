//! Error and result types for the query crate.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The shared §7 taxonomy kinds, including `UnsupportedPattern` (the
    /// planner chose `STRATEGY_NONE` for a pattern the executor cannot
    /// run in production mode, or a backend refused the seek it was
    /// asked to honor).
    Api(hexastore_api::Error),
    Storage(hexastore_storage::Error),
    /// Cooperative cancellation observed at a `next()` boundary.
    Cancelled,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Api(err) => write!(f, "{err}"),
            Error::Storage(err) => write!(f, "{err}"),
            Error::Cancelled => write!(f, "query cancelled"),
        }
    }
}

/// Constructs the shared `UnsupportedPattern` kind as a query-crate error.
pub fn unsupported_pattern(msg: impl Into<String>) -> Error {
    Error::Api(hexastore_api::Error::UnsupportedPattern(msg.into()))
}

impl std::error::Error for Error {}

impl From<hexastore_api::Error> for Error {
    fn from(err: hexastore_api::Error) -> Self {
        Error::Api(err)
    }
}

impl From<hexastore_storage::Error> for Error {
    fn from(err: hexastore_storage::Error) -> Self {
        Error::Storage(err)
    }
}
