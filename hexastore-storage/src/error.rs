use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The shared §7 taxonomy kinds, including `StoreIo` (an
    /// external-store row operation failed) and `Inconsistent` (a
    /// post-failure read observed disagreeing index state).
    #[error(transparent)]
    Api(#[from] hexastore_api::Error),

    /// A codec value string was malformed (missing variant prefix, no
    /// separator, or an empty component). Local to this crate's wire
    /// codec, so not part of the shared taxonomy.
    #[error("malformed encoded value: {0}")]
    MalformedEncoding(String),
}
