use crate::value::XsdType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The error taxonomy shared by every hexastore crate.
///
/// Planner classification is total (§4.E), so no `Error` variant is ever
/// produced by the planner itself; everything here originates either at
/// ingestion, predicate construction, or execution.
#[derive(Debug, Error)]
pub enum Error {
    /// A scalar outside the value lattice (anything but IRI or string).
    #[error("unsupported value type: {0}")]
    UnsupportedType(String),

    /// A JSON/JSON-LD scalar the ingestion codec refuses (numbers, bools).
    #[error("unsupported literal in ingested document: {0}")]
    UnsupportedLiteral(String),

    /// A predicate clause applied to a variant it cannot operate on.
    #[error("predicate clause `{clause}` is not valid for {xsd_type}")]
    InvalidPredicate {
        clause: &'static str,
        xsd_type: XsdType,
    },

    /// The planner chose `NONE`, or the backend could not honor the seek.
    #[error("pattern cannot be executed: {0}")]
    UnsupportedPattern(String),

    /// Cooperative cancellation observed at a `next()` boundary.
    #[error("query cancelled")]
    Cancelled,

    /// An external-store row operation failed.
    #[error("external store I/O failed: {0}")]
    StoreIo(String),

    /// A post-failure read observed disagreeing indexes. Never recovered
    /// in-process; the caller must restart from the durable backend.
    #[error("index state is inconsistent: {0}")]
    Inconsistent(String),
}
