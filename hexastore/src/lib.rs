//! # hexastore
//!
//! An embedded, in-memory RDF-style triple store: six permutation indexes
//! over `(subject, predicate, object)`, a deterministic pattern planner,
//! and a streaming executor over `(S?, P?, O?)` queries.
//!
//! ## Quick start
//!
//! ```
//! use hexastore::Store;
//! use hexastore_query::pattern::{iri, Pattern};
//!
//! let store = Store::new();
//! store.ingest_json(r#"{"@id": "https://ex/alice", "https://ex/knows": "https://ex/bob"}"#).unwrap();
//!
//! let pat = Pattern::new().s(iri::eq("https://ex/alice"));
//! let hits: Vec<_> = store.query(&pat).unwrap().collect();
//! assert_eq!(hits.len(), 1);
//! ```
//!
//! ## Layout
//!
//! - [`hexastore_api`] — the value lattice, predicate model, and triple type.
//! - [`hexastore_storage`] — the six-index engine and its lock discipline.
//! - [`hexastore_query`] — the planner, executor, and pattern DSL.
//! - [`json`] — JSON/JSON-LD ingestion.
//! - [`binary`] — the length-prefixed bulk-transport codec.

mod error;
pub mod binary;
pub mod json;

use hexastore_api::{Bag, Triple};
use hexastore_query::pattern::Pattern;
use hexastore_storage::Hexastore;

pub use error::{Error, Result};
pub use hexastore_api::{Predicate, Value};
pub use hexastore_query as query;
pub use hexastore_query::pattern;
pub use hexastore_storage as storage;

/// The store handle: owns the six indexes and exposes ingestion and
/// query entry points. Cheap to construct; safe to share across threads
/// behind an `Arc` since every index is independently lock-guarded.
#[derive(Default)]
pub struct Store {
    hx: Hexastore,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Store { hx: Hexastore::new() }
    }

    /// Inserts a single triple. Idempotent: re-putting an identical
    /// `(s,p,o)` leaves the index unchanged rather than duplicating it.
    pub fn put(&self, t: &Triple) {
        self.hx.put(t);
    }

    /// Removes a triple, if present.
    pub fn remove(&self, t: &Triple) {
        self.hx.remove(t);
    }

    /// Inserts every triple in `bag`.
    pub fn put_all(&self, bag: &Bag) {
        for t in bag.iter() {
            self.hx.put(t);
        }
    }

    /// Decodes a JSON or JSON-LD document and inserts the resulting
    /// triples. Returns the number of triples ingested.
    pub fn ingest_json(&self, input: &str) -> Result<usize> {
        let bag = json::decode(input)?;
        let n = bag.len();
        self.put_all(&bag);
        Ok(n)
    }

    /// Runs `pattern` against the store. See [`hexastore_query::execute`]
    /// for the strategy-selection and residual-filter contract.
    pub fn query<'a>(&'a self, pattern: &'a Pattern) -> Result<Box<dyn Iterator<Item = Triple> + 'a>> {
        Ok(hexastore_query::execute(&self.hx, pattern)?)
    }

    /// Serializes every triple currently in the store via the binary
    /// bulk-transport codec.
    pub fn to_binary(&self) -> Vec<u8> {
        let bag: Bag = hexastore_query::executor::execute_allow_full_scan(&self.hx, &Pattern::new())
            .collect();
        binary::encode_bag(&bag)
    }

    /// Builds a store from a buffer produced by [`Store::to_binary`].
    pub fn from_binary(bytes: &[u8]) -> Result<Self> {
        let bag = binary::decode_bag(bytes)?;
        let store = Store::new();
        store.put_all(&bag);
        Ok(store)
    }

    /// The number of distinct triples currently stored.
    pub fn len(&self) -> usize {
        self.hx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hx.is_empty()
    }
}
