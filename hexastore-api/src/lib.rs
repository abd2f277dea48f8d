//! Shared types for the hexastore engine: the value lattice, the predicate
//! DSL, the triple/bag record types, and the error taxonomy every other
//! hexastore crate builds on.
//!
//! This crate has no storage or query logic of its own — it exists so that
//! `hexastore-storage` and `hexastore-query` can depend on a common
//! vocabulary without depending on each other.

pub mod error;
pub mod predicate;
pub mod triple;
pub mod value;

pub use error::{Error, Result};
pub use predicate::{Hint, Predicate};
pub use triple::{Bag, Kid, Triple};
pub use value::{Value, XsdType};
