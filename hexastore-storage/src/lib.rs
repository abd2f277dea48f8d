//! The hexastore's six-index data structure, its wire codec, and the
//! external-store adapter contract.
//!
//! This crate owns storage only: the [`Hexastore`] type is a pure
//! in-memory structure with no query planning. `hexastore-query` drives
//! it via the cursor primitives in [`cursor`].

pub mod codec;
pub mod cursor;
mod error;
pub mod external;
mod hexastore;
pub mod index;

pub use crate::error::{Error, Result};
pub use crate::hexastore::Hexastore;
