//! Lazy index cursors.
//!
//! Each [`IndexScan`] re-acquires the index's read lock once per `next()`
//! call and releases it before returning, per §5's "readers take a shared
//! lock per `next()` step, released before yielding." State carried
//! between steps is just the last `(key, z)` pair emitted — O(1) — so an
//! arbitrarily long scan never holds the lock for longer than one step.

use crate::index::{IndexMap, Payload};
use hexastore_api::Value;
use std::collections::Bound::{Excluded, Unbounded};
use std::sync::RwLock;

enum ScanMode {
    /// A single `(x,y)` composite key; iterates only its z-set.
    Exact(Value, Value),
    /// Every key whose leading component equals `x`.
    PrefixX(Value),
    /// Every key whose leading component begins with `x` (lexical
    /// prefix, not equality) — the FILTER_PREFIX seek on a leading
    /// position with no MATCH available.
    PrefixValueX(Value),
    /// Every key in the index.
    All,
}

/// A pull cursor over one index. Not `Clone`; a caller holds at most one
/// of these at a time per the single-active-cursor execution contract.
pub struct IndexScan<'a> {
    index: &'a RwLock<IndexMap>,
    mode: ScanMode,
    last_key: Option<(Value, Value)>,
    last_z: Option<Value>,
    done: bool,
}

impl<'a> IndexScan<'a> {
    pub fn exact(index: &'a RwLock<IndexMap>, x: Value, y: Value) -> Self {
        IndexScan {
            index,
            mode: ScanMode::Exact(x, y),
            last_key: None,
            last_z: None,
            done: false,
        }
    }

    pub fn prefix_x(index: &'a RwLock<IndexMap>, x: Value) -> Self {
        IndexScan {
            index,
            mode: ScanMode::PrefixX(x),
            last_key: None,
            last_z: None,
            done: false,
        }
    }

    pub fn prefix_value_x(index: &'a RwLock<IndexMap>, x: Value) -> Self {
        IndexScan {
            index,
            mode: ScanMode::PrefixValueX(x),
            last_key: None,
            last_z: None,
            done: false,
        }
    }

    pub fn all(index: &'a RwLock<IndexMap>) -> Self {
        IndexScan {
            index,
            mode: ScanMode::All,
            last_key: None,
            last_z: None,
            done: false,
        }
    }
}

impl<'a> Iterator for IndexScan<'a> {
    /// `(x, y, z, payload)` — the full reconstituted row.
    type Item = (Value, Value, Value, Payload);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let guard = self.index.read().expect("hexastore index lock poisoned");
        let map = guard.raw();

        match &self.mode {
            ScanMode::Exact(x, y) => {
                let set = match map.get(&(x.clone(), y.clone())) {
                    Some(s) => s,
                    None => {
                        self.done = true;
                        return None;
                    }
                };
                let entry = match &self.last_z {
                    Some(z) => set.range((Excluded(z.clone()), Unbounded)).next(),
                    None => set.iter().next(),
                };
                match entry {
                    Some((z, payload)) => {
                        self.last_z = Some(z.clone());
                        Some((x.clone(), y.clone(), z.clone(), payload.clone()))
                    }
                    None => {
                        self.done = true;
                        None
                    }
                }
            }
            ScanMode::PrefixX(x) => {
                let start = self
                    .last_key
                    .clone()
                    .unwrap_or_else(|| (x.clone(), Value::iri("")));
                for (key, set) in map.range(start..) {
                    if &key.0 != x {
                        break;
                    }
                    let is_current_key = Some(key) == self.last_key.as_ref();
                    let entry = if is_current_key {
                        match &self.last_z {
                            Some(z) => set.range((Excluded(z.clone()), Unbounded)).next(),
                            None => set.iter().next(),
                        }
                    } else {
                        set.iter().next()
                    };
                    if let Some((z, payload)) = entry {
                        self.last_key = Some(key.clone());
                        self.last_z = Some(z.clone());
                        return Some((key.0.clone(), key.1.clone(), z.clone(), payload.clone()));
                    }
                    self.last_z = None;
                }
                self.done = true;
                None
            }
            ScanMode::PrefixValueX(x) => {
                let start = self
                    .last_key
                    .clone()
                    .unwrap_or_else(|| (x.clone(), Value::iri("")));
                for (key, set) in map.range(start..) {
                    if !key.0.has_prefix(x) {
                        break;
                    }
                    let is_current_key = Some(key) == self.last_key.as_ref();
                    let entry = if is_current_key {
                        match &self.last_z {
                            Some(z) => set.range((Excluded(z.clone()), Unbounded)).next(),
                            None => set.iter().next(),
                        }
                    } else {
                        set.iter().next()
                    };
                    if let Some((z, payload)) = entry {
                        self.last_key = Some(key.clone());
                        self.last_z = Some(z.clone());
                        return Some((key.0.clone(), key.1.clone(), z.clone(), payload.clone()));
                    }
                    self.last_z = None;
                }
                self.done = true;
                None
            }
            ScanMode::All => {
                let range = match &self.last_key {
                    Some(k) => map.range(k.clone()..),
                    None => map.range(..),
                };
                for (key, set) in range {
                    let is_current_key = Some(key) == self.last_key.as_ref();
                    let entry = if is_current_key {
                        match &self.last_z {
                            Some(z) => set.range((Excluded(z.clone()), Unbounded)).next(),
                            None => set.iter().next(),
                        }
                    } else {
                        set.iter().next()
                    };
                    if let Some((z, payload)) = entry {
                        self.last_key = Some(key.clone());
                        self.last_z = Some(z.clone());
                        return Some((key.0.clone(), key.1.clone(), z.clone(), payload.clone()));
                    }
                    self.last_z = None;
                }
                self.done = true;
                None
            }
        }
    }
}
