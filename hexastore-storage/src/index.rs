//! A single ordered index: composite key `(X,Y)` to an ordered set of `Z`
//! payloads. One of these backs each of the six hexastore permutations.

use hexastore_api::{Kid, Value};
use std::collections::BTreeMap;

/// What's actually stored for the third component of a triple: its value
/// plus enough metadata for the executor to reconstitute `K` and `C`
/// without touching the other five indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub k: Kid,
    pub c: f64,
}

impl Payload {
    pub fn new(k: Kid, c: f64) -> Self {
        Payload { k, c }
    }
}

/// An ordered map from `(X,Y)` to the ordered set of `Z` values seen with
/// that pair, each carrying its insertion metadata.
#[derive(Debug, Default)]
pub struct IndexMap {
    inner: BTreeMap<(Value, Value), BTreeMap<Value, Payload>>,
}

impl IndexMap {
    pub fn new() -> Self {
        IndexMap {
            inner: BTreeMap::new(),
        }
    }

    /// Inserts `z` into the set for `(x,y)`, creating the key if absent.
    /// Re-inserting an existing `z` overwrites its payload (last write wins
    /// on K/C; the triple identity `(x,y,z)` is unchanged).
    pub fn upsert(&mut self, x: Value, y: Value, z: Value, payload: Payload) {
        self.inner.entry((x, y)).or_default().insert(z, payload);
    }

    /// Removes `z` from the set for `(x,y)`; drops the key entirely once
    /// its set becomes empty.
    pub fn erase(&mut self, x: &Value, y: &Value, z: &Value) {
        if let Some(set) = self.inner.get_mut(&(x.clone(), y.clone())) {
            set.remove(z);
            if set.is_empty() {
                self.inner.remove(&(x.clone(), y.clone()));
            }
        }
    }

    /// The set for an exact `(x,y)` key, or `None` when absent.
    pub fn scan_exact(&self, x: &Value, y: &Value) -> Option<&BTreeMap<Value, Payload>> {
        self.inner.get(&(x.clone(), y.clone()))
    }

    /// All `(key, set)` pairs whose `x` component equals `x`, in key order.
    pub fn scan_prefix_x<'a>(
        &'a self,
        x: &'a Value,
    ) -> impl Iterator<Item = (&'a (Value, Value), &'a BTreeMap<Value, Payload>)> + 'a {
        self.inner
            .range((x.clone(), Value::iri(""))..)
            .take_while(move |((kx, _), _)| kx == x)
    }

    /// Every `(key, set)` pair, in key order.
    pub fn scan_all(&self) -> impl Iterator<Item = (&(Value, Value), &BTreeMap<Value, Payload>)> {
        self.inner.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Direct access to the backing map, for the lazy per-step cursor in
    /// [`crate::cursor`] which needs to re-range from an arbitrary key
    /// under a freshly acquired lock.
    pub(crate) fn raw(&self) -> &BTreeMap<(Value, Value), BTreeMap<Value, Payload>> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Value {
        Value::iri(s)
    }

    #[test]
    fn upsert_then_scan_exact() {
        let mut idx = IndexMap::new();
        idx.upsert(v("s"), v("p"), v("o1"), Payload::new(1, 1.0));
        idx.upsert(v("s"), v("p"), v("o2"), Payload::new(2, 1.0));
        let set = idx.scan_exact(&v("s"), &v("p")).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains_key(&v("o1")));
    }

    #[test]
    fn erase_drops_empty_key() {
        let mut idx = IndexMap::new();
        idx.upsert(v("s"), v("p"), v("o"), Payload::new(1, 1.0));
        idx.erase(&v("s"), &v("p"), &v("o"));
        assert!(idx.scan_exact(&v("s"), &v("p")).is_none());
        assert!(idx.is_empty());
    }

    #[test]
    fn scan_prefix_x_is_contiguous_and_ordered() {
        let mut idx = IndexMap::new();
        idx.upsert(v("a"), v("p1"), v("o"), Payload::new(1, 1.0));
        idx.upsert(v("a"), v("p2"), v("o"), Payload::new(2, 1.0));
        idx.upsert(v("b"), v("p1"), v("o"), Payload::new(3, 1.0));
        let keys: Vec<_> = idx.scan_prefix_x(&v("a")).map(|(k, _)| k.1.clone()).collect();
        assert_eq!(keys, vec![v("p1"), v("p2")]);
    }

    #[test]
    fn scan_all_yields_every_key_in_order() {
        let mut idx = IndexMap::new();
        idx.upsert(v("b"), v("p"), v("o"), Payload::new(1, 1.0));
        idx.upsert(v("a"), v("p"), v("o"), Payload::new(2, 1.0));
        let keys: Vec<_> = idx.scan_all().map(|(k, _)| k.0.clone()).collect();
        assert_eq!(keys, vec![v("a"), v("b")]);
    }
}
