use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A scalar in the value lattice.
///
/// Variant declaration order is significant: `derive(Ord)` compares by
/// variant index first, so `AnyUri` sorts before `String` whenever the
/// two operands are of different variants. Within a variant, comparison
/// falls through to the wrapped `String`'s lexical order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Value {
    /// A reference to another node, e.g. `https://example.org/alice`.
    AnyUri(String),
    /// A UTF-8 literal with no further structure.
    String(String),
}

/// The xsd type tag carried by a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XsdType {
    AnyUri,
    String,
}

impl fmt::Display for XsdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XsdType::AnyUri => write!(f, "xsd:anyURI"),
            XsdType::String => write!(f, "xsd:string"),
        }
    }
}

impl Value {
    /// Wraps a plain string as an IRI-typed value.
    pub fn iri(v: impl Into<String>) -> Self {
        Value::AnyUri(v.into())
    }

    /// Wraps a plain string as a string-typed value.
    pub fn string(v: impl Into<String>) -> Self {
        Value::String(v.into())
    }

    pub fn xsd_type(&self) -> XsdType {
        match self {
            Value::AnyUri(_) => XsdType::AnyUri,
            Value::String(_) => XsdType::String,
        }
    }

    /// The underlying UTF-8 payload, regardless of variant.
    pub fn as_str(&self) -> &str {
        match self {
            Value::AnyUri(s) => s,
            Value::String(s) => s,
        }
    }

    /// Total order across the lattice: `-1`/`0`/`1`, matching §3's
    /// `Compare`. Equivalent to `Ord::cmp` but kept as a separate entry
    /// point since callers in the planner reason about it as a tri-state.
    pub fn compare(&self, other: &Value) -> Ordering {
        self.cmp(other)
    }

    /// True iff `self` and `other` are the same variant and `self`'s
    /// payload begins with `other`'s. Cross-variant comparisons are
    /// always false, matching `xsd.HasPrefix`.
    pub fn has_prefix(&self, prefix: &Value) -> bool {
        match (self, prefix) {
            (Value::AnyUri(a), Value::AnyUri(b)) => a.starts_with(b.as_str()),
            (Value::String(a), Value::String(b)) => a.starts_with(b.as_str()),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::AnyUri(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_order_fixed() {
        let a = Value::iri("z");
        let b = Value::string("a");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
    }

    #[test]
    fn same_variant_lexical() {
        assert_eq!(Value::iri("a").compare(&Value::iri("b")), Ordering::Less);
        assert_eq!(
            Value::string("bob").compare(&Value::string("bob")),
            Ordering::Equal
        );
    }

    #[test]
    fn compare_is_antisymmetric_and_transitive() {
        let values = [
            Value::iri("a"),
            Value::iri("b"),
            Value::string("a"),
            Value::string("b"),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(a.compare(b).reverse(), b.compare(a));
            }
        }
        assert!(values[0].compare(&values[1]) == Ordering::Less);
        assert!(values[1].compare(&values[2]) == Ordering::Less);
        assert!(values[0].compare(&values[2]) == Ordering::Less);
    }

    #[test]
    fn has_prefix_requires_same_variant() {
        assert!(Value::iri("https://ex/a").has_prefix(&Value::iri("https://ex/")));
        assert!(!Value::iri("https://ex/a").has_prefix(&Value::string("https://ex/")));
        assert!(!Value::string("hello").has_prefix(&Value::iri("h")));
    }
}
