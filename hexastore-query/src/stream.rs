//! Pull-iterator stream combinators (§4.G).
//!
//! The original protocol (`Head()`/`Next()`/`FMap`) is a hand-rolled
//! pull iterator; Rust already has one of those, so every combinator
//! here is a thin adaptor over [`Iterator`] rather than a reimplementation
//! of the interface. `take_while_variant` is the one combinator without a
//! std equivalent — it bounds a range scan to a single lattice variant,
//! since cross-variant ordering would otherwise run past the intended
//! range (grounded in the original's `NewTakeWhileType`/`NewDropWhileType`).

use hexastore_api::{Triple, Value, XsdType};

/// Keeps only triples whose object is of the given variant, stopping at
/// the first one that isn't. Used after a `LT`/`GT` split-point scan,
/// where the underlying order only guarantees same-variant values are
/// contiguous from that point.
pub fn take_while_variant<I>(iter: I, variant: XsdType) -> impl Iterator<Item = Triple>
where
    I: Iterator<Item = Triple>,
{
    iter.take_while(move |t| t.o.xsd_type() == variant)
}

/// Cooperative cancellation wrapper: yields `Err(Cancelled)` once
/// `is_cancelled` reports true, then stops. Checked once per `next()`
/// boundary per the §5 cancellation contract.
pub struct Cancellable<I, F> {
    inner: I,
    is_cancelled: F,
    done: bool,
}

impl<I, F> Cancellable<I, F>
where
    I: Iterator<Item = Triple>,
    F: FnMut() -> bool,
{
    pub fn new(inner: I, is_cancelled: F) -> Self {
        Cancellable {
            inner,
            is_cancelled,
            done: false,
        }
    }
}

impl<I, F> Iterator for Cancellable<I, F>
where
    I: Iterator<Item = Triple>,
    F: FnMut() -> bool,
{
    type Item = crate::error::Result<Triple>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if (self.is_cancelled)() {
            self.done = true;
            return Some(Err(crate::error::Error::Cancelled));
        }
        match self.inner.next() {
            Some(t) => Some(Ok(t)),
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Drives `stream` to completion, calling `f` per element and
/// short-circuiting on the first error — either a [`Cancellable`]
/// cancellation or a downstream failure.
pub fn fold<I, F>(stream: I, mut f: F) -> crate::error::Result<()>
where
    I: Iterator<Item = crate::error::Result<Triple>>,
    F: FnMut(Triple),
{
    for item in stream {
        f(item?);
    }
    Ok(())
}

/// `Value` predicate helper mirroring the original's `xsd.HasPrefix`
/// guard: cross-variant prefix tests are always false, matching
/// [`Value::has_prefix`].
pub fn has_prefix(v: &Value, prefix: &Value) -> bool {
    v.has_prefix(prefix)
}
