//! The query-side `Pattern(S?, P?, O?)` type (§6). Re-exports the
//! predicate DSL from `hexastore-api` so callers build patterns without a
//! second import.

use hexastore_api::Predicate;

pub use hexastore_api::predicate::iri;
pub use hexastore_api::predicate::{eq, gt, has_prefix, in_range, lt};

const ALL: Predicate = Predicate::All;

/// A graph-pattern query: an optional predicate per position. A `None`
/// slot is equivalent to `Predicate::All` for hint classification.
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    pub s: Option<Predicate>,
    pub p: Option<Predicate>,
    pub o: Option<Predicate>,
}

impl Pattern {
    pub fn new() -> Self {
        Pattern::default()
    }

    pub fn s(mut self, pred: Predicate) -> Self {
        self.s = Some(pred);
        self
    }

    pub fn p(mut self, pred: Predicate) -> Self {
        self.p = Some(pred);
        self
    }

    pub fn o(mut self, pred: Predicate) -> Self {
        self.o = Some(pred);
        self
    }

    pub(crate) fn s_pred(&self) -> &Predicate {
        self.s.as_ref().unwrap_or(&ALL)
    }

    pub(crate) fn p_pred(&self) -> &Predicate {
        self.p.as_ref().unwrap_or(&ALL)
    }

    pub(crate) fn o_pred(&self) -> &Predicate {
        self.o.as_ref().unwrap_or(&ALL)
    }
}
