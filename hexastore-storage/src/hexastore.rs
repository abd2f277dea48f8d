//! The six-index data structure (§4.D) and its concurrency contract (§5).

use crate::cursor::IndexScan;
use crate::index::{IndexMap, Payload};
use hexastore_api::Triple;
use std::sync::RwLock;

/// Six ordered indexes over every permutation of (S,P,O), kept mutually
/// consistent (H1/H2) by writing all six under a fixed lock-acquisition
/// order — SPO → SOP → PSO → POS → OSP → OPS — on every `put`/`remove`.
#[derive(Default)]
pub struct Hexastore {
    spo: RwLock<IndexMap>,
    sop: RwLock<IndexMap>,
    pso: RwLock<IndexMap>,
    pos: RwLock<IndexMap>,
    osp: RwLock<IndexMap>,
    ops: RwLock<IndexMap>,
}

impl Hexastore {
    pub fn new() -> Self {
        Hexastore::default()
    }

    /// Inserts `t` into all six indexes. Observable through every index
    /// as soon as this returns (H1/H2). Re-inserting the same `(s,p,o)`
    /// overwrites its `k`/`c` payload but does not duplicate the triple.
    pub fn put(&self, t: &Triple) {
        tracing::debug!(k = %t.k, "hexastore put");
        let payload = Payload::new(t.k, t.c);

        let mut spo = self.spo.write().expect("spo lock poisoned");
        let mut sop = self.sop.write().expect("sop lock poisoned");
        let mut pso = self.pso.write().expect("pso lock poisoned");
        let mut pos = self.pos.write().expect("pos lock poisoned");
        let mut osp = self.osp.write().expect("osp lock poisoned");
        let mut ops = self.ops.write().expect("ops lock poisoned");

        spo.upsert(t.s.clone(), t.p.clone(), t.o.clone(), payload.clone());
        sop.upsert(t.s.clone(), t.o.clone(), t.p.clone(), payload.clone());
        pso.upsert(t.p.clone(), t.s.clone(), t.o.clone(), payload.clone());
        pos.upsert(t.p.clone(), t.o.clone(), t.s.clone(), payload.clone());
        osp.upsert(t.o.clone(), t.s.clone(), t.p.clone(), payload.clone());
        ops.upsert(t.o.clone(), t.p.clone(), t.s.clone(), payload);
    }

    /// Removes `(s,p,o)` from all six indexes, under the same fixed lock
    /// order as `put`.
    pub fn remove(&self, t: &Triple) {
        tracing::debug!(k = %t.k, "hexastore remove");
        let mut spo = self.spo.write().expect("spo lock poisoned");
        let mut sop = self.sop.write().expect("sop lock poisoned");
        let mut pso = self.pso.write().expect("pso lock poisoned");
        let mut pos = self.pos.write().expect("pos lock poisoned");
        let mut osp = self.osp.write().expect("osp lock poisoned");
        let mut ops = self.ops.write().expect("ops lock poisoned");

        spo.erase(&t.s, &t.p, &t.o);
        sop.erase(&t.s, &t.o, &t.p);
        pso.erase(&t.p, &t.s, &t.o);
        pos.erase(&t.p, &t.o, &t.s);
        osp.erase(&t.o, &t.s, &t.p);
        ops.erase(&t.o, &t.p, &t.s);
    }

    pub fn spo(&self) -> &RwLock<IndexMap> {
        &self.spo
    }
    pub fn sop(&self) -> &RwLock<IndexMap> {
        &self.sop
    }
    pub fn pso(&self) -> &RwLock<IndexMap> {
        &self.pso
    }
    pub fn pos(&self) -> &RwLock<IndexMap> {
        &self.pos
    }
    pub fn osp(&self) -> &RwLock<IndexMap> {
        &self.osp
    }
    pub fn ops(&self) -> &RwLock<IndexMap> {
        &self.ops
    }

    /// Reconstructs the full stored triple set by walking SPO. Used by
    /// tests and by `STRATEGY_NONE`'s full scan.
    pub fn scan_all(&self) -> impl Iterator<Item = Triple> + '_ {
        IndexScan::all(&self.spo).map(|(s, p, o, payload)| {
            Triple::with_meta(s, p, o, payload.c, payload.k)
        })
    }

    pub fn len(&self) -> usize {
        self.spo.read().expect("spo lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.spo.read().expect("spo lock poisoned").is_empty()
    }
}
