//! The streaming query executor (§4.F): walks the index chosen by the
//! planner and composes residual filters for whatever the seek didn't
//! pin down.
//!
//! Every position's predicate is re-applied as a residual filter
//! regardless of how precisely the seek used it — `Predicate::All`
//! matches unconditionally, so this costs nothing for unconstrained
//! positions and keeps the executor correct by construction (§8
//! property 2) even when the seek only narrows part of the match.

use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::planner::{self, Strategy};
use hexastore_api::{Hint, Triple, Value};
use hexastore_storage::cursor::IndexScan;
use hexastore_storage::Hexastore;

/// Runs `pattern` against `store`. Rejects `STRATEGY_NONE` with
/// `UnsupportedPattern` — full unconstrained scans are a test-only
/// escape hatch, see [`execute_allow_full_scan`].
pub fn execute<'a>(
    store: &'a Hexastore,
    pattern: &'a Pattern,
) -> Result<Box<dyn Iterator<Item = Triple> + 'a>> {
    let plan = planner::plan(pattern);
    if plan.strategy == Strategy::None {
        return Err(crate::error::unsupported_pattern(
            "pattern has no bound position; planner returned STRATEGY_NONE",
        ));
    }
    Ok(build(store, pattern))
}

/// Like [`execute`] but allows `STRATEGY_NONE` to fall through to a full
/// SPO scan. For tests and administrative tooling only.
pub fn execute_allow_full_scan<'a>(
    store: &'a Hexastore,
    pattern: &'a Pattern,
) -> Box<dyn Iterator<Item = Triple> + 'a> {
    build(store, pattern)
}

/// Runs `pattern` with cooperative cancellation: `is_cancelled` is
/// checked once per `next()` boundary, per §5. Once it reports true the
/// stream yields a single `Cancelled` error and then ends.
pub fn execute_cancellable<'a, F>(
    store: &'a Hexastore,
    pattern: &'a Pattern,
    is_cancelled: F,
) -> Result<crate::stream::Cancellable<Box<dyn Iterator<Item = Triple> + 'a>, F>>
where
    F: FnMut() -> bool + 'a,
{
    let inner = execute(store, pattern)?;
    Ok(crate::stream::Cancellable::new(inner, is_cancelled))
}

fn build<'a>(store: &'a Hexastore, pattern: &'a Pattern) -> Box<dyn Iterator<Item = Triple> + 'a> {
    let plan = planner::plan(pattern);
    tracing::debug!(
        strategy = ?plan.strategy,
        hint_s = ?plan.hint_s,
        hint_p = ?plan.hint_p,
        hint_o = ?plan.hint_o,
        "query strategy selected"
    );

    let raw: Box<dyn Iterator<Item = Triple> + 'a> = match plan.strategy {
        Strategy::None => Box::new(
            IndexScan::all(store.spo())
                .map(|(s, p, o, payload)| Triple::with_meta(s, p, o, payload.c, payload.k)),
        ),
        Strategy::Spo => Box::new(scan(store.spo(), pattern.s_pred(), plan.hint_s, pattern.p_pred())
            .map(|(s, p, o, payload)| Triple::with_meta(s, p, o, payload.c, payload.k))),
        Strategy::Sop => Box::new(scan(store.sop(), pattern.s_pred(), plan.hint_s, pattern.o_pred())
            .map(|(s, o, p, payload)| Triple::with_meta(s, p, o, payload.c, payload.k))),
        Strategy::Pso => Box::new(scan(store.pso(), pattern.p_pred(), plan.hint_p, pattern.s_pred())
            .map(|(p, s, o, payload)| Triple::with_meta(s, p, o, payload.c, payload.k))),
        Strategy::Pos => Box::new(scan(store.pos(), pattern.p_pred(), plan.hint_p, pattern.o_pred())
            .map(|(p, o, s, payload)| Triple::with_meta(s, p, o, payload.c, payload.k))),
        Strategy::Osp => Box::new(scan(store.osp(), pattern.o_pred(), plan.hint_o, pattern.s_pred())
            .map(|(o, s, p, payload)| Triple::with_meta(s, p, o, payload.c, payload.k))),
        Strategy::Ops => Box::new(scan(store.ops(), pattern.o_pred(), plan.hint_o, pattern.p_pred())
            .map(|(o, p, s, payload)| Triple::with_meta(s, p, o, payload.c, payload.k))),
    };

    let s_pred = pattern.s_pred().clone();
    let p_pred = pattern.p_pred().clone();
    let o_pred = pattern.o_pred().clone();
    Box::new(raw.filter(move |t| s_pred.matches(&t.s) && p_pred.matches(&t.p) && o_pred.matches(&t.o)))
}

/// Picks the cheapest available seek for the index's leading `x`
/// component, given `x`'s hint and — when `x` is `MATCH` — `y`'s
/// predicate too (so an exact `(x,y)` key can be probed directly).
fn scan<'a>(
    index: &'a std::sync::RwLock<hexastore_storage::index::IndexMap>,
    x_pred: &hexastore_api::Predicate,
    hint_x: Hint,
    y_pred: &hexastore_api::Predicate,
) -> IndexScan<'a> {
    match hint_x {
        Hint::Match => {
            let x_val = x_pred.seek_value().expect("MATCH hint implies a seek value").clone();
            if y_pred.hint() == Hint::Match {
                let y_val = y_pred.seek_value().expect("MATCH hint implies a seek value").clone();
                IndexScan::exact(index, x_val, y_val)
            } else {
                IndexScan::prefix_x(index, x_val)
            }
        }
        Hint::FilterPrefix => {
            let x_val = x_pred.seek_value().expect("FILTER_PREFIX hint implies a seek value").clone();
            IndexScan::prefix_value_x(index, x_val)
        }
        Hint::Filter | Hint::None => IndexScan::all(index),
    }
}

/// A convenience entry point matching §6's `iri.eq`/`eq`/etc. shape: run
/// a pattern and collect every matching triple's object, ignoring S/P.
/// Mostly useful in tests and small tools built on this crate.
pub fn object_values(store: &Hexastore, pattern: &Pattern) -> Result<Vec<Value>> {
    Ok(execute(store, pattern)?.map(|t| t.o).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{eq, gt, iri};
    use hexastore_api::Triple;

    fn dataset() -> Hexastore {
        let hx = Hexastore::new();
        let edges = [
            ("A", "follows", "B"),
            ("C", "follows", "B"),
            ("C", "follows", "E"),
            ("C", "relates", "D"),
            ("D", "relates", "B"),
            ("B", "follows", "F"),
            ("F", "follows", "G"),
            ("D", "relates", "G"),
            ("E", "follows", "F"),
        ];
        for (s, p, o) in edges {
            hx.put(&Triple::from(iri_of(s), iri_of(p), Value::iri(iri_of(o))));
        }
        hx.put(&Triple::from(iri_of("B"), iri_of("status"), Value::string("b")));
        hx.put(&Triple::from(iri_of("D"), iri_of("status"), Value::string("d")));
        hx.put(&Triple::from(iri_of("G"), iri_of("status"), Value::string("g")));
        hx
    }

    fn iri_of(name: &str) -> String {
        format!("https://ex/{name}")
    }

    fn labels(triples: Vec<Triple>) -> Vec<(String, String, String)> {
        let mut out: Vec<_> = triples
            .into_iter()
            .map(|t| (t.s.as_str().to_string(), t.p.as_str().to_string(), t.o.as_str().to_string()))
            .collect();
        out.sort();
        out
    }

    #[test]
    fn query_1_s_bound_only() {
        let hx = dataset();
        let pat = Pattern::new().s(iri::eq(iri_of("C")));
        let out = labels(execute(&hx, &pat).unwrap().collect());
        assert_eq!(
            out,
            vec![
                (iri_of("C"), iri_of("follows"), iri_of("B")),
                (iri_of("C"), iri_of("follows"), iri_of("E")),
                (iri_of("C"), iri_of("relates"), iri_of("D")),
            ]
        );
    }

    #[test]
    fn query_2_s_and_p_bound() {
        let hx = dataset();
        let pat = Pattern::new().s(iri::eq(iri_of("C"))).p(iri::eq(iri_of("follows")));
        let out = labels(execute(&hx, &pat).unwrap().collect());
        assert_eq!(
            out,
            vec![
                (iri_of("C"), iri_of("follows"), iri_of("B")),
                (iri_of("C"), iri_of("follows"), iri_of("E")),
            ]
        );
    }

    #[test]
    fn query_3_p_prefix_matches_query_2() {
        let hx = dataset();
        let pat = Pattern::new().s(iri::eq(iri_of("C"))).p(iri::has_prefix("https://ex/f").unwrap());
        let out = labels(execute(&hx, &pat).unwrap().collect());
        assert_eq!(
            out,
            vec![
                (iri_of("C"), iri_of("follows"), iri_of("B")),
                (iri_of("C"), iri_of("follows"), iri_of("E")),
            ]
        );
    }

    #[test]
    fn query_4_o_bound_only() {
        let hx = dataset();
        let pat = Pattern::new().o(eq(Value::iri(iri_of("B"))));
        let out = labels(execute(&hx, &pat).unwrap().collect());
        assert_eq!(
            out,
            vec![
                (iri_of("A"), iri_of("follows"), iri_of("B")),
                (iri_of("C"), iri_of("follows"), iri_of("B")),
                (iri_of("D"), iri_of("relates"), iri_of("B")),
            ]
        );
    }

    #[test]
    fn query_5_p_bound_o_gt() {
        let hx = dataset();
        let pat = Pattern::new().p(iri::eq(iri_of("status"))).o(gt(Value::string("a")));
        let out = labels(execute(&hx, &pat).unwrap().collect());
        assert_eq!(
            out,
            vec![
                (iri_of("B"), iri_of("status"), "b".to_string()),
                (iri_of("D"), iri_of("status"), "d".to_string()),
                (iri_of("G"), iri_of("status"), "g".to_string()),
            ]
        );
    }

    #[test]
    fn query_6_s_and_o_bound() {
        let hx = dataset();
        let pat = Pattern::new().s(iri::eq(iri_of("D"))).o(eq(Value::iri(iri_of("G"))));
        let out = labels(execute(&hx, &pat).unwrap().collect());
        assert_eq!(out, vec![(iri_of("D"), iri_of("relates"), iri_of("G"))]);
    }

    #[test]
    fn strategy_none_rejected_in_production_mode() {
        let hx = dataset();
        let err = execute(&hx, &Pattern::new()).unwrap_err();
        assert!(matches!(err, Error::Api(hexastore_api::Error::UnsupportedPattern(_))));
    }

    #[test]
    fn full_scan_escape_hatch_returns_everything() {
        let hx = dataset();
        let out: Vec<_> = execute_allow_full_scan(&hx, &Pattern::new()).collect();
        assert_eq!(out.len(), 12);
    }

    #[test]
    fn cancellable_stops_after_cancellation_observed() {
        let hx = dataset();
        let pat = Pattern::new().s(iri::eq(iri_of("C")));
        let mut calls = 0;
        let stream = execute_cancellable(&hx, &pat, move || {
            calls += 1;
            calls > 1
        })
        .unwrap();
        let results: Vec<_> = stream.collect();
        assert!(results[0].is_ok());
        assert!(matches!(results.last(), Some(Err(Error::Cancelled))));
    }
}
