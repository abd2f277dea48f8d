//! The query planner (§4.E): classifies each pattern position into a
//! [`Hint`] and picks the cheapest of six index strategies.
//!
//! Classification is total — every pattern maps to exactly one
//! `Strategy`, including `None` when all three positions are unbound.
//! Grounded directly in the original planner's `strategyForS/P/O/X`
//! dispatch: match-first priority (S, then P, then O), falling through to
//! the filter-only combinations in `strategy_for_x`.

use crate::pattern::Pattern;
use hexastore_api::Hint;

/// The chosen access path, or `None` for an unconstrained pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    None,
    Spo,
    Sop,
    Pso,
    Pos,
    Osp,
    Ops,
}

/// A pattern's full classification: per-position hints plus the chosen
/// strategy. Planner output is deterministic and idempotent — computing
/// it twice for the same pattern yields identical hints and strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub strategy: Strategy,
    pub hint_s: Hint,
    pub hint_p: Hint,
    pub hint_o: Hint,
}

fn is_filterish(h: Hint) -> bool {
    matches!(h, Hint::FilterPrefix | Hint::Filter)
}

/// Classifies `pattern` and selects a strategy.
pub fn plan(pattern: &Pattern) -> Plan {
    let hint_s = pattern.s_pred().hint();
    let hint_p = pattern.p_pred().hint();
    let hint_o = pattern.o_pred().hint();

    let strategy = if hint_s == Hint::Match {
        strategy_for_s(hint_p, hint_o)
    } else if hint_p == Hint::Match {
        strategy_for_p(hint_s, hint_o)
    } else if hint_o == Hint::Match {
        strategy_for_o(hint_s, hint_p)
    } else if hint_s == Hint::None && hint_p == Hint::None && hint_o == Hint::None {
        Strategy::None
    } else {
        strategy_for_x(hint_s, hint_p, hint_o)
    };

    Plan {
        strategy,
        hint_s,
        hint_p,
        hint_o,
    }
}

/// S is MATCH. P/O disambiguate between SPO and SOP.
fn strategy_for_s(hint_p: Hint, hint_o: Hint) -> Strategy {
    match (hint_p, hint_o) {
        (Hint::None, Hint::None) => Strategy::Spo,
        (Hint::Match, Hint::None) => Strategy::Spo,
        (p, Hint::None) if is_filterish(p) => Strategy::Spo,
        (Hint::None, Hint::Match) => Strategy::Sop,
        (Hint::None, o) if is_filterish(o) => Strategy::Sop,
        (Hint::Match, Hint::Match) => Strategy::Spo,
        (p, Hint::Match) if is_filterish(p) => Strategy::Sop,
        (Hint::Match, o) if is_filterish(o) => Strategy::Spo,
        (p, o) if is_filterish(p) && is_filterish(o) => Strategy::Spo,
        _ => Strategy::None,
    }
}

/// P is MATCH (and S is not). S/O disambiguate between PSO and POS.
fn strategy_for_p(hint_s: Hint, hint_o: Hint) -> Strategy {
    match (hint_s, hint_o) {
        (Hint::None, Hint::None) => Strategy::Pso,
        (Hint::None, Hint::Match) => Strategy::Pos,
        (Hint::None, o) if is_filterish(o) => Strategy::Pos,
        (s, Hint::None) if is_filterish(s) => Strategy::Pso,
        (s, Hint::Match) if is_filterish(s) => Strategy::Pos,
        (s, o) if is_filterish(s) && is_filterish(o) => Strategy::Pso,
        _ => Strategy::None,
    }
}

/// O is MATCH (and neither S nor P is). S/P disambiguate OPS vs OSP.
fn strategy_for_o(hint_s: Hint, hint_p: Hint) -> Strategy {
    match (hint_s, hint_p) {
        (Hint::None, Hint::None) => Strategy::Ops,
        (Hint::None, p) if is_filterish(p) => Strategy::Ops,
        (s, Hint::None) if is_filterish(s) => Strategy::Osp,
        (s, p) if is_filterish(s) && is_filterish(p) => Strategy::Ops,
        _ => Strategy::None,
    }
}

/// No position is MATCH and at least one is FILTER/FILTER_PREFIX:
/// filter-only combinations (#21-#27 of the table).
fn strategy_for_x(hint_s: Hint, hint_p: Hint, hint_o: Hint) -> Strategy {
    let s = is_filterish(hint_s);
    let p = is_filterish(hint_p);
    let o = is_filterish(hint_o);

    match (s, p, o) {
        (true, false, false) => Strategy::Spo,
        (true, true, false) => Strategy::Spo,
        (true, false, true) => Strategy::Sop,
        (true, true, true) => Strategy::Spo,
        (false, true, false) => Strategy::Pso,
        (false, true, true) => Strategy::Pos,
        (false, false, true) => Strategy::Ops,
        (false, false, false) => Strategy::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{eq, iri, Pattern};
    use hexastore_api::Value;

    #[test]
    fn all_unbound_is_none() {
        assert_eq!(plan(&Pattern::new()).strategy, Strategy::None);
    }

    #[test]
    fn s_only_match_is_spo() {
        let pat = Pattern::new().s(iri::eq("https://ex/c"));
        assert_eq!(plan(&pat).strategy, Strategy::Spo);
    }

    #[test]
    fn s_match_p_match_is_spo() {
        let pat = Pattern::new()
            .s(iri::eq("https://ex/c"))
            .p(iri::eq("https://ex/follows"));
        assert_eq!(plan(&pat).strategy, Strategy::Spo);
    }

    #[test]
    fn s_match_p_prefix_is_spo() {
        let pat = Pattern::new()
            .s(iri::eq("https://ex/c"))
            .p(iri::has_prefix("https://ex/f").unwrap());
        assert_eq!(plan(&pat).strategy, Strategy::Spo);
    }

    #[test]
    fn o_match_only_is_ops() {
        let pat = Pattern::new().o(eq(Value::iri("https://ex/b")));
        assert_eq!(plan(&pat).strategy, Strategy::Ops);
    }

    #[test]
    fn p_match_o_gt_is_pos() {
        let pat = Pattern::new()
            .p(iri::eq("https://ex/status"))
            .o(crate::pattern::gt(Value::string("a")));
        assert_eq!(plan(&pat).strategy, Strategy::Pos);
    }

    #[test]
    fn s_prefix_only_filter_x_is_spo() {
        let pat = Pattern::new().s(iri::has_prefix("https://ex/").unwrap());
        assert_eq!(plan(&pat).strategy, Strategy::Spo);
    }

    #[test]
    fn planner_is_idempotent() {
        let pat = Pattern::new().s(iri::eq("https://ex/c"));
        assert_eq!(plan(&pat), plan(&pat));
    }
}
