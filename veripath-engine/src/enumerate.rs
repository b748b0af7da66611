//! Bounded enumeration oracle
//!
//! A reference [`Oracle`] that decides satisfiability by exhaustively
//! trying assignments over a bounded integer window. Complete within the
//! window and fully deterministic: integers are scanned closest-to-zero
//! first, booleans `false` before `true`, variables in name order.
//!
//! A solution lying entirely outside the window is reported `Unsat`, so
//! callers must size the window to the constants their constraints
//! mention. The Z3 backend has no such bound.

use rustc_hash::FxHashMap;

use crate::errors::{EngineError, EngineResult};
use crate::oracle::{eval_with, Model, Oracle, SatResult};
use crate::symbolic::{Literal, Sort, Term};

/// Default half-width of the integer search window.
const DEFAULT_WINDOW: i64 = 128;

/// Exhaustive-search oracle over a bounded integer window.
#[derive(Debug, Clone)]
pub struct EnumerationOracle {
    lo: i64,
    hi: i64,
    last_model: Option<Model>,
}

impl EnumerationOracle {
    /// Oracle over the default window of `-128..=128`.
    pub fn new() -> Self {
        Self::with_range(-DEFAULT_WINDOW, DEFAULT_WINDOW)
    }

    /// Oracle searching integer assignments within `lo..=hi`.
    ///
    /// # Panics
    ///
    /// Panics when `lo > hi`.
    pub fn with_range(lo: i64, hi: i64) -> Self {
        assert!(lo <= hi, "enumeration window {lo}..={hi} is empty");
        EnumerationOracle {
            lo,
            hi,
            last_model: None,
        }
    }

    /// Inclusive bounds of the search window.
    pub fn range(&self) -> (i64, i64) {
        (self.lo, self.hi)
    }
}

impl Default for EnumerationOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl Oracle for EnumerationOracle {
    fn check(&mut self, formulas: &[Term]) -> EngineResult<SatResult> {
        self.last_model = None;

        let mut vars = std::collections::BTreeMap::new();
        for formula in formulas {
            if formula.sort() != Sort::Boolean {
                return Err(EngineError::ExpectedBoolean {
                    context: "constraint",
                    found: formula.sort(),
                });
            }
            formula.collect_vars(&mut vars);
        }
        let names: Vec<(String, Sort)> = vars.into_iter().collect();

        let mut assignment = FxHashMap::default();
        match search(&names, 0, self.lo, self.hi, &mut assignment, formulas)? {
            Some(model) => {
                self.last_model = Some(model);
                Ok(SatResult::Sat)
            }
            None => Ok(SatResult::Unsat),
        }
    }

    fn model(&self) -> EngineResult<Model> {
        self.last_model.clone().ok_or_else(|| {
            EngineError::Solver("no model available; the last check was not satisfiable".into())
        })
    }
}

fn search(
    names: &[(String, Sort)],
    index: usize,
    lo: i64,
    hi: i64,
    assignment: &mut FxHashMap<String, Literal>,
    formulas: &[Term],
) -> EngineResult<Option<Model>> {
    if index == names.len() {
        let lookup = |name: &str, sort: Sort| match assignment.get(name) {
            Some(value) => *value,
            None => match sort {
                Sort::Integer => Literal::Integer(0),
                Sort::Boolean => Literal::Boolean(false),
            },
        };
        for formula in formulas {
            match eval_with(formula, &lookup)? {
                Literal::Boolean(true) => {}
                Literal::Boolean(false) => return Ok(None),
                Literal::Integer(_) => {
                    return Err(EngineError::ExpectedBoolean {
                        context: "constraint",
                        found: Sort::Integer,
                    })
                }
            }
        }
        return Ok(Some(
            assignment
                .iter()
                .map(|(name, value)| (name.clone(), *value))
                .collect(),
        ));
    }

    let (name, sort) = &names[index];
    match sort {
        Sort::Boolean => {
            for candidate in [false, true] {
                assignment.insert(name.clone(), Literal::Boolean(candidate));
                if let Some(model) = search(names, index + 1, lo, hi, assignment, formulas)? {
                    return Ok(Some(model));
                }
            }
        }
        Sort::Integer => {
            for candidate in window_scan(lo, hi) {
                assignment.insert(name.clone(), Literal::Integer(candidate));
                if let Some(model) = search(names, index + 1, lo, hi, assignment, formulas)? {
                    return Ok(Some(model));
                }
            }
        }
    }
    assignment.remove(name);
    Ok(None)
}

/// Scan `lo..=hi` starting from the value closest to zero and fanning
/// outward, so witnesses favor small magnitudes.
fn window_scan(lo: i64, hi: i64) -> impl Iterator<Item = i64> {
    let pivot = 0_i64.clamp(lo, hi);
    let up = (hi as i128 - pivot as i128) as u128;
    let down = (pivot as i128 - lo as i128) as u128;
    (0..=up.max(down)).flat_map(move |distance| {
        let above = (distance <= up).then(|| (pivot as i128 + distance as i128) as i64);
        let below =
            (distance > 0 && distance <= down).then(|| (pivot as i128 - distance as i128) as i64);
        above.into_iter().chain(below)
    })
}
