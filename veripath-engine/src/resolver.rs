//! Branch resolution
//!
//! Where symbolic booleans become concrete decisions. Every branch on a
//! symbolic condition asks the oracle whether each side is feasible under
//! the current trail; forced branches commit without consuming a
//! decision, free branches replay the recorded path or extend it.

use tracing::trace;

use crate::errors::{EngineError, EngineResult, TargetError};
use crate::oracle::{Oracle, SatResult};
use crate::state::ExplorationState;
use crate::symbolic::{Literal, Sort, SymValue, Term};

/// Per-run execution context handed to the target function.
///
/// Borrows both the oracle and the exploration state mutably, so a target
/// cannot start a nested exploration through the same context. Resolution
/// order within a run defines the path; targets must be deterministic
/// given the decisions they receive.
pub struct RunContext<'a, O: Oracle> {
    oracle: &'a mut O,
    state: &'a mut ExplorationState,
}

impl<'a, O: Oracle> RunContext<'a, O> {
    pub(crate) fn new(oracle: &'a mut O, state: &'a mut ExplorationState) -> Self {
        RunContext { oracle, state }
    }

    /// Decide a symbolic condition, committing the taken side to the
    /// constraint trail.
    ///
    /// A concrete condition decides itself and leaves no trace. When only
    /// one side is satisfiable together with the trail, that side is
    /// forced; it constrains the trail but never appears on the path.
    /// When both sides are open the decision either replays the recorded
    /// path or, past its end, opens a fresh branch point decided `true`.
    pub fn resolve(&mut self, cond: &SymValue) -> EngineResult<bool> {
        let formula = match cond {
            SymValue::Boolean(b) => b.term().clone(),
            SymValue::Integer(_) => {
                return Err(EngineError::ExpectedBoolean {
                    context: "branch condition",
                    found: Sort::Integer,
                })
            }
        };

        if let Some(Literal::Boolean(decision)) = formula.as_literal() {
            return Ok(decision);
        }

        let negated = formula.clone().negated();
        let can_hold = self.feasible(&formula)?;
        let can_fail = self.feasible(&negated)?;

        match (can_hold, can_fail) {
            (true, false) => {
                trace!("forced branch: {} must hold", formula);
                self.state.record_forced(formula);
                Ok(true)
            }
            (false, true) => {
                trace!("forced branch: {} cannot hold", formula);
                self.state.record_forced(negated);
                Ok(false)
            }
            (true, true) => match self.state.pending_decision() {
                Some(decision) => {
                    trace!("replaying branch {} as {}", self.state.choices(), decision);
                    self.state
                        .record_replayed(if decision { formula } else { negated });
                    Ok(decision)
                }
                None => {
                    trace!("fresh branch point: {}", formula);
                    self.state.record_fresh(formula);
                    Ok(true)
                }
            },
            (false, false) => Err(EngineError::UnsatisfiableTrail {
                depth: self.state.trail().len(),
            }),
        }
    }

    /// Resolve `cond` and fail the current path with `message` when it
    /// comes out false.
    pub fn check(&mut self, cond: &SymValue, message: impl Into<String>) -> Result<(), TargetError> {
        if self.resolve(cond)? {
            Ok(())
        } else {
            Err(TargetError::Assertion(message.into()))
        }
    }

    fn feasible(&mut self, formula: &Term) -> EngineResult<bool> {
        let mut query: Vec<Term> = self.state.trail().to_vec();
        query.push(formula.clone());
        Ok(self.oracle.check(&query)? == SatResult::Sat)
    }
}
