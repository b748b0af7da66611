//! Constraint oracle interface
//!
//! The engine asks two questions of a backend: is a conjunction of
//! boolean terms satisfiable, and if so, under what assignment. Backends
//! live in [`crate::enumerate`] and, behind the `z3` feature,
//! [`crate::z3_oracle`].

use rustc_hash::FxHashMap;

use crate::errors::{EngineError, EngineResult};
use crate::simplify::fold_binop;
use crate::symbolic::{Literal, Sort, Term};

/// Verdict of a satisfiability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatResult {
    /// Some assignment satisfies the conjunction
    Sat,
    /// No assignment does
    Unsat,
}

/// A decision procedure for conjunctions of boolean terms.
///
/// `check` takes `&mut self` so backends may keep incremental state;
/// `model` reports the witness of the most recent `Sat` verdict.
pub trait Oracle {
    /// Decide whether the conjunction of `formulas` is satisfiable.
    fn check(&mut self, formulas: &[Term]) -> EngineResult<SatResult>;

    /// Witness assignment for the most recent [`SatResult::Sat`] answer.
    /// Calling this after an `Unsat` verdict, or before any `check`, is
    /// a [`EngineError::Solver`] error.
    fn model(&self) -> EngineResult<Model>;
}

/// A concrete assignment of literals to variable names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    assignments: FxHashMap<String, Literal>,
}

impl Model {
    /// An empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn insert(&mut self, name: impl Into<String>, value: Literal) {
        self.assignments.insert(name.into(), value);
    }

    /// The literal bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<Literal> {
        self.assignments.get(name).copied()
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Evaluate `term` under this assignment. Variables the model leaves
    /// unbound complete to their sort default: integer `0`, boolean
    /// `false`.
    pub fn eval(&self, term: &Term) -> EngineResult<Literal> {
        eval_with(term, &|name, sort| {
            self.get(name).unwrap_or_else(|| default_literal(sort))
        })
    }
}

impl FromIterator<(String, Literal)> for Model {
    fn from_iter<I: IntoIterator<Item = (String, Literal)>>(iter: I) -> Self {
        Model {
            assignments: iter.into_iter().collect(),
        }
    }
}

fn default_literal(sort: Sort) -> Literal {
    match sort {
        Sort::Integer => Literal::Integer(0),
        Sort::Boolean => Literal::Boolean(false),
    }
}

/// Evaluate a term with `lookup` supplying every variable's value.
pub(crate) fn eval_with(
    term: &Term,
    lookup: &dyn Fn(&str, Sort) -> Literal,
) -> EngineResult<Literal> {
    match term {
        Term::Literal(l) => Ok(*l),
        Term::Var { name, sort } => Ok(lookup(name, *sort)),
        Term::BinOp { op, left, right } => {
            let l = eval_with(left, lookup)?;
            let r = eval_with(right, lookup)?;
            fold_binop(*op, l, r).ok_or(EngineError::SortMismatch {
                op: op.symbol(),
                left: l.sort(),
                right: r.sort(),
            })
        }
        Term::Not(inner) => match eval_with(inner, lookup)? {
            Literal::Boolean(b) => Ok(Literal::Boolean(!b)),
            Literal::Integer(_) => Err(EngineError::ExpectedBoolean {
                context: "negation",
                found: Sort::Integer,
            }),
        },
    }
}
