//! Exploration driver
//!
//! Runs a target function repeatedly over fresh symbolic arguments,
//! backtracking through the recorded branch decisions until every
//! feasible path has been visited. Each finished path yields a
//! [`PathRecord`] with a concrete witness for the arguments.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{EngineError, EngineResult, TargetError};
use crate::oracle::{Model, Oracle, SatResult};
use crate::resolver::RunContext;
use crate::state::ExplorationState;
use crate::symbolic::{Literal, Sort, SymValue, Term};

/// A declared parameter of the target function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Variable name bound to this parameter
    pub name: String,
    /// Declared sort
    pub sort: Sort,
}

impl Param {
    /// A parameter with an explicit sort.
    pub fn new(name: impl Into<String>, sort: Sort) -> Self {
        Param {
            name: name.into(),
            sort,
        }
    }

    /// An integer-sorted parameter.
    pub fn int(name: impl Into<String>) -> Self {
        Param::new(name, Sort::Integer)
    }

    /// A boolean-sorted parameter.
    pub fn bool(name: impl Into<String>) -> Self {
        Param::new(name, Sort::Boolean)
    }

    /// Parse a `name: sort` declaration such as `"a: int"`.
    pub fn parse(decl: &str) -> EngineResult<Self> {
        let (name, sort) = decl.split_once(':').ok_or_else(|| {
            EngineError::Config(format!("parameter `{decl}` lacks a sort annotation"))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::Config(format!(
                "parameter declaration `{decl}` has an empty name"
            )));
        }
        Ok(Param::new(name, sort.trim().parse()?))
    }
}

/// How one explored path ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathOutcome {
    /// The target returned normally; its return values are concretized
    /// under the path's witness model.
    Returned(Vec<Literal>),
    /// The target failed an assertion with this message.
    Failed(String),
}

impl PathOutcome {
    /// Whether this path ended in an assertion failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, PathOutcome::Failed(_))
    }
}

/// One fully explored path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
    /// Free-branch decisions characterizing the path, outermost first
    pub path: Vec<bool>,
    /// Concrete argument assignment satisfying the path, in declaration
    /// order
    pub witness: Vec<(String, Literal)>,
    /// How the path ended
    pub outcome: PathOutcome,
}

impl PathRecord {
    /// The witness value bound to `name`, if declared.
    pub fn witness_for(&self, name: &str) -> Option<Literal> {
        self.witness
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

/// What a target function produces for one run.
pub type TargetResult = Result<Vec<SymValue>, TargetError>;

/// Exploration limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Abort with [`EngineError::RunLimitExceeded`] after this many runs.
    /// `None` means run until the tree is exhausted.
    pub max_runs: Option<u64>,
}

/// Depth-first concolic explorer over a constraint oracle.
pub struct Explorer<O: Oracle> {
    oracle: O,
    config: ExplorerConfig,
}

impl<O: Oracle> Explorer<O> {
    /// Explorer with default configuration.
    pub fn new(oracle: O) -> Self {
        Explorer::with_config(oracle, ExplorerConfig::default())
    }

    /// Explorer with explicit limits.
    pub fn with_config(oracle: O, config: ExplorerConfig) -> Self {
        Explorer { oracle, config }
    }

    /// Run `target` over symbolic arguments for `params` until every
    /// feasible path is visited, returning one record per path in
    /// depth-first discovery order.
    ///
    /// The target receives a [`RunContext`] to resolve branches through
    /// and the symbolic arguments in declaration order. It must branch
    /// deterministically: given the same resolved decisions it has to
    /// reach the same branch points in the same order.
    pub fn explore<F>(&mut self, params: &[Param], mut target: F) -> EngineResult<Vec<PathRecord>>
    where
        F: FnMut(&mut RunContext<'_, O>, &[SymValue]) -> TargetResult,
    {
        validate_params(params)?;

        let mut state = ExplorationState::new();
        let mut records = Vec::new();
        let mut runs: u64 = 0;

        loop {
            if let Some(limit) = self.config.max_runs {
                if runs == limit {
                    return Err(EngineError::RunLimitExceeded(limit));
                }
            }
            runs += 1;

            state.begin_run();
            debug!("run {} retracing path {:?}", runs, state.path());

            let args: Vec<SymValue> = params
                .iter()
                .map(|p| SymValue::var(&p.name, p.sort))
                .collect();
            let finished: Result<Vec<SymValue>, String> = {
                let mut ctx = RunContext::new(&mut self.oracle, &mut state);
                match target(&mut ctx, &args) {
                    Ok(values) => Ok(values),
                    Err(TargetError::Assertion(message)) => Err(message),
                    Err(TargetError::Engine(fault)) => return Err(fault),
                }
            };

            let model = self.path_model(&state)?;
            let witness = params
                .iter()
                .map(|p| {
                    let value = model.eval(&Term::var(&p.name, p.sort))?;
                    Ok((p.name.clone(), value))
                })
                .collect::<EngineResult<Vec<_>>>()?;
            let outcome = match finished {
                Ok(values) => PathOutcome::Returned(
                    values
                        .iter()
                        .map(|v| model.eval(v.term()))
                        .collect::<EngineResult<Vec<_>>>()?,
                ),
                Err(message) => PathOutcome::Failed(message),
            };

            debug!(
                "path {:?} finished with {} free branches",
                state.path(),
                state.choices()
            );
            records.push(PathRecord {
                path: state.path().to_vec(),
                witness,
                outcome,
            });

            if !state.end_run() {
                break;
            }
        }

        debug!("tree exhausted after {} runs", runs);
        Ok(records)
    }

    /// Witness model for the just-finished run's trail.
    fn path_model(&mut self, state: &ExplorationState) -> EngineResult<Model> {
        match self.oracle.check(state.trail())? {
            SatResult::Sat => self.oracle.model(),
            SatResult::Unsat => Err(EngineError::UnsatisfiableTrail {
                depth: state.trail().len(),
            }),
        }
    }
}

fn validate_params(params: &[Param]) -> EngineResult<()> {
    for (i, param) in params.iter().enumerate() {
        if param.name.is_empty() {
            return Err(EngineError::Config(format!(
                "parameter {i} has an empty name"
            )));
        }
        if params[..i].iter().any(|p| p.name == param.name) {
            return Err(EngineError::Config(format!(
                "duplicate parameter name `{}`",
                param.name
            )));
        }
    }
    Ok(())
}
