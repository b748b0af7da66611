//! Engine error types

use thiserror::Error;

use crate::symbolic::Sort;

/// Fatal engine faults.
///
/// Any of these aborts the whole exploration. Per-path assertion failures
/// are not errors; they are recorded as
/// [`PathOutcome::Failed`](crate::explorer::PathOutcome) and exploration
/// continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The target declares parameters the engine cannot model
    #[error("configuration error: {0}")]
    Config(String),

    /// An operation combined values of incompatible sorts
    #[error("sort mismatch: operator `{op}` cannot combine {left} and {right}")]
    SortMismatch {
        /// Operator symbol as written in diagnostics
        op: &'static str,
        /// Sort of the left operand
        left: Sort,
        /// Sort of the right operand
        right: Sort,
    },

    /// A boolean value was required but an integer-sorted value was supplied
    #[error("sort mismatch: {context} requires a boolean value, found {found}")]
    ExpectedBoolean {
        /// What needed the boolean (branch condition, negation, ...)
        context: &'static str,
        /// Sort actually supplied
        found: Sort,
    },

    /// The constraint oracle failed or returned an unusable answer
    #[error("solver error: {0}")]
    Solver(String),

    /// Both sides of a branch were unsatisfiable, meaning the accumulated
    /// trail itself is contradictory. The resolver never produces such a
    /// trail, so this indicates an internal defect.
    #[error("internal invariant violated: constraint trail unsatisfiable at depth {depth}")]
    UnsatisfiableTrail {
        /// Trail length at the failing branch point
        depth: usize,
    },

    /// The configured run limit was reached before the tree was exhausted
    #[error("exploration exceeded the configured limit of {0} runs")]
    RunLimitExceeded(u64),
}

/// Faults a target function can raise during a single run.
///
/// An assertion failure is a per-path outcome; an engine fault aborts the
/// whole exploration. `From<EngineError>` lets `?` inside a target route
/// engine faults to the fatal channel automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// An assertion over the current path failed with this message
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// A fatal engine fault propagating out of the target
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl TargetError {
    /// Build an assertion failure, for targets that fail unconditionally
    /// on a path.
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
