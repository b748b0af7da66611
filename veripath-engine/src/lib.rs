//! Concolic path exploration engine
//!
//! Executes a target function over symbolic arguments and discovers, one
//! run at a time, every feasible path through its conditional branches.
//! Branch decisions are recorded in a stack; after each run the deepest
//! `true` decision flips to `false`, and the next run retraces the
//! prefix before diverging. Forced branches, where the accumulated
//! constraints leave only one side open, are pruned without consuming a
//! decision.
//!
//! Each explored path is reported as a [`PathRecord`]: the decisions
//! taken, a concrete argument witness from the constraint oracle, and
//! the outcome, either returned values or an assertion failure.
//!
//! Satisfiability checks go through the [`Oracle`] trait. The built-in
//! [`EnumerationOracle`] searches a bounded integer window and needs no
//! external solver; the `z3` feature adds [`Z3Oracle`] on top of the
//! `z3` crate.

pub mod enumerate;
pub mod errors;
pub mod explorer;
pub mod oracle;
pub mod resolver;
pub mod simplify;
pub mod state;
pub mod symbolic;

#[cfg(feature = "z3")]
pub mod z3_oracle;

pub use enumerate::EnumerationOracle;
pub use errors::{EngineError, EngineResult, TargetError};
pub use explorer::{Explorer, ExplorerConfig, Param, PathOutcome, PathRecord, TargetResult};
pub use oracle::{Model, Oracle, SatResult};
pub use resolver::RunContext;
pub use state::ExplorationState;
pub use symbolic::{BinOp, BoolValue, IntValue, Literal, Sort, SymValue, Term};

#[cfg(feature = "z3")]
pub use z3_oracle::Z3Oracle;
