//! Exploration state
//!
//! Tracks the decided path across runs and the constraint trail within a
//! run. The path is a stack of branch decisions for the free branch
//! points met so far; the trail is the conjunction of every branch
//! formula (free and forced) committed during the current run.

use crate::symbolic::Term;

/// Mutable state threaded through one exploration.
///
/// Forced branches append to the trail but never to the path, so the
/// replay position cannot be derived from the trail length. The `cursor`
/// counts free branch points only and indexes the next path entry to
/// replay.
#[derive(Debug, Default)]
pub struct ExplorationState {
    path: Vec<bool>,
    trail: Vec<Term>,
    cursor: usize,
}

impl ExplorationState {
    /// Empty state, ready for a first run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run: the trail and replay cursor reset, the decided path
    /// carries over from previous runs.
    pub fn begin_run(&mut self) {
        self.trail.clear();
        self.cursor = 0;
    }

    /// Branch decisions made so far, outermost first.
    pub fn path(&self) -> &[bool] {
        &self.path
    }

    /// Constraints committed during the current run.
    pub fn trail(&self) -> &[Term] {
        &self.trail
    }

    /// Number of free branch points resolved in the current run.
    pub fn choices(&self) -> usize {
        self.cursor
    }

    /// The decision to replay at the current free branch point, if this
    /// run is still retracing prefix decisions from earlier runs.
    pub(crate) fn pending_decision(&self) -> Option<bool> {
        self.path.get(self.cursor).copied()
    }

    /// Commit a forced branch: its formula constrains the path but there
    /// was no choice to record.
    pub(crate) fn record_forced(&mut self, formula: Term) {
        self.trail.push(formula);
    }

    /// Commit a replayed decision at a free branch point.
    pub(crate) fn record_replayed(&mut self, formula: Term) {
        self.trail.push(formula);
        self.cursor += 1;
    }

    /// Commit a fresh free branch point, decided `true` by convention.
    pub(crate) fn record_fresh(&mut self, formula: Term) {
        debug_assert_eq!(self.cursor, self.path.len());
        self.path.push(true);
        self.trail.push(formula);
        self.cursor += 1;
    }

    /// Backtrack after a finished run: drop decisions whose `false` side
    /// is already explored, then flip the deepest remaining `true` to
    /// `false`. Returns `false` when no decision remains, meaning the
    /// whole tree has been visited.
    pub fn end_run(&mut self) -> bool {
        self.drop_explored();
        match self.path.last_mut() {
            Some(last) => {
                *last = false;
                true
            }
            None => false,
        }
    }

    /// Pop the trailing `false` decisions. Idempotent.
    fn drop_explored(&mut self) {
        while self.path.last() == Some(&false) {
            self.path.pop();
        }
    }
}
