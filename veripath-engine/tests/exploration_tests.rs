//! End-to-end exploration scenarios over the enumeration oracle.

use veripath_engine::{
    EngineError, EnumerationOracle, Explorer, ExplorerConfig, Literal, Oracle, Param, PathOutcome,
    PathRecord, RunContext, SymValue, TargetError, TargetResult,
};

fn int(n: i64) -> Literal {
    Literal::Integer(n)
}

fn explorer() -> Explorer<EnumerationOracle> {
    Explorer::new(EnumerationOracle::new())
}

/// Two nested data-dependent branches plus a failable assertion.
///
/// ```text
/// x, y = 1, 0
/// if a != 0:
///     y = 3 + x
///     if b == 0:
///         x = 2 * (a + b)
/// assert x - y != 0
/// return (x, y)
/// ```
fn balance<O: Oracle>(ctx: &mut RunContext<'_, O>, args: &[SymValue]) -> TargetResult {
    let (a, b) = (&args[0], &args[1]);
    let mut x = SymValue::from(1);
    let mut y = SymValue::from(0);
    if ctx.resolve(&a.ne(0)?)? {
        y = x.add(3)?;
        if ctx.resolve(&b.eq(0)?)? {
            x = a.add(b)?.mul(2)?;
        }
    }
    ctx.check(&x.sub(&y)?.ne(0)?, "checksum drift")?;
    Ok(vec![x, y])
}

fn balance_params() -> Vec<Param> {
    vec![Param::int("a"), Param::int("b")]
}

#[test]
fn balance_visits_all_four_leaves_in_dfs_order() {
    let records = explorer().explore(&balance_params(), balance).unwrap();

    let paths: Vec<&[bool]> = records.iter().map(|r| r.path.as_slice()).collect();
    assert_eq!(
        paths,
        [
            &[true, true, true][..],
            &[true, true, false],
            &[true, false],
            &[false],
        ]
    );
}

#[test]
fn balance_reports_concrete_outcomes_per_leaf() {
    let records = explorer().explore(&balance_params(), balance).unwrap();

    // Deepest path: both branches taken, assertion holds.
    assert_eq!(
        records[0].outcome,
        PathOutcome::Returned(vec![int(2), int(4)])
    );
    assert_eq!(
        records[0].witness,
        vec![("a".to_string(), int(1)), ("b".to_string(), int(0))]
    );

    // Same branches, assertion violated.
    assert_eq!(
        records[1].outcome,
        PathOutcome::Failed("checksum drift".into())
    );

    // Inner branch skipped: x stays 1, y becomes 4, the final claim is
    // concretely true and consumes no decision.
    assert_eq!(
        records[2].outcome,
        PathOutcome::Returned(vec![int(1), int(4)])
    );
    assert_eq!(
        records[2].witness,
        vec![("a".to_string(), int(1)), ("b".to_string(), int(1))]
    );

    // Outer branch skipped entirely; b is unconstrained and completes
    // to its sort default.
    assert_eq!(
        records[3].outcome,
        PathOutcome::Returned(vec![int(1), int(0)])
    );
    assert_eq!(
        records[3].witness,
        vec![("a".to_string(), int(0)), ("b".to_string(), int(0))]
    );
}

#[test]
fn balance_failure_witness_is_the_unique_breaking_input() {
    let records = explorer().explore(&balance_params(), balance).unwrap();
    let failure = records
        .iter()
        .find(|r| r.outcome.is_failure())
        .expect("one leaf must fail");
    // x - y == 0 under a != 0 and b == 0 pins a to exactly 2.
    assert_eq!(failure.witness_for("a"), Some(int(2)));
    assert_eq!(failure.witness_for("b"), Some(int(0)));
}

#[test]
fn balance_witnesses_replay_concretely() {
    fn concrete_balance(a: i64, b: i64) -> Result<(i64, i64), &'static str> {
        let mut x = 1;
        let mut y = 0;
        if a != 0 {
            y = 3 + x;
            if b == 0 {
                x = 2 * (a + b);
            }
        }
        if x - y == 0 {
            return Err("checksum drift");
        }
        Ok((x, y))
    }

    let records = explorer().explore(&balance_params(), balance).unwrap();
    for record in &records {
        let a = match record.witness_for("a") {
            Some(Literal::Integer(n)) => n,
            other => panic!("integer witness expected for a, got {other:?}"),
        };
        let b = match record.witness_for("b") {
            Some(Literal::Integer(n)) => n,
            other => panic!("integer witness expected for b, got {other:?}"),
        };
        match (&record.outcome, concrete_balance(a, b)) {
            (PathOutcome::Returned(values), Ok((x, y))) => {
                assert_eq!(values, &[int(x), int(y)], "witness ({a}, {b})");
            }
            (PathOutcome::Failed(message), Err(expected)) => {
                assert_eq!(message, expected, "witness ({a}, {b})");
            }
            (outcome, concrete) => {
                panic!("witness ({a}, {b}): engine saw {outcome:?}, concrete run saw {concrete:?}")
            }
        }
    }
}

#[test]
fn balance_leaves_match_a_brute_force_enumeration() {
    // Independently enumerate the decision vectors concrete inputs can
    // produce. The final claim only becomes a decision when it stays
    // symbolic, meaning both outer branches were taken.
    let mut expected = std::collections::BTreeSet::new();
    for a in -5..=5_i64 {
        for b in -5..=5_i64 {
            let mut decisions = vec![a != 0];
            if a != 0 && b == 0 {
                decisions.push(true);
                decisions.push(2 * (a + b) - 4 != 0);
            } else if a != 0 {
                decisions.push(false);
            }
            expected.insert(decisions);
        }
    }

    let records = explorer().explore(&balance_params(), balance).unwrap();
    let explored: std::collections::BTreeSet<Vec<bool>> =
        records.iter().map(|r| r.path.clone()).collect();
    assert_eq!(explored, expected);
    // Once per leaf: no path may repeat.
    assert_eq!(records.len(), explored.len());
}

#[test]
fn exploration_is_deterministic_across_instances() {
    let first = explorer().explore(&balance_params(), balance).unwrap();
    let second = explorer().explore(&balance_params(), balance).unwrap();
    assert_eq!(first, second);
}

/// True only past both thresholds; the inner test shifts `x` first.
fn thresholds<O: Oracle>(ctx: &mut RunContext<'_, O>, args: &[SymValue]) -> TargetResult {
    let x = &args[0];
    if ctx.resolve(&x.gt(100)?)? {
        if ctx.resolve(&x.add(1)?.gt(1000)?)? {
            return Ok(vec![SymValue::from(true)]);
        }
    }
    Ok(vec![SymValue::from(false)])
}

#[test]
fn thresholds_yield_one_leaf_per_band() {
    let mut explorer = Explorer::new(EnumerationOracle::with_range(-8, 2048));
    let records = explorer.explore(&[Param::int("x")], thresholds).unwrap();

    assert_eq!(records.len(), 3);

    // x > 100 and x + 1 > 1000.
    assert_eq!(records[0].path, [true, true]);
    assert_eq!(
        records[0].outcome,
        PathOutcome::Returned(vec![Literal::Boolean(true)])
    );
    assert_eq!(records[0].witness_for("x"), Some(int(1000)));

    // x > 100 but x + 1 stays at or below 1000.
    assert_eq!(records[1].path, [true, false]);
    assert_eq!(
        records[1].outcome,
        PathOutcome::Returned(vec![Literal::Boolean(false)])
    );
    assert_eq!(records[1].witness_for("x"), Some(int(101)));

    assert_eq!(records[2].path, [false]);
    assert_eq!(
        records[2].outcome,
        PathOutcome::Returned(vec![Literal::Boolean(false)])
    );
    assert_eq!(records[2].witness_for("x"), Some(int(0)));
}

/// A guard whose nested test cannot fail: within x > 10, x > 5 always
/// holds, so the inner branch is forced and never widens the path.
fn nested_guard<O: Oracle>(ctx: &mut RunContext<'_, O>, args: &[SymValue]) -> TargetResult {
    let x = &args[0];
    if ctx.resolve(&x.gt(10)?)? {
        if ctx.resolve(&x.gt(5)?)? {
            return Ok(vec![SymValue::from(1)]);
        }
        return Ok(vec![SymValue::from(2)]);
    }
    Ok(vec![SymValue::from(0)])
}

#[test]
fn forced_branches_are_pruned_from_the_path() {
    let records = explorer().explore(&[Param::int("x")], nested_guard).unwrap();

    // Two leaves, not three: the inner decision never becomes a branch
    // point, so its unreachable side is never scheduled.
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].path, [true]);
    assert_eq!(records[0].outcome, PathOutcome::Returned(vec![int(1)]));
    assert_eq!(records[0].witness_for("x"), Some(int(11)));
    assert_eq!(records[1].path, [false]);
    assert_eq!(records[1].outcome, PathOutcome::Returned(vec![int(0)]));
}

/// Crash on one specific input value, double everything else.
fn forbidden<O: Oracle>(ctx: &mut RunContext<'_, O>, args: &[SymValue]) -> TargetResult {
    let x = &args[0];
    if ctx.resolve(&x.eq(4)?)? {
        return Err(TargetError::assertion("hit the forbidden value"));
    }
    Ok(vec![x.mul(2)?])
}

#[test]
fn unconditional_failures_are_per_path_outcomes() {
    let records = explorer().explore(&[Param::int("x")], forbidden).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].outcome,
        PathOutcome::Failed("hit the forbidden value".into())
    );
    assert_eq!(records[0].witness_for("x"), Some(int(4)));
    assert_eq!(records[1].outcome, PathOutcome::Returned(vec![int(0)]));
}

/// Boolean parameters branch like any other condition.
fn gate<O: Oracle>(ctx: &mut RunContext<'_, O>, args: &[SymValue]) -> TargetResult {
    let (p, q) = (&args[0], &args[1]);
    if ctx.resolve(&p.eq(q)?)? {
        return Ok(vec![SymValue::from(0)]);
    }
    ctx.check(&p.eq(true)?, "q set without p")?;
    Ok(vec![SymValue::from(1)])
}

#[test]
fn boolean_parameters_explore_and_witness() {
    let params = vec![Param::bool("p"), Param::bool("q")];
    let records = explorer().explore(&params, gate).unwrap();

    assert_eq!(records.len(), 3);

    assert_eq!(records[0].path, [true]);
    assert_eq!(
        records[0].witness,
        vec![
            ("p".to_string(), Literal::Boolean(false)),
            ("q".to_string(), Literal::Boolean(false)),
        ]
    );

    assert_eq!(records[1].path, [false, true]);
    assert_eq!(
        records[1].witness,
        vec![
            ("p".to_string(), Literal::Boolean(true)),
            ("q".to_string(), Literal::Boolean(false)),
        ]
    );

    assert_eq!(records[2].path, [false, false]);
    assert_eq!(
        records[2].outcome,
        PathOutcome::Failed("q set without p".into())
    );
    assert_eq!(
        records[2].witness,
        vec![
            ("p".to_string(), Literal::Boolean(false)),
            ("q".to_string(), Literal::Boolean(true)),
        ]
    );
}

#[test]
fn branchless_targets_finish_in_one_run() {
    fn passthrough<O: Oracle>(_: &mut RunContext<'_, O>, args: &[SymValue]) -> TargetResult {
        Ok(vec![args[0].add(1)?])
    }

    let params = vec![Param::int("x"), Param::bool("flag")];
    let records = explorer().explore(&params, passthrough).unwrap();

    assert_eq!(records.len(), 1);
    assert!(records[0].path.is_empty());
    // Nothing constrains either argument; both complete to defaults.
    assert_eq!(
        records[0].witness,
        vec![
            ("x".to_string(), Literal::Integer(0)),
            ("flag".to_string(), Literal::Boolean(false)),
        ]
    );
    assert_eq!(records[0].outcome, PathOutcome::Returned(vec![int(1)]));
}

#[test]
fn engine_faults_abort_the_exploration() {
    fn faulty<O: Oracle>(_: &mut RunContext<'_, O>, args: &[SymValue]) -> TargetResult {
        // Integer plus boolean; the sort error rides `?` out of the target.
        Ok(vec![args[0].add(&args[1])?])
    }

    let params = vec![Param::int("a"), Param::bool("p")];
    let err = explorer().explore(&params, faulty).unwrap_err();
    assert!(matches!(err, EngineError::SortMismatch { op: "+", .. }));
}

#[test]
fn run_limit_aborts_unfinished_exploration() {
    let config = ExplorerConfig {
        max_runs: Some(2),
    };
    let mut explorer = Explorer::with_config(EnumerationOracle::new(), config);
    let err = explorer.explore(&balance_params(), balance).unwrap_err();
    assert_eq!(err, EngineError::RunLimitExceeded(2));
}

#[test]
fn duplicate_params_fail_before_any_run() {
    let params = vec![Param::int("a"), Param::int("a")];
    let mut ran = false;
    let err = explorer()
        .explore(&params, |_, _| {
            ran = true;
            Ok(vec![])
        })
        .unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
    assert!(!ran);
}

#[test]
fn records_round_trip_through_serde() {
    let records = explorer().explore(&balance_params(), balance).unwrap();
    let encoded = serde_json::to_string(&records).unwrap();
    let decoded: Vec<PathRecord> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, records);
}
