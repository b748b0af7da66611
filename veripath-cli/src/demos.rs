//! Built-in demo targets
//!
//! Small programs with interesting branch structure, written against the
//! engine API the way a caller would write their own targets.

use anyhow::bail;
use veripath_engine::{
    Explorer, Oracle, Param, PathRecord, RunContext, SymValue, TargetError, TargetResult,
};

/// Name and one-line summary of every demo target.
pub const DEMOS: &[(&str, &str)] = &[
    (
        "balance",
        "nested data-dependent branches with a failable final claim",
    ),
    (
        "thresholds",
        "two nested integer thresholds carving three bands",
    ),
    (
        "forbidden",
        "a single crashing input value among doubled outputs",
    ),
    (
        "parity",
        "boolean flags that must match, unless `p` leads the mismatch",
    ),
];

/// Enumeration window sized to each demo's constants.
pub fn window(name: &str) -> (i64, i64) {
    match name {
        "thresholds" => (-8, 2048),
        _ => (-128, 128),
    }
}

/// Explore a demo target by name.
pub fn run<O: Oracle>(name: &str, explorer: &mut Explorer<O>) -> anyhow::Result<Vec<PathRecord>> {
    let records = match name {
        "balance" => explorer.explore(&[Param::int("a"), Param::int("b")], balance)?,
        "thresholds" => explorer.explore(&[Param::int("x")], thresholds)?,
        "forbidden" => explorer.explore(&[Param::int("x")], forbidden)?,
        "parity" => explorer.explore(&[Param::bool("p"), Param::bool("q")], parity)?,
        other => bail!("unknown demo target `{other}`"),
    };
    Ok(records)
}

/// Two nested branches over `a` and `b`, then a claim that the final
/// `x - y` never lands on zero. It does for exactly one input.
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

/// True only past both thresholds: `x > 100` and `x + 1 > 1000`.
fn thresholds<O: Oracle>(ctx: &mut RunContext<'_, O>, args: &[SymValue]) -> TargetResult {
    let x = &args[0];
    if ctx.resolve(&x.gt(100)?)? {
        if ctx.resolve(&x.add(1)?.gt(1000)?)? {
            return Ok(vec![SymValue::from(true)]);
        }
    }
    Ok(vec![SymValue::from(false)])
}

/// Double the input, except for one value that crashes outright.
fn forbidden<O: Oracle>(ctx: &mut RunContext<'_, O>, args: &[SymValue]) -> TargetResult {
    let x = &args[0];
    if ctx.resolve(&x.eq(4)?)? {
        return Err(TargetError::assertion("hit the forbidden value"));
    }
    Ok(vec![x.mul(2)?])
}

/// Accept flags with matching parity, or `p` alone; reject `q` without `p`.
fn parity<O: Oracle>(ctx: &mut RunContext<'_, O>, args: &[SymValue]) -> TargetResult {
    let (p, q) = (&args[0], &args[1]);
    if ctx.resolve(&p.eq(q)?)? {
        return Ok(vec![SymValue::from(0)]);
    }
    ctx.check(&p.eq(true)?, "q set without p")?;
    Ok(vec![SymValue::from(1)])
}
