//! Z3-backed constraint oracle
//!
//! Translates engine terms into Z3 ASTs and answers satisfiability
//! queries through the `z3` crate. Only compiled with the `z3` feature;
//! the [`EnumerationOracle`](crate::enumerate::EnumerationOracle) covers
//! builds without a solver installation.

use rustc_hash::FxHashMap;
use z3::{
    ast::{Ast, Bool as Z3Bool, Dynamic as Z3Expr, Int as Z3Int},
    Context, Solver,
};

use crate::errors::{EngineError, EngineResult};
use crate::oracle::{Model, Oracle, SatResult};
use crate::simplify::simplify;
use crate::symbolic::{BinOp, Literal, Sort, Term};

/// Constraint oracle backed by the Z3 SMT solver.
///
/// Borrows a caller-owned [`Context`]; variables are interned per name so
/// every query over the same exploration shares its constants.
pub struct Z3Oracle<'ctx> {
    context: &'ctx Context,
    solver: Solver<'ctx>,
    variables: FxHashMap<String, Z3Expr<'ctx>>,
}

impl<'ctx> Z3Oracle<'ctx> {
    /// Oracle over the given Z3 context.
    pub fn new(context: &'ctx Context) -> Self {
        Z3Oracle {
            context,
            solver: Solver::new(context),
            variables: FxHashMap::default(),
        }
    }

    /// Convert a term to a Z3 expression.
    fn term_to_z3(&mut self, term: &Term) -> EngineResult<Z3Expr<'ctx>> {
        match term {
            Term::Literal(Literal::Integer(n)) => Ok(Z3Int::from_i64(self.context, *n).into()),
            Term::Literal(Literal::Boolean(b)) => Ok(Z3Bool::from_bool(self.context, *b).into()),

            Term::Var { name, sort } => {
                if let Some(var) = self.variables.get(name) {
                    return Ok(var.clone());
                }
                let fresh: Z3Expr = match sort {
                    Sort::Integer => Z3Int::new_const(self.context, name.clone()).into(),
                    Sort::Boolean => Z3Bool::new_const(self.context, name.clone()).into(),
                };
                self.variables.insert(name.clone(), fresh.clone());
                Ok(fresh)
            }

            Term::BinOp { op, left, right } => {
                let left_expr = self.term_to_z3(left)?;
                let right_expr = self.term_to_z3(right)?;
                match op {
                    BinOp::Add => {
                        let l = as_int(&left_expr, op)?;
                        let r = as_int(&right_expr, op)?;
                        Ok((l + r).into())
                    }
                    BinOp::Sub => {
                        let l = as_int(&left_expr, op)?;
                        let r = as_int(&right_expr, op)?;
                        Ok((l - r).into())
                    }
                    BinOp::Mul => {
                        let l = as_int(&left_expr, op)?;
                        let r = as_int(&right_expr, op)?;
                        Ok((l * r).into())
                    }
                    BinOp::Eq => Ok(left_expr._eq(&right_expr).into()),
                    BinOp::Lt => {
                        let l = as_int(&left_expr, op)?;
                        let r = as_int(&right_expr, op)?;
                        Ok(l.lt(&r).into())
                    }
                    BinOp::Gt => {
                        let l = as_int(&left_expr, op)?;
                        let r = as_int(&right_expr, op)?;
                        Ok(l.gt(&r).into())
                    }
                }
            }

            Term::Not(inner) => {
                let inner_expr = self.term_to_z3(inner)?;
                let b = inner_expr.as_bool().ok_or_else(|| {
                    EngineError::Solver("expected a boolean operand for negation".into())
                })?;
                Ok(b.not().into())
            }
        }
    }
}

fn as_int<'ctx>(expr: &Z3Expr<'ctx>, op: &BinOp) -> EngineResult<Z3Int<'ctx>> {
    expr.as_int().ok_or_else(|| {
        EngineError::Solver(format!("expected an integer operand for `{op}`"))
    })
}

impl Oracle for Z3Oracle<'_> {
    fn check(&mut self, formulas: &[Term]) -> EngineResult<SatResult> {
        // Queries are independent, so each check starts a fresh solver.
        self.solver = Solver::new(self.context);
        for formula in formulas {
            let expr = self.term_to_z3(&simplify(formula))?;
            let constraint = expr
                .as_bool()
                .ok_or_else(|| EngineError::Solver("expected a boolean constraint".into()))?;
            self.solver.assert(&constraint);
        }
        match self.solver.check() {
            z3::SatResult::Sat => Ok(SatResult::Sat),
            z3::SatResult::Unsat => Ok(SatResult::Unsat),
            z3::SatResult::Unknown => Err(EngineError::Solver("Z3 returned unknown".into())),
        }
    }

    fn model(&self) -> EngineResult<Model> {
        let model = self
            .solver
            .get_model()
            .ok_or_else(|| EngineError::Solver("no model available".into()))?;

        let mut values = Model::new();
        for (name, var) in &self.variables {
            if let Some(int_var) = var.as_int() {
                if let Some(value) = model.eval(&int_var, true).and_then(|v| v.as_i64()) {
                    values.insert(name.clone(), Literal::Integer(value));
                }
            } else if let Some(bool_var) = var.as_bool() {
                if let Some(value) = model.eval(&bool_var, true).and_then(|v| v.as_bool()) {
                    values.insert(name.clone(), Literal::Boolean(value));
                }
            }
        }
        Ok(values)
    }
}
