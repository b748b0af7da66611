//! Term simplification
//!
//! Constant folding and a few algebraic identities, applied every time an
//! operation composes a new term. This is what gives concrete executions
//! their fast path: a condition over folded literals decides itself
//! without an oracle query.

use crate::symbolic::{BinOp, Literal, Term};

/// Simplify a term bottom-up.
pub fn simplify(term: &Term) -> Term {
    match term {
        Term::Literal(_) | Term::Var { .. } => term.clone(),
        Term::BinOp { op, left, right } => {
            let left = simplify(left);
            let right = simplify(right);
            simplify_binop(*op, left, right)
        }
        Term::Not(inner) => simplify(inner).negated(),
    }
}

fn simplify_binop(op: BinOp, left: Term, right: Term) -> Term {
    if let (Some(l), Some(r)) = (left.as_literal(), right.as_literal()) {
        if let Some(folded) = fold_binop(op, l, r) {
            return Term::Literal(folded);
        }
    }

    match op {
        BinOp::Add => {
            if is_int(&left, 0) {
                return right;
            }
            if is_int(&right, 0) {
                return left;
            }
        }
        BinOp::Sub => {
            if is_int(&right, 0) {
                return left;
            }
            if left == right {
                return Term::Literal(Literal::Integer(0));
            }
        }
        BinOp::Mul => {
            if is_int(&left, 0) || is_int(&right, 0) {
                return Term::Literal(Literal::Integer(0));
            }
            if is_int(&left, 1) {
                return right;
            }
            if is_int(&right, 1) {
                return left;
            }
        }
        BinOp::Eq => {
            if left == right {
                return Term::Literal(Literal::Boolean(true));
            }
        }
        BinOp::Lt | BinOp::Gt => {
            if left == right {
                return Term::Literal(Literal::Boolean(false));
            }
        }
    }

    Term::BinOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Apply a binary operator to two constants. `None` when the operand
/// sorts do not fit the operator.
pub(crate) fn fold_binop(op: BinOp, left: Literal, right: Literal) -> Option<Literal> {
    use Literal::{Boolean, Integer};
    match (op, left, right) {
        (BinOp::Add, Integer(a), Integer(b)) => Some(Integer(a.wrapping_add(b))),
        (BinOp::Sub, Integer(a), Integer(b)) => Some(Integer(a.wrapping_sub(b))),
        (BinOp::Mul, Integer(a), Integer(b)) => Some(Integer(a.wrapping_mul(b))),
        (BinOp::Eq, Integer(a), Integer(b)) => Some(Boolean(a == b)),
        (BinOp::Eq, Boolean(a), Boolean(b)) => Some(Boolean(a == b)),
        (BinOp::Lt, Integer(a), Integer(b)) => Some(Boolean(a < b)),
        (BinOp::Gt, Integer(a), Integer(b)) => Some(Boolean(a > b)),
        _ => None,
    }
}

fn is_int(term: &Term, value: i64) -> bool {
    term.as_literal() == Some(Literal::Integer(value))
}
