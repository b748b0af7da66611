//! Symbolic values and the term language beneath them
//!
//! A [`SymValue`] wraps a [`Term`] together with its [`Sort`]. Operations
//! compose terms structurally and run them through
//! [`simplify`](crate::simplify::simplify), so an expression built only
//! from concrete literals folds back to a literal and never reaches the
//! constraint oracle.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::simplify::simplify;

/// The two value sorts the engine models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sort {
    /// Unbounded mathematical integers
    Integer,
    /// Truth values
    Boolean,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Integer => write!(f, "integer"),
            Sort::Boolean => write!(f, "boolean"),
        }
    }
}

impl FromStr for Sort {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" | "integer" => Ok(Sort::Integer),
            "bool" | "boolean" => Ok(Sort::Boolean),
            other => Err(EngineError::Config(format!(
                "unsupported parameter sort: `{other}` (expected int or bool)"
            ))),
        }
    }
}

/// A concrete constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// Integer constant
    Integer(i64),
    /// Boolean constant
    Boolean(bool),
}

impl Literal {
    /// Sort of this constant.
    pub fn sort(&self) -> Sort {
        match self {
            Literal::Integer(_) => Sort::Integer,
            Literal::Boolean(_) => Sort::Boolean,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Integer(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

/// Binary operators of the term language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Integer addition
    Add,
    /// Integer subtraction
    Sub,
    /// Integer multiplication
    Mul,
    /// Equality over matching sorts
    Eq,
    /// Integer less-than
    Lt,
    /// Integer greater-than
    Gt,
}

impl BinOp {
    /// Operator symbol used in rendered terms and diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Eq => "==",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
        }
    }

    /// Sort of the value the operator produces.
    pub fn result_sort(&self) -> Sort {
        match self {
            BinOp::Add | BinOp::Sub | BinOp::Mul => Sort::Integer,
            BinOp::Eq | BinOp::Lt | BinOp::Gt => Sort::Boolean,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A symbolic expression tree.
///
/// Terms are plain data: building one never consults an oracle. Sort
/// discipline is enforced one level up by [`SymValue`]; a `Term` obtained
/// from a `SymValue` is always well sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A concrete constant
    Literal(Literal),
    /// A named free variable
    Var {
        /// Variable name, unique per exploration
        name: String,
        /// Declared sort
        sort: Sort,
    },
    /// A binary application
    BinOp {
        /// The operator
        op: BinOp,
        /// Left operand
        left: Box<Term>,
        /// Right operand
        right: Box<Term>,
    },
    /// Boolean negation
    Not(Box<Term>),
}

impl Term {
    /// A free variable term.
    pub fn var(name: impl Into<String>, sort: Sort) -> Term {
        Term::Var {
            name: name.into(),
            sort,
        }
    }

    /// Sort of the value this term denotes.
    pub fn sort(&self) -> Sort {
        match self {
            Term::Literal(l) => l.sort(),
            Term::Var { sort, .. } => *sort,
            Term::BinOp { op, .. } => op.result_sort(),
            Term::Not(_) => Sort::Boolean,
        }
    }

    /// The constant this term denotes, if it is one.
    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Term::Literal(l) => Some(*l),
            _ => None,
        }
    }

    /// Logical negation of a boolean term, with double negation and
    /// constant negation collapsed. Only meaningful for boolean-sorted
    /// terms.
    pub fn negated(self) -> Term {
        match self {
            Term::Not(inner) => *inner,
            Term::Literal(Literal::Boolean(b)) => Term::Literal(Literal::Boolean(!b)),
            other => Term::Not(Box::new(other)),
        }
    }

    /// Collect every free variable in the term into `out`, keyed by name.
    pub fn collect_vars(&self, out: &mut BTreeMap<String, Sort>) {
        match self {
            Term::Literal(_) => {}
            Term::Var { name, sort } => {
                out.insert(name.clone(), *sort);
            }
            Term::BinOp { left, right, .. } => {
                left.collect_vars(out);
                right.collect_vars(out);
            }
            Term::Not(inner) => inner.collect_vars(out),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Literal(l) => write!(f, "{l}"),
            Term::Var { name, .. } => write!(f, "{name}"),
            Term::BinOp { op, left, right } => write!(f, "({left} {op} {right})"),
            Term::Not(inner) => write!(f, "!{inner}"),
        }
    }
}

/// An integer-sorted symbolic value.
#[derive(Debug, Clone)]
pub struct IntValue {
    term: Term,
}

impl IntValue {
    pub(crate) fn new(term: Term) -> Self {
        debug_assert_eq!(term.sort(), Sort::Integer);
        IntValue { term }
    }

    /// The underlying term.
    pub fn term(&self) -> &Term {
        &self.term
    }
}

/// A boolean-sorted symbolic value.
#[derive(Debug, Clone)]
pub struct BoolValue {
    term: Term,
}

impl BoolValue {
    pub(crate) fn new(term: Term) -> Self {
        debug_assert_eq!(term.sort(), Sort::Boolean);
        BoolValue { term }
    }

    /// The underlying term.
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// The negation of this value.
    pub fn not(&self) -> BoolValue {
        BoolValue::new(self.term.clone().negated())
    }
}

/// A sort-tagged symbolic value, the type target functions compute with.
///
/// All operations return `EngineResult` so a sort violation surfaces at
/// the call site ([`EngineError::SortMismatch`] for binary operators,
/// [`EngineError::ExpectedBoolean`] for negation) instead of reaching the
/// oracle as a malformed query.
#[derive(Debug, Clone)]
pub enum SymValue {
    /// Integer-sorted value
    Integer(IntValue),
    /// Boolean-sorted value
    Boolean(BoolValue),
}

impl SymValue {
    /// A fresh free variable of the given sort.
    pub fn var(name: impl Into<String>, sort: Sort) -> SymValue {
        SymValue::from_term(Term::var(name, sort))
    }

    /// Sort of this value.
    pub fn sort(&self) -> Sort {
        match self {
            SymValue::Integer(_) => Sort::Integer,
            SymValue::Boolean(_) => Sort::Boolean,
        }
    }

    /// The underlying term.
    pub fn term(&self) -> &Term {
        match self {
            SymValue::Integer(v) => v.term(),
            SymValue::Boolean(v) => v.term(),
        }
    }

    fn into_term(self) -> Term {
        match self {
            SymValue::Integer(v) => v.term,
            SymValue::Boolean(v) => v.term,
        }
    }

    pub(crate) fn from_term(term: Term) -> SymValue {
        match term.sort() {
            Sort::Integer => SymValue::Integer(IntValue::new(term)),
            Sort::Boolean => SymValue::Boolean(BoolValue::new(term)),
        }
    }

    /// `self + other` over integers.
    pub fn add(&self, other: impl Into<SymValue>) -> EngineResult<SymValue> {
        self.binary(BinOp::Add, other.into())
    }

    /// `self - other` over integers.
    pub fn sub(&self, other: impl Into<SymValue>) -> EngineResult<SymValue> {
        self.binary(BinOp::Sub, other.into())
    }

    /// `self * other` over integers.
    pub fn mul(&self, other: impl Into<SymValue>) -> EngineResult<SymValue> {
        self.binary(BinOp::Mul, other.into())
    }

    /// `self == other`; both sides must share a sort.
    pub fn eq(&self, other: impl Into<SymValue>) -> EngineResult<SymValue> {
        self.binary(BinOp::Eq, other.into())
    }

    /// `self != other`, the negation of [`eq`](SymValue::eq).
    pub fn ne(&self, other: impl Into<SymValue>) -> EngineResult<SymValue> {
        self.eq(other)?.not()
    }

    /// `self < other` over integers.
    pub fn lt(&self, other: impl Into<SymValue>) -> EngineResult<SymValue> {
        self.binary(BinOp::Lt, other.into())
    }

    /// `self > other` over integers.
    pub fn gt(&self, other: impl Into<SymValue>) -> EngineResult<SymValue> {
        self.binary(BinOp::Gt, other.into())
    }

    /// Logical negation; `self` must be boolean sorted.
    pub fn not(&self) -> EngineResult<SymValue> {
        match self {
            SymValue::Boolean(b) => Ok(SymValue::Boolean(b.not())),
            SymValue::Integer(_) => Err(EngineError::ExpectedBoolean {
                context: "negation",
                found: Sort::Integer,
            }),
        }
    }

    fn binary(&self, op: BinOp, other: SymValue) -> EngineResult<SymValue> {
        let sorts_ok = match op {
            BinOp::Eq => self.sort() == other.sort(),
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Lt | BinOp::Gt => {
                self.sort() == Sort::Integer && other.sort() == Sort::Integer
            }
        };
        if !sorts_ok {
            return Err(EngineError::SortMismatch {
                op: op.symbol(),
                left: self.sort(),
                right: other.sort(),
            });
        }
        let term = simplify(&Term::BinOp {
            op,
            left: Box::new(self.term().clone()),
            right: Box::new(other.into_term()),
        });
        Ok(SymValue::from_term(term))
    }
}

impl fmt::Display for SymValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term())
    }
}

impl From<i64> for SymValue {
    fn from(n: i64) -> Self {
        SymValue::from_term(Term::Literal(Literal::Integer(n)))
    }
}

impl From<bool> for SymValue {
    fn from(b: bool) -> Self {
        SymValue::from_term(Term::Literal(Literal::Boolean(b)))
    }
}

impl From<Literal> for SymValue {
    fn from(l: Literal) -> Self {
        SymValue::from_term(Term::Literal(l))
    }
}

impl From<&SymValue> for SymValue {
    fn from(v: &SymValue) -> Self {
        v.clone()
    }
}
