// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{Exp, ExpKind};
use crate::AstError;

use core::{fmt, str::FromStr};

/// Operators of the expression language, each with a fixed arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    // Unary
    Value,
    Neg,
    Not,

    // Binary
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,

    // Ternary
    Cond,
}

impl Op {
    pub const ALL: [Op; 17] = [
        Op::Value,
        Op::Neg,
        Op::Not,
        Op::Mul,
        Op::Div,
        Op::Mod,
        Op::Add,
        Op::Sub,
        Op::Lt,
        Op::Le,
        Op::Gt,
        Op::Ge,
        Op::Eq,
        Op::Ne,
        Op::And,
        Op::Or,
        Op::Cond,
    ];

    pub const fn arity(self) -> usize {
        match self {
            Op::Value | Op::Neg | Op::Not => 1,
            Op::Mul
            | Op::Div
            | Op::Mod
            | Op::Add
            | Op::Sub
            | Op::Lt
            | Op::Le
            | Op::Gt
            | Op::Ge
            | Op::Eq
            | Op::Ne
            | Op::And
            | Op::Or => 2,
            Op::Cond => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Op::Value => "value",
            Op::Neg => "neg",
            Op::Not => "!",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::Add => "+",
            Op::Sub => "-",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::And => "&&",
            Op::Or => "||",
            Op::Cond => "?:",
        }
    }

    /// Operators whose nested chains may be regrouped freely.
    pub const fn is_associative(self) -> bool {
        matches!(self, Op::Add | Op::Mul | Op::And | Op::Or)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Op {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Op::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| AstError::UnknownOperator(s.to_string()))
    }
}

#[cfg(feature = "ast")]
impl serde::Serialize for Op {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Exp {
    /// Apply `op` to `args`, which must contain exactly `op.arity()` operands.
    pub fn operator(op: Op, args: Vec<Exp>) -> Result<Exp, AstError> {
        if args.len() != op.arity() {
            return Err(AstError::Arity {
                op,
                expected: op.arity(),
                actual: args.len(),
            });
        }
        Ok(ExpKind::Op { op, args }.into())
    }

    /// Like [`Exp::operator`], with the operator given by its spelling.
    pub fn operator_named(name: &str, args: Vec<Exp>) -> Result<Exp, AstError> {
        Exp::operator(name.parse()?, args)
    }

    fn unary(op: Op, a: Exp) -> Exp {
        ExpKind::Op { op, args: vec![a] }.into()
    }

    fn binary(op: Op, a: Exp, b: Exp) -> Exp {
        ExpKind::Op { op, args: vec![a, b] }.into()
    }

    pub fn neg(a: Exp) -> Exp {
        Exp::unary(Op::Neg, a)
    }

    pub fn not(a: Exp) -> Exp {
        Exp::unary(Op::Not, a)
    }

    pub fn mul(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Mul, a, b)
    }

    pub fn div(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Div, a, b)
    }

    pub fn rem(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Mod, a, b)
    }

    pub fn add(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Add, a, b)
    }

    pub fn sub(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Sub, a, b)
    }

    pub fn lt(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Lt, a, b)
    }

    pub fn le(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Le, a, b)
    }

    pub fn gt(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Gt, a, b)
    }

    pub fn ge(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Ge, a, b)
    }

    pub fn eq(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Eq, a, b)
    }

    pub fn ne(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Ne, a, b)
    }

    pub fn and(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::And, a, b)
    }

    pub fn or(a: Exp, b: Exp) -> Exp {
        Exp::binary(Op::Or, a, b)
    }

    pub fn ternary(cond: Exp, then: Exp, otherwise: Exp) -> Exp {
        ExpKind::Op {
            op: Op::Cond,
            args: vec![cond, then, otherwise],
        }
        .into()
    }

    pub fn is_op(&self, op: Op) -> bool {
        matches!(self.kind(), ExpKind::Op { op: o, .. } if *o == op)
    }
}

/// Reduce `exps` into a left-nested chain of the binary operator `op`.
///
/// An empty sequence yields `identity` and a single element yields itself.
/// Elements structurally equal to `identity` are dropped before combining, so
/// `[true, a, true, b]` folded with `&&` becomes `a && b`.
pub fn left_associate(
    op: Op,
    identity: Exp,
    exps: impl IntoIterator<Item = Exp>,
) -> Result<Exp, AstError> {
    if op.arity() != 2 {
        return Err(AstError::Arity {
            op,
            expected: 2,
            actual: op.arity(),
        });
    }
    Ok(fold(op, identity, None, exps))
}

fn fold(
    op: Op,
    identity: Exp,
    zero: Option<&Exp>,
    exps: impl IntoIterator<Item = Exp>,
) -> Exp {
    let mut result: Option<Exp> = None;
    for exp in exps {
        if exp == identity {
            continue;
        }
        if zero.is_some_and(|z| *z == exp) {
            return exp;
        }
        result = Some(match result {
            Some(lhs) => Exp::binary(op, lhs, exp),
            None => exp,
        });
    }
    result.unwrap_or(identity)
}

/// Conjunction of `exps`: drops `true` operands and collapses to `false` if
/// any operand is the literal `false`.
pub fn and_array(exps: impl IntoIterator<Item = Exp>) -> Exp {
    fold(Op::And, Exp::boolean(true), Some(&Exp::boolean(false)), exps)
}

/// Disjunction of `exps`: drops `false` operands and collapses to `true` if
/// any operand is the literal `true`.
pub fn or_array(exps: impl IntoIterator<Item = Exp>) -> Exp {
    fold(Op::Or, Exp::boolean(false), Some(&Exp::boolean(true)), exps)
}

/// Operands of the chain of `op` rooted at `exp`, in left-to-right order.
///
/// Only associative operators are expanded; for any other operator the
/// result is `[exp]`.
pub fn flatten(op: Op, exp: &Exp) -> Vec<&Exp> {
    let mut flat = vec![];
    collect_operands(op, exp, &mut flat);
    flat
}

fn collect_operands<'a>(op: Op, exp: &'a Exp, flat: &mut Vec<&'a Exp>) {
    match exp.kind() {
        ExpKind::Op { op: o, args }
            if *o == op && op.is_associative() && exp.value_type().is_none() =>
        {
            for arg in args {
                collect_operands(op, arg, flat);
            }
        }
        _ => flat.push(exp),
    }
}
