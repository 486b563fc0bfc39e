// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Navigation over `Snapshot`-typed expressions and coercion to plain values.
//!
//! A snapshot denotes a location in the data tree that has not been read yet.
//! It can be navigated with `child` and `parent`, and must be unwrapped with
//! `val()` before it is compared or combined with other values.

use crate::ast::Exp;
use crate::{AstError, SNAPSHOT};

/// Accessor for [`snapshot_child`]: a property name or a computed key.
#[derive(Debug, Clone, PartialEq)]
pub enum Accessor {
    Name(String),
    Exp(Exp),
}

impl From<&str> for Accessor {
    fn from(name: &str) -> Self {
        Accessor::Name(name.to_string())
    }
}

impl From<String> for Accessor {
    fn from(name: String) -> Self {
        Accessor::Name(name)
    }
}

impl From<Exp> for Accessor {
    fn from(exp: Exp) -> Self {
        Accessor::Exp(exp)
    }
}

impl Accessor {
    fn into_exp(self) -> Exp {
        match self {
            Accessor::Name(name) => Exp::string(name),
            Accessor::Exp(exp) => exp,
        }
    }
}

fn ensure_snapshot(base: &Exp) -> Result<(), AstError> {
    if base.value_type() == Some(SNAPSHOT) {
        Ok(())
    } else {
        Err(AstError::TypeMismatch {
            expected: SNAPSHOT.to_string(),
            found: base.value_type().map(str::to_string),
        })
    }
}

/// A variable bound to a snapshot, such as `data` or `newData`.
pub fn snapshot_variable(name: impl Into<String>) -> Exp {
    Exp::cast(Exp::variable(name), Some(SNAPSHOT))
}

/// `base.child(accessor)`, typed as a snapshot.
pub fn snapshot_child(base: &Exp, accessor: impl Into<Accessor>) -> Result<Exp, AstError> {
    ensure_snapshot(base)?;
    let child = Exp::call(base.clone(), "child", vec![accessor.into().into_exp()]);
    Ok(Exp::cast(child, Some(SNAPSHOT)))
}

/// `base.parent()`, typed as a snapshot.
pub fn snapshot_parent(base: &Exp) -> Result<Exp, AstError> {
    ensure_snapshot(base)?;
    Ok(Exp::cast(
        Exp::call(base.clone(), "parent", vec![]),
        Some(SNAPSHOT),
    ))
}

/// Unwrap a snapshot to its value with `val()`; other expressions pass through.
///
/// Applying this twice to a snapshot-typed expression wraps it twice, so
/// callers unwrap once per navigation chain.
pub fn ensure_value(exp: Exp) -> Exp {
    if exp.value_type() == Some(SNAPSHOT) {
        Exp::call(exp, "val", vec![])
    } else {
        exp
    }
}

/// Make `exp` usable as a condition.
///
/// A raw `val()` is not treated as a boolean by the target language, so it is
/// compared against `true`.
pub fn ensure_boolean(exp: Exp) -> Exp {
    let exp = ensure_value(exp);
    if exp.is_call_to("val") {
        Exp::eq(exp, Exp::boolean(true))
    } else {
        exp
    }
}
