// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Expression trees produced by the parser and consumed by the code generator.
//!
//! Every node is an [`Exp`]: a tagged [`ExpKind`] plus an optional value-type
//! annotation. Annotations are only ever attached by [`Exp::cast`] and the
//! helpers in [`crate::normalize`]; they let later stages decide whether a
//! value still needs to be unwrapped from a `Snapshot` before use.

use crate::*;

use core::{fmt, ops::Deref};

use lazy_static::lazy_static;
use regex::Regex;

mod ops;
mod types;


pub use ops::{and_array, flatten, left_associate, or_array, Op};
pub use types::TypeExpr;

#[cfg_attr(feature = "ast", derive(serde::Serialize))]
#[cfg_attr(feature = "ast", serde(transparent))]
pub struct NodeRef<T> {
    r: Rc<T>,
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        Self { r: self.r.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.r.as_ref().fmt(f)
    }
}

// Trees are immutable, so a shared child is indistinguishable from a copy.
// Equality is therefore structural rather than by address.
impl<T: PartialEq> PartialEq for NodeRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.r, &other.r) || self.r.as_ref() == other.r.as_ref()
    }
}

impl<T> Deref for NodeRef<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.r
    }
}

impl<T> AsRef<T> for NodeRef<T> {
    fn as_ref(&self) -> &T {
        self.deref()
    }
}

impl<T> NodeRef<T> {
    pub fn new(t: T) -> Self {
        Self { r: Rc::new(t) }
    }
}

impl<T> From<T> for NodeRef<T> {
    fn from(t: T) -> Self {
        Self::new(t)
    }
}

pub type Ref<T> = NodeRef<T>;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Array(Vec<Exp>),
}

/// Member access `base.accessor`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub struct Reference {
    pub base: Ref<Exp>,
    pub accessor: String,
}

/// A function or method body with its parameter names.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub struct Method {
    pub params: Vec<String>,
    pub body: Ref<Exp>,
}

impl Method {
    pub fn new(params: Vec<String>, body: Exp) -> Self {
        Self {
            params,
            body: Ref::new(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum ExpKind {
    Var { name: String },

    Null,

    Literal(Literal),

    Ref(Reference),

    // The callee of a call is always a member reference.
    Call { refr: Reference, args: Vec<Exp> },

    Op { op: Op, args: Vec<Exp> },

    Method(Method),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub struct Exp {
    kind: ExpKind,
    #[cfg_attr(feature = "ast", serde(skip_serializing_if = "Option::is_none"))]
    value_type: Option<String>,
}

impl From<ExpKind> for Exp {
    fn from(kind: ExpKind) -> Self {
        Self {
            kind,
            value_type: None,
        }
    }
}

lazy_static! {
    // Constant pattern; a failure here is a bug in the pattern itself.
    static ref IDENTIFIER: Regex =
        Regex::new(r"^[a-zA-Z_$][a-zA-Z0-9_]*$").expect("invalid identifier pattern");
}

/// Whether `text` can be used as a dotted member name in the target language.
pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}

impl Exp {
    pub const fn kind(&self) -> &ExpKind {
        &self.kind
    }

    pub fn value_type(&self) -> Option<&str> {
        self.value_type.as_deref()
    }

    pub fn into_kind(self) -> ExpKind {
        self.kind
    }

    pub fn variable(name: impl Into<String>) -> Self {
        ExpKind::Var { name: name.into() }.into()
    }

    pub fn null() -> Self {
        ExpKind::Null.into()
    }

    pub fn string(value: impl Into<String>) -> Self {
        ExpKind::Literal(Literal::String(value.into())).into()
    }

    pub fn number(value: f64) -> Self {
        ExpKind::Literal(Literal::Number(value)).into()
    }

    pub fn boolean(value: bool) -> Self {
        ExpKind::Literal(Literal::Boolean(value)).into()
    }

    pub fn array(items: Vec<Exp>) -> Self {
        ExpKind::Literal(Literal::Array(items)).into()
    }

    pub fn reference(base: Exp, accessor: impl Into<String>) -> Self {
        ExpKind::Ref(Reference {
            base: Ref::new(base),
            accessor: accessor.into(),
        })
        .into()
    }

    /// Call the member `accessor` of `base` with `args`.
    pub fn call(base: Exp, accessor: impl Into<String>, args: Vec<Exp>) -> Self {
        ExpKind::Call {
            refr: Reference {
                base: Ref::new(base),
                accessor: accessor.into(),
            },
            args,
        }
        .into()
    }

    pub fn method(params: Vec<String>, body: Exp) -> Self {
        ExpKind::Method(Method::new(params, body)).into()
    }

    /// Wrap `base` in the no-op `value` operator carrying `value_type`.
    pub fn cast(base: Exp, value_type: Option<&str>) -> Self {
        Self {
            kind: ExpKind::Op {
                op: Op::Value,
                args: vec![base],
            },
            value_type: value_type.map(str::to_string),
        }
    }

    pub fn is_call_to(&self, method: &str) -> bool {
        matches!(&self.kind, ExpKind::Call { refr, .. } if refr.accessor == method)
    }

    pub fn is_identifier_string(&self) -> bool {
        matches!(&self.kind, ExpKind::Literal(Literal::String(s)) if is_identifier(s))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ExpKind::Literal(Literal::Boolean(b)) => Some(b),
            _ => None,
        }
    }
}
