// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;

/// A type as written in a schema property or a path's `is` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum TypeExpr {
    /// A built-in or schema name, e.g. `String` or `User`.
    Simple(String),

    /// `A | B | ...`
    Union(Vec<TypeExpr>),

    /// `Name<A, B, ...>`
    Generic { name: String, params: Vec<TypeExpr> },
}

impl TypeExpr {
    pub const ANY: &'static str = "Any";
    pub const OBJECT: &'static str = "Object";

    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple(name.into())
    }

    pub fn any() -> Self {
        Self::simple(Self::ANY)
    }

    pub fn union(types: Vec<TypeExpr>) -> Self {
        Self::Union(types)
    }

    pub fn generic(name: impl Into<String>, params: Vec<TypeExpr>) -> Self {
        Self::Generic {
            name: name.into(),
            params,
        }
    }

    /// Name of the type this expression is rooted at; unions have none.
    pub fn base_name(&self) -> Option<&str> {
        match self {
            Self::Simple(name) | Self::Generic { name, .. } => Some(name),
            Self::Union(_) => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(name) => f.write_str(name),
            Self::Union(types) => {
                for (idx, t) in types.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{t}")?;
                }
                Ok(())
            }
            Self::Generic { name, params } => {
                write!(f, "{name}<")?;
                for (idx, t) in params.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{t}")?;
                }
                f.write_str(">")
            }
        }
    }
}
