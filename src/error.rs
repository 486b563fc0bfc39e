// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::ast::Op;
use crate::symbols::Category;

/// Errors raised while constructing expression trees.
///
/// These indicate that the caller (normally the parser) broke a construction
/// contract. They are not user-facing diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    #[error("operator '{op}' expects {expected} argument(s), got {actual}")]
    Arity {
        op: Op,
        expected: usize,
        actual: usize,
    },

    #[error(
        "type mismatch: expected {expected}, found {}",
        .found.as_deref().unwrap_or("untyped expression")
    )]
    TypeMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
}

/// Errors raised by string-addressed symbol table operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolError {
    #[error("invalid symbol category '{0}'")]
    InvalidCategory(String),

    #[error("cannot register a {found} symbol in the {category} registry")]
    CategoryMismatch { category: Category, found: Category },
}
