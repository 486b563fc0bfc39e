// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

#[cfg(feature = "arc")]
use std::sync::Arc as Rc;

#[cfg(not(feature = "arc"))]
use std::rc::Rc;

pub mod ast;
mod derivation;
mod error;
pub mod logger;
pub mod normalize;
pub mod symbols;

pub use ast::{Exp, ExpKind, Literal, Method, Op, Ref, Reference, TypeExpr};
pub use error::{AstError, SymbolError};
pub use logger::{CollectingLogger, Diagnostic, Logger, Severity, StderrLogger};
pub use symbols::{Category, Function, PathRule, PathTemplate, Schema, Symbol, Symbols};

/// Value type attached to expressions that denote an unread data location.
pub const SNAPSHOT: &str = "Snapshot";
