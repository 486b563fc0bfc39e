// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Sinks for compile diagnostics.
//!
//! Diagnostics never change control flow: the symbol table reports through
//! the installed [`Logger`] and carries on.

use core::fmt;
use std::sync::{Arc, Mutex};

/// Destination for diagnostics reported during a compilation run.
pub trait Logger: Send + Sync {
    fn report_error(&self, message: &str);
    fn report_warning(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Writes diagnostics to the process's standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogger;

impl Logger for StderrLogger {
    fn report_error(&self, message: &str) {
        std::eprintln!("{}: {message}", Severity::Error);
    }

    fn report_warning(&self, message: &str) {
        std::eprintln!("{}: {message}", Severity::Warning);
    }
}

/// Records diagnostics in memory.
///
/// Clones share the same buffer, so a caller can keep one handle while the
/// symbol table owns another.
#[derive(Debug, Default, Clone)]
pub struct CollectingLogger {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, severity: Severity, message: &str) {
        // A poisoned buffer still holds every diagnostic pushed before the panic.
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push(Diagnostic {
            severity,
            message: message.to_string(),
        });
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn errors(&self) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.severity == Severity::Warning)
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}

impl Logger for CollectingLogger {
    fn report_error(&self, message: &str) {
        self.push(Severity::Error, message);
    }

    fn report_warning(&self, message: &str) {
        self.push(Severity::Warning, message);
    }
}
