// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::ast::TypeExpr;
use crate::symbols::Symbols;

use std::collections::BTreeSet;

impl Symbols {
    /// Whether `descendant` is `ancestor` or reaches it through the chain of
    /// `derived_from` links.
    ///
    /// Unregistered names end the chain. A name seen twice means the chain is
    /// cyclic, and the walk answers false instead of looping; every step adds
    /// a new name to the visited set, so the walk is bounded by the number of
    /// registered schemas.
    pub fn is_derived_from(&self, descendant: &str, ancestor: &str) -> bool {
        let mut visited = BTreeSet::new();
        let mut current = descendant;
        loop {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current) {
                tracing::trace!(descendant, ancestor, "cycle in schema derivation");
                return false;
            }
            match self.schema(current) {
                Some(schema) => current = &schema.derived_from,
                None => return false,
            }
        }
    }

    /// Parents of `name`, nearest first.
    ///
    /// The chain ends with the first parent that is not registered (typically
    /// `Any` or `Object`), or stops before a name would repeat.
    pub fn ancestors<'a>(&'a self, name: &'a str) -> Vec<&'a str> {
        let mut chain = vec![];
        let mut visited = BTreeSet::from([name]);
        let mut current = self.schema(name);
        while let Some(schema) = current {
            let parent = schema.derived_from.as_str();
            if !visited.insert(parent) {
                break;
            }
            chain.push(parent);
            current = self.schema(parent);
        }
        chain
    }

    /// [`Symbols::is_derived_from`] for a type expression.
    ///
    /// A generic type derives from whatever its base schema derives from; a
    /// union derives from `ancestor` only if every member does.
    pub fn is_type_derived_from(&self, ty: &TypeExpr, ancestor: &str) -> bool {
        match ty {
            TypeExpr::Simple(name) | TypeExpr::Generic { name, .. } => {
                self.is_derived_from(name, ancestor)
            }
            TypeExpr::Union(types) => {
                !types.is_empty() && types.iter().all(|t| self.is_type_derived_from(t, ancestor))
            }
        }
    }
}
