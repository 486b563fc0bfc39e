// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Declarations collected during one compilation run.
//!
//! [`Symbols`] holds three registries: functions, path rules and schemas.
//! The parser registers declarations in source order; the code generator
//! reads them back (by name or in declaration order) once parsing is done.
//!
//! A name can be registered once per registry. Later registrations of the
//! same name are reported through the installed [`Logger`] and dropped, so a
//! single pass can surface every duplicate.

use crate::ast::{Exp, Method, Ref, TypeExpr};
use crate::logger::{Logger, StderrLogger};
use crate::SymbolError;

use core::{fmt, str::FromStr};

use indexmap::map::{Entry, IndexMap};

mod path;


pub use path::PathTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum Category {
    Functions,
    Paths,
    Schemas,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Functions => "functions",
            Category::Paths => "paths",
            Category::Schemas => "schema",
        }
    }

    const fn singular(self) -> &'static str {
        match self {
            Category::Functions => "function",
            Category::Paths => "path",
            Category::Schemas => "schema",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "functions" | "Functions" => Ok(Category::Functions),
            "paths" | "Paths" => Ok(Category::Paths),
            "schema" | "schemas" | "Schemas" => Ok(Category::Schemas),
            _ => Err(SymbolError::InvalidCategory(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub struct Function {
    pub params: Vec<String>,
    pub body: Ref<Exp>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
#[cfg_attr(feature = "ast", serde(rename_all = "camelCase"))]
pub struct PathRule {
    pub template: PathTemplate,
    pub is_type: TypeExpr,
    pub methods: IndexMap<String, Method>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
#[cfg_attr(feature = "ast", serde(rename_all = "camelCase"))]
pub struct Schema {
    /// Name of the parent schema. Not checked for existence.
    pub derived_from: String,
    pub properties: IndexMap<String, TypeExpr>,
    pub methods: IndexMap<String, Method>,
    /// Generic parameters, e.g. `K` and `V` in `type Pair<K, V>`.
    #[cfg_attr(feature = "ast", serde(skip_serializing_if = "Vec::is_empty"))]
    pub params: Vec<String>,
}

/// A record for any of the registries.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Function(Function),
    Path(PathRule),
    Schema(Schema),
}

impl Symbol {
    pub const fn category(&self) -> Category {
        match self {
            Symbol::Function(_) => Category::Functions,
            Symbol::Path(_) => Category::Paths,
            Symbol::Schema(_) => Category::Schemas,
        }
    }
}

/// Symbol table for a single compilation run.
pub struct Symbols {
    functions: IndexMap<String, Function>,
    paths: IndexMap<String, PathRule>,
    schemas: IndexMap<String, Schema>,
    logger: Box<dyn Logger>,
}

impl fmt::Debug for Symbols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbols")
            .field("functions", &self.functions)
            .field("paths", &self.paths)
            .field("schemas", &self.schemas)
            .finish_non_exhaustive()
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::new()
    }
}

// Inserts `record` unless `name` is taken, returning the record that ends up
// in the registry and whether it is the new one.
fn insert<'a, T>(
    map: &'a mut IndexMap<String, T>,
    logger: &dyn Logger,
    category: Category,
    name: &str,
    record: T,
) -> (&'a T, bool) {
    match map.entry(name.to_string()) {
        Entry::Occupied(e) => {
            tracing::warn!(%category, name, "duplicate definition ignored");
            logger.report_error(&format!(
                "Duplicate {} definition: {name}.",
                category.singular()
            ));
            (e.into_mut(), false)
        }
        Entry::Vacant(e) => {
            tracing::debug!(%category, name, "registered");
            (e.insert(record), true)
        }
    }
}

impl Symbols {
    /// Create an empty table reporting to standard error.
    pub fn new() -> Self {
        Self::with_logger(Box::new(StderrLogger))
    }

    pub fn with_logger(logger: Box<dyn Logger>) -> Self {
        Self {
            functions: IndexMap::new(),
            paths: IndexMap::new(),
            schemas: IndexMap::new(),
            logger,
        }
    }

    /// Replace the diagnostics sink. Intended to be called before any
    /// registration.
    pub fn set_logger(&mut self, logger: Box<dyn Logger>) {
        self.logger = logger;
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Register `symbol` under `name` in the registry for its kind.
    ///
    /// Returns false, after reporting a duplicate definition, if the name is
    /// already registered; the existing record is kept.
    pub fn register(&mut self, name: &str, symbol: Symbol) -> bool {
        let logger = self.logger.as_ref();
        match symbol {
            Symbol::Function(f) => {
                insert(&mut self.functions, logger, Category::Functions, name, f).1
            }
            Symbol::Path(p) => insert(&mut self.paths, logger, Category::Paths, name, p).1,
            Symbol::Schema(s) => insert(&mut self.schemas, logger, Category::Schemas, name, s).1,
        }
    }

    /// Register `symbol` in the registry named by `category`.
    pub fn register_in(
        &mut self,
        category: &str,
        name: &str,
        symbol: Symbol,
    ) -> Result<bool, SymbolError> {
        let category: Category = category.parse()?;
        if category != symbol.category() {
            return Err(SymbolError::CategoryMismatch {
                category,
                found: symbol.category(),
            });
        }
        Ok(self.register(name, symbol))
    }

    pub fn register_function(&mut self, name: &str, params: Vec<String>, body: Exp) -> &Function {
        let function = Function {
            params,
            body: Ref::new(body),
        };
        insert(
            &mut self.functions,
            self.logger.as_ref(),
            Category::Functions,
            name,
            function,
        )
        .0
    }

    /// Register a path rule keyed by its template. `is_type` defaults to `Any`.
    pub fn register_path(
        &mut self,
        template: PathTemplate,
        is_type: Option<TypeExpr>,
        methods: IndexMap<String, Method>,
    ) -> &PathRule {
        let key = template.key();
        let rule = PathRule {
            template,
            is_type: is_type.unwrap_or_else(TypeExpr::any),
            methods,
        };
        insert(
            &mut self.paths,
            self.logger.as_ref(),
            Category::Paths,
            &key,
            rule,
        )
        .0
    }

    /// Register a schema. Without an explicit parent, a schema derives from
    /// `Object` when it declares properties and from `Any` otherwise.
    pub fn register_schema(
        &mut self,
        name: &str,
        derived_from: Option<&str>,
        properties: IndexMap<String, TypeExpr>,
        methods: IndexMap<String, Method>,
        params: Vec<String>,
    ) -> &Schema {
        let derived_from = match derived_from {
            Some(parent) => parent.to_string(),
            None if properties.is_empty() => TypeExpr::ANY.to_string(),
            None => TypeExpr::OBJECT.to_string(),
        };
        let schema = Schema {
            derived_from,
            properties,
            methods,
            params,
        };
        insert(
            &mut self.schemas,
            self.logger.as_ref(),
            Category::Schemas,
            name,
            schema,
        )
        .0
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn path(&self, key: &str) -> Option<&PathRule> {
        self.paths.get(key)
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Functions in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = (&str, &Function)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Path rules in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = (&str, &PathRule)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Schemas in declaration order.
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains(&self, category: Category, name: &str) -> bool {
        match category {
            Category::Functions => self.functions.contains_key(name),
            Category::Paths => self.paths.contains_key(name),
            Category::Schemas => self.schemas.contains_key(name),
        }
    }

    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Functions => self.functions.len(),
            Category::Paths => self.paths.len(),
            Category::Schemas => self.schemas.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.paths.is_empty() && self.schemas.is_empty()
    }

    #[cfg(feature = "ast")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[cfg(feature = "ast")]
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(feature = "ast")]
impl serde::Serialize for Symbols {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Symbols", 3)?;
        s.serialize_field("functions", &self.functions)?;
        s.serialize_field("paths", &self.paths)?;
        s.serialize_field("schema", &self.schemas)?;
        s.end()
    }
}
