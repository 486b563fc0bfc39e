// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::{bail, Result};
use indexmap::IndexMap;
use rules_ast::*;
use serde::{Deserialize, Serialize};
use test_generator::test_resources;

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct SchemaDecl {
    name: String,
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    properties: Vec<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Query {
    descendant: String,
    ancestor: String,
    want: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct TestCase {
    note: String,
    schemas: Vec<SchemaDecl>,
    queries: Vec<Query>,
    #[serde(default)]
    duplicates: usize,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct YamlTest {
    cases: Vec<TestCase>,
}

fn run_case(case: &TestCase) -> Result<()> {
    let logger = CollectingLogger::new();
    let mut symbols = Symbols::with_logger(Box::new(logger.clone()));

    for decl in &case.schemas {
        let properties: IndexMap<String, TypeExpr> = decl
            .properties
            .iter()
            .map(|p| (p.clone(), TypeExpr::any()))
            .collect();
        symbols.register_schema(
            &decl.name,
            decl.extends.as_deref(),
            properties,
            IndexMap::new(),
            vec![],
        );
    }

    for q in &case.queries {
        let got = symbols.is_derived_from(&q.descendant, &q.ancestor);
        if got != q.want {
            bail!(
                "is_derived_from({}, {}): expected {}, got {}",
                q.descendant,
                q.ancestor,
                q.want,
                got
            );
        }
    }

    let errors = logger.errors();
    if errors.len() != case.duplicates {
        bail!(
            "expected {} duplicate diagnostics, got {:?}",
            case.duplicates,
            errors
        );
    }
    Ok(())
}

fn yaml_test_impl(file: &str) -> Result<()> {
    println!("\nrunning {file}");

    let yaml_str = std::fs::read_to_string(file)?;
    let test: YamlTest = serde_yaml::from_str(&yaml_str)?;

    for case in &test.cases {
        print!("\ncase {} ", case.note);
        run_case(case)?;
        println!("passed");
    }

    println!("{} cases passed.", test.cases.len());
    Ok(())
}

fn yaml_test(file: &str) -> Result<()> {
    match yaml_test_impl(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            // If Err is returned, it doesn't always get printed by cargo test.
            // Therefore, panic with the error.
            panic!("{}", e);
        }
    }
}

#[test_resources("tests/derivation/cases/*.yaml")]
fn run(path: &str) {
    yaml_test(path).unwrap()
}
