// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Builds declarations the way a parser drives this crate, then reads them
// back the way a code generator would.

use anyhow::Result;
use indexmap::IndexMap;
use rules_ast::ast::{and_array, flatten};
use rules_ast::{normalize::*, *};

fn methods(entries: Vec<(&str, Method)>) -> IndexMap<String, Method> {
    entries
        .into_iter()
        .map(|(name, m)| (name.to_string(), m))
        .collect()
}

// `auth != null && data.child('owner').val() == auth.uid`
fn owner_check() -> Result<Exp> {
    let data = snapshot_variable("data");
    let owner = ensure_value(snapshot_child(&data, "owner")?);
    let auth = Exp::variable("auth");
    Ok(and_array(vec![
        Exp::ne(auth.clone(), Exp::null()),
        Exp::eq(owner, Exp::reference(auth, "uid")),
    ]))
}

fn build() -> Result<(Symbols, CollectingLogger)> {
    let logger = CollectingLogger::new();
    let mut symbols = Symbols::with_logger(Box::new(logger.clone()));

    symbols.register_function("isOwner", vec![], owner_check()?);

    let mut properties = IndexMap::new();
    properties.insert("text".to_string(), TypeExpr::simple("String"));
    properties.insert(
        "owner".to_string(),
        TypeExpr::union(vec![TypeExpr::simple("String"), TypeExpr::simple("Null")]),
    );
    symbols.register_schema(
        "Message",
        None,
        properties,
        methods(vec![(
            "validate",
            Method::new(
                vec!["this".to_string()],
                Exp::lt(
                    Exp::reference(Exp::reference(Exp::variable("this"), "text"), "length"),
                    Exp::number(100.0),
                ),
            ),
        )]),
        vec![],
    );

    let read = Method::new(vec![], Exp::ne(Exp::variable("auth"), Exp::null()));
    let write = Method::new(
        vec![],
        Exp::call(Exp::variable("this"), "isOwner", vec![]),
    );
    symbols.register_path(
        PathTemplate::parse("/messages/{id}"),
        Some(TypeExpr::simple("Message")),
        methods(vec![("read", read), ("write", write)]),
    );

    Ok((symbols, logger))
}

#[test]
fn declarations_are_readable_in_order() -> Result<()> {
    let (symbols, logger) = build()?;
    assert!(logger.diagnostics().is_empty());

    let (key, rule) = symbols.paths().next().expect("one path rule");
    assert_eq!(key, "/messages/$id");
    assert_eq!(rule.template.captures().collect::<Vec<_>>(), ["$id"]);
    assert_eq!(
        rule.methods.keys().map(String::as_str).collect::<Vec<_>>(),
        ["read", "write"]
    );
    assert!(symbols.is_type_derived_from(&rule.is_type, "Object"));

    let schema = symbols.schema("Message").expect("Message schema");
    assert_eq!(schema.derived_from, "Object");
    assert_eq!(schema.properties["owner"].to_string(), "String | Null");
    Ok(())
}

#[test]
fn function_body_unwraps_snapshot() -> Result<()> {
    let (symbols, _) = build()?;
    let f = symbols.function("isOwner").expect("isOwner");

    let operands = flatten(Op::And, &f.body);
    assert_eq!(operands.len(), 2);
    let ExpKind::Op { op: Op::Eq, args } = operands[1].kind() else {
        panic!("expected an equality, got {:?}", operands[1]);
    };
    assert!(args[0].is_call_to("val"));
    assert_eq!(args[0].value_type(), None);
    Ok(())
}

#[test]
fn snapshot_chain_to_condition() -> Result<()> {
    // `newData.parent().child('flags').child($key)` used as a condition.
    let new_data = snapshot_variable("newData");
    let flag = snapshot_child(
        &snapshot_child(&snapshot_parent(&new_data)?, "flags")?,
        Exp::variable("$key"),
    )?;
    assert_eq!(flag.value_type(), Some("Snapshot"));

    let cond = ensure_boolean(flag.clone());
    assert_eq!(
        cond,
        Exp::eq(Exp::call(flag, "val", vec![]), Exp::boolean(true))
    );

    // Once unwrapped, further navigation is a contract violation.
    let value = ensure_value(snapshot_variable("data"));
    assert!(matches!(
        snapshot_child(&value, "x"),
        Err(AstError::TypeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn rebuilding_reports_every_duplicate() -> Result<()> {
    let (mut symbols, logger) = build()?;
    symbols.register_function("isOwner", vec!["uid".to_string()], Exp::boolean(false));
    symbols.register_schema("Message", Some("Any"), IndexMap::new(), IndexMap::new(), vec![]);
    symbols.register_path(PathTemplate::parse("/messages/$id"), None, IndexMap::new());

    let messages: Vec<String> = logger.errors().into_iter().map(|d| d.message).collect();
    assert_eq!(
        messages,
        [
            "Duplicate function definition: isOwner.",
            "Duplicate schema definition: Message.",
            "Duplicate path definition: /messages/$id.",
        ]
    );
    assert_eq!(symbols.function("isOwner").map(|f| f.params.len()), Some(0));
    assert_eq!(
        symbols.schema("Message").map(|s| s.derived_from.as_str()),
        Some("Object")
    );
    Ok(())
}
