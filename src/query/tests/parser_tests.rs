//! Тесты для стекового парсера языка фильтров

use crate::common::Result;
use crate::query::{parse, CompareOp, Expr, Value};

#[test]
fn test_parse_true() -> Result<()> {
    let expr = parse("true")?;
    assert_eq!(expr, Expr::Literal(Value::Bool(true)));
    Ok(())
}

#[test]
fn test_parse_comparison_with_cast() -> Result<()> {
    let expr = parse("$id 42 int =")?;

    match expr {
        Expr::Compare { op, left, right } => {
            assert_eq!(op, CompareOp::Eq);
            assert_eq!(*left, Expr::Field("id".to_string()));
            assert_eq!(*right, Expr::Literal(Value::Int(42)));
        }
        _ => panic!("Ожидалось сравнение"),
    }
    Ok(())
}

#[test]
fn test_parse_logical_combination() -> Result<()> {
    let expr = parse("$publisher ACME = $id 7 int != and")?;

    match expr {
        Expr::And(left, right) => {
            assert!(matches!(*left, Expr::Compare { .. }));
            assert!(matches!(*right, Expr::Compare { .. }));
        }
        _ => panic!("Ожидалось логическое И"),
    }
    Ok(())
}

#[test]
fn test_parse_not() -> Result<()> {
    let expr = parse("$title abc = not")?;
    assert!(matches!(expr, Expr::Not(_)));
    Ok(())
}

#[test]
fn test_parse_is_deterministic() -> Result<()> {
    let text = "$publisher ACME = $tlp red tlp = and not";
    assert_eq!(parse(text)?, parse(text)?);
    Ok(())
}

#[test]
fn test_parse_time_cast() -> Result<()> {
    let expr = parse("$current_release_date 2024-03-01 time >=")?;

    match expr {
        Expr::Compare { op, right, .. } => {
            assert_eq!(op, CompareOp::Ge);
            assert!(matches!(*right, Expr::Literal(Value::Time(_))));
        }
        _ => panic!("Ожидалось сравнение"),
    }
    Ok(())
}

#[test]
fn test_parse_workflow_and_tlp_casts() -> Result<()> {
    let expr = parse("$state review workflow = $tlp amber tlp = or")?;

    match expr {
        Expr::Or(left, right) => {
            match *left {
                Expr::Compare { ref right, .. } => {
                    assert_eq!(
                        **right,
                        Expr::Literal(Value::Workflow("review".to_string()))
                    );
                }
                _ => panic!("Ожидалось сравнение состояния"),
            }
            assert!(matches!(*right, Expr::Compare { .. }));
        }
        _ => panic!("Ожидалось логическое ИЛИ"),
    }
    Ok(())
}

#[test]
fn test_stack_underflow() {
    let err = parse("$id =").unwrap_err();
    assert!(err.to_string().contains("too few operands"));
}

#[test]
fn test_leftover_operands() {
    let err = parse("$id 42 int = extra").unwrap_err();
    assert!(err.to_string().contains("left on the stack"));
}

#[test]
fn test_empty_expression() {
    let err = parse("").unwrap_err();
    assert!(err.to_string().contains("empty expression"));
}

#[test]
fn test_root_must_be_boolean() {
    let err = parse("42 int").unwrap_err();
    assert!(err.to_string().contains("not a condition"));
}

#[test]
fn test_bad_int_literal() {
    let err = parse("$id abc int =").unwrap_err();
    assert!(err.to_string().contains("cannot parse 'abc' as int"));
}

#[test]
fn test_bad_tlp_literal() {
    let err = parse("$tlp purple tlp =").unwrap_err();
    assert!(err.to_string().contains("cannot parse 'purple' as tlp"));
}

#[test]
fn test_cast_needs_untyped_literal() {
    let err = parse("$id 1 int int =").unwrap_err();
    assert!(err.to_string().contains("applies to an untyped literal"));
}

#[test]
fn test_logical_needs_boolean_operands() {
    let err = parse("$id 42 int and").unwrap_err();
    assert!(err.to_string().contains("boolean operands"));
}
