//! Тесты для области видимости по меткам конфиденциальности

use crate::access::{PublisherTlps, TlpScope};
use crate::common::{Result, Tlp};
use crate::compiler::{where_clause, AliasTable};
use crate::query::parse;

fn scope(entries: Vec<PublisherTlps>) -> TlpScope {
    TlpScope::new(entries)
}

#[test]
fn test_empty_scope_is_unrestricted() {
    let scope = TlpScope::default();
    assert!(scope.is_unrestricted());
    assert_eq!(scope.as_conditions(), "true");
}

#[test]
fn test_allowed_any_publisher() {
    let scope = scope(vec![PublisherTlps {
        publisher: None,
        tlps: vec![Tlp::White, Tlp::Green],
    }]);

    assert!(scope.allowed("ACME", Tlp::White));
    assert!(scope.allowed("Other", Tlp::Green));
    assert!(!scope.allowed("ACME", Tlp::Red));
}

#[test]
fn test_allowed_publisher_exception() {
    let scope = scope(vec![
        PublisherTlps {
            publisher: None,
            tlps: vec![Tlp::White],
        },
        PublisherTlps {
            publisher: Some("ACME".to_string()),
            tlps: vec![Tlp::Red],
        },
    ]);

    assert!(scope.allowed("ACME", Tlp::Red));
    assert!(!scope.allowed("Other", Tlp::Red));
    assert!(scope.allowed("Other", Tlp::White));
}

#[test]
fn test_conditions_parse_through_the_same_grammar() -> Result<()> {
    let scope = scope(vec![
        PublisherTlps {
            publisher: None,
            tlps: vec![Tlp::White, Tlp::Green],
        },
        PublisherTlps {
            publisher: Some("ACME GmbH".to_string()),
            tlps: vec![Tlp::Amber, Tlp::Red],
        },
    ]);

    let expr = parse(&scope.as_conditions())?;
    let clause = where_clause(&expr, &AliasTable::documents())?;

    assert_eq!(
        clause.sql,
        "((docs.tlp = $1 OR docs.tlp = $2) OR \
         (docs.publisher = $3 AND (docs.tlp = $4 OR docs.tlp = $5)))"
    );
    assert_eq!(clause.params.len(), 5);
    Ok(())
}

#[test]
fn test_conditions_single_label() {
    let scope = scope(vec![PublisherTlps {
        publisher: None,
        tlps: vec![Tlp::White],
    }]);
    assert_eq!(scope.as_conditions(), "$tlp white tlp =");
}

#[test]
fn test_scope_without_labels_sees_nothing() {
    let scope = scope(vec![PublisherTlps {
        publisher: Some("ACME".to_string()),
        tlps: vec![],
    }]);
    assert_eq!(scope.as_conditions(), "false");
}

#[test]
fn test_publisher_quoting_survives_roundtrip() -> Result<()> {
    let scope = scope(vec![PublisherTlps {
        publisher: Some(r#"Quote "Inc" \ Co"#.to_string()),
        tlps: vec![Tlp::White],
    }]);

    // Экранированный издатель обязан пройти через лексер без потерь
    let expr = parse(&scope.as_conditions())?;
    let clause = where_clause(&expr, &AliasTable::documents())?;
    assert_eq!(
        clause.params[0],
        crate::query::Value::String(r#"Quote "Inc" \ Co"#.to_string())
    );
    Ok(())
}
