//! Тесты проверок сохраненных запросов

use crate::common::{Error, Result, Role};
use crate::store::queries::{check_global, check_ownership, validate};
use crate::store::StoredQueryInput;

fn input() -> StoredQueryInput {
    StoredQueryInput {
        advisories: true,
        global: false,
        name: "open reds".to_string(),
        description: None,
        query: "$tlp red tlp = $state review workflow = and".to_string(),
        num: 0,
        columns: vec!["id".to_string(), "title".to_string(), "state".to_string()],
        orders: Some(vec!["-version".to_string()]),
    }
}

#[test]
fn test_valid_input_passes() -> Result<()> {
    validate(&input())
}

#[test]
fn test_blank_name_is_rejected() {
    let mut bad = input();
    bad.name = "  ".to_string();
    let err = validate(&bad).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_broken_query_is_rejected() {
    let mut bad = input();
    bad.query = "$tlp red tlp".to_string();
    let err = validate(&bad).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_state_field_requires_advisory_schema() {
    let mut bad = input();
    bad.advisories = false;
    let err = validate(&bad).unwrap_err();
    assert!(matches!(err, Error::UnknownField { .. }));
}

#[test]
fn test_unknown_order_is_rejected() {
    let mut bad = input();
    bad.orders = Some(vec!["-secret".to_string()]);
    let err = validate(&bad).unwrap_err();
    assert!(matches!(err, Error::UnknownField { .. }));
}

#[test]
fn test_global_requires_admin() {
    assert!(check_global(true, &[Role::Editor]).is_err());
    assert!(check_global(true, &[Role::Admin]).is_ok());
    assert!(check_global(false, &[]).is_ok());
}

#[test]
fn test_ownership_rules() {
    // Собственный локальный запрос
    assert!(check_ownership("alice", &[], "alice", false).is_ok());
    // Чужой локальный запрос
    assert!(check_ownership("alice", &[], "bob", false).is_err());
    // Глобальный запрос: только администратор
    assert!(check_ownership("alice", &[Role::Admin], "bob", true).is_ok());
    assert!(check_ownership("alice", &[Role::Editor], "alice", true).is_err());
}
