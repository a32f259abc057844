//! Тесты для списка разрешённых полей

use crate::common::{Error, Result};
use crate::compiler::{AliasTable, Join};

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_check_projections_accepts_known_fields() -> Result<()> {
    let table = AliasTable::documents();
    table.check_projections(&fields(&["id", "title", "tracking_id", "version", "publisher"]))
}

#[test]
fn test_check_projections_rejects_unknown_field() {
    let table = AliasTable::documents();
    let err = table
        .check_projections(&fields(&["id", "secret"]))
        .unwrap_err();

    match err {
        Error::UnknownField { name } => assert_eq!(name, "secret"),
        _ => panic!("Ожидалась ошибка неизвестного поля"),
    }
}

#[test]
fn test_state_only_in_advisory_schema() {
    assert!(AliasTable::documents().get("state").is_none());
    assert!(AliasTable::advisories().get("state").is_some());
}

#[test]
fn test_create_order_directions() -> Result<()> {
    let table = AliasTable::documents();

    let order = table.create_order(&fields(&["-version"]))?;
    assert_eq!(order.sql, "docs.version DESC");

    let order = table.create_order(&fields(&["version"]))?;
    assert_eq!(order.sql, "docs.version ASC");
    Ok(())
}

#[test]
fn test_create_order_default_listing() -> Result<()> {
    let table = AliasTable::documents();
    let order = table.create_order(&fields(&["publisher", "tracking_id", "-version"]))?;

    assert_eq!(
        order.sql,
        "docs.publisher ASC, docs.tracking_id ASC, docs.version DESC"
    );
    assert!(order.joins.is_empty());
    Ok(())
}

#[test]
fn test_create_order_unknown_field() {
    let table = AliasTable::documents();
    let err = table.create_order(&fields(&["-nonsense"])).unwrap_err();

    match err {
        Error::UnknownField { name } => assert_eq!(name, "nonsense"),
        _ => panic!("Ожидалась ошибка неизвестного поля"),
    }
}

#[test]
fn test_create_order_records_joins() -> Result<()> {
    let table = AliasTable::advisories();
    let order = table.create_order(&fields(&["state"]))?;

    assert_eq!(order.sql, "ads.state ASC");
    assert!(order.joins.contains(&Join::Advisories));
    Ok(())
}

#[test]
fn test_raw_content_is_not_sortable() {
    let table = AliasTable::documents();
    let err = table.create_order(&fields(&["original"])).unwrap_err();
    assert!(err.to_string().contains("not sortable"));
}
