//! Тесты для дескриптора хранилища

use crate::common::{Result, Tlp};
use crate::query::Value;
use crate::store::Db;
use sqlx::postgres::PgPoolOptions;

fn lazy_db() -> Result<Db> {
    // Ленивый пул не ходит в сеть при создании
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://advisorydb@localhost/advisorydb")
        .map_err(crate::common::Error::Store)?;
    Db::new(pool)
}

#[tokio::test]
async fn test_debug_sql_substitutes_params() -> Result<()> {
    let db = lazy_db()?;
    let params = vec![
        Value::String("ACME".to_string()),
        Value::Int(42),
        Value::Tlp(Tlp::Red),
    ];

    let rendered = db.debug_sql(
        "SELECT docs.id FROM documents docs WHERE docs.publisher = $1 AND docs.id = $2 AND docs.tlp = $3",
        &params,
    );
    assert_eq!(
        rendered,
        "SELECT docs.id FROM documents docs WHERE docs.publisher = 'ACME' AND docs.id = '42' AND docs.tlp = 'red'"
    );
    Ok(())
}

#[tokio::test]
async fn test_debug_sql_keeps_unknown_placeholders() -> Result<()> {
    let db = lazy_db()?;
    let rendered = db.debug_sql("WHERE a = $1 AND b = $2", &[Value::Int(1)]);
    assert_eq!(rendered, "WHERE a = '1' AND b = $2");
    Ok(())
}

#[tokio::test]
async fn test_debug_sql_without_params() -> Result<()> {
    let db = lazy_db()?;
    let rendered = db.debug_sql("SELECT count(*) FROM documents docs WHERE TRUE", &[]);
    assert_eq!(rendered, "SELECT count(*) FROM documents docs WHERE TRUE");
    Ok(())
}
