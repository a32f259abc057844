//! Оркестратор переходов состояний
//!
//! Пакет переходов применяется в одной транзакции: либо все пункты
//! проходят и фиксируются, либо первый отказ откатывает пакет целиком.
//! Вызывающий получает только категорию первого отказа.

use crate::access::{check_transition, Decision, TlpScope};
use crate::common::types::{Role, Tlp, Workflow};
use crate::common::{Error, Result};
use crate::models::{Advisory, EventKind};
use crate::store::db::Db;
use crate::store::events::append_event;
use crate::workflow::TransitionTable;
use serde::{Deserialize, Serialize};

/// Запрошенный переход одной рекомендации
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateChangeRequest {
    pub publisher: String,
    pub tracking_id: String,
    pub state: Workflow,
}

/// Применяет пакет переходов в одной транзакции.
///
/// Чтение текущего состояния блокирует строку рекомендации, поэтому
/// параллельные переходы одной и той же рекомендации сериализуются,
/// а не теряют обновления друг друга.
pub async fn change_states(
    db: &Db,
    scope: &TlpScope,
    caller_roles: &[Role],
    actor: Option<&str>,
    table: &TransitionTable,
    inputs: &[StateChangeRequest],
) -> Result<()> {
    const FIND_ADVISORY: &str = "SELECT docs.id, ads.state::text, docs.tlp \
         FROM advisories ads \
         JOIN documents docs ON (ads.tracking_id, ads.publisher) = (docs.tracking_id, docs.publisher) \
         WHERE docs.publisher = $1 AND docs.tracking_id = $2 \
         FOR UPDATE OF ads";
    const UPDATE_STATE: &str =
        "UPDATE advisories SET state = $1::workflow WHERE (tracking_id, publisher) = ($2, $3)";

    let mut tx = db.pool().begin().await?;

    for input in inputs {
        if input.publisher.is_empty() || input.tracking_id.is_empty() {
            return Err(Error::validation(
                "publisher and tracking_id must not be blank",
            ));
        }
        tracing::debug!(
            publisher = %input.publisher,
            tracking_id = %input.tracking_id,
            state = %input.state,
            "state change"
        );

        let row: Option<(i64, String, String)> = sqlx::query_as(FIND_ADVISORY)
            .bind(&input.publisher)
            .bind(&input.tracking_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((documents_id, current, tlp)) = row else {
            return Err(Error::NotFound);
        };
        let advisory = Advisory {
            publisher: input.publisher.clone(),
            tracking_id: input.tracking_id.clone(),
            state: Workflow::new(current),
            tlp: tlp.parse::<Tlp>().map_err(Error::configuration)?,
        };

        // Видимость по метке и роли проверяет чистая политика; сама
        // выборка ограничивает видимость только идентичностью.
        match check_transition(
            &advisory.state,
            &input.state,
            caller_roles,
            scope,
            &advisory.publisher,
            advisory.tlp,
            table,
        ) {
            Decision::Allow => {}
            Decision::Deny(reason) => {
                // Ранний возврат бросает транзакцию, и она откатывается
                return Err(reason.into_error(&advisory.state, &input.state));
            }
        }

        sqlx::query(UPDATE_STATE)
            .bind(input.state.as_str())
            .bind(&input.tracking_id)
            .bind(&input.publisher)
            .execute(&mut *tx)
            .await?;

        append_event(&mut tx, EventKind::StateChange, &input.state, actor, documents_id).await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Применяет один переход
pub async fn change_state(
    db: &Db,
    scope: &TlpScope,
    caller_roles: &[Role],
    actor: Option<&str>,
    table: &TransitionTable,
    input: &StateChangeRequest,
) -> Result<()> {
    change_states(db, scope, caller_roles, actor, table, std::slice::from_ref(input)).await
}
