//! Список разрешённых полей и проверка проекций
//!
//! Отображает человекочитаемые имена полей на выражения хранилища.
//! Любое проецируемое или сортируемое поле обязано пройти через этот
//! список до построения запроса; неизвестные поля отклоняются раньше,
//! чем ввод дойдет до хранилища.

use crate::common::{Error, Result};
use crate::query::ValueType;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Дополнительное соединение, которое требуется выражению колонки
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Join {
    /// Таблица рекомендаций `advisories ads`
    Advisories,
}

impl Join {
    /// SQL фрагмент соединения
    pub fn sql(&self) -> &'static str {
        match self {
            Join::Advisories => {
                "JOIN advisories ads ON (ads.tracking_id, ads.publisher) = (docs.tracking_id, docs.publisher)"
            }
        }
    }
}

/// Разрешённое поле схемы
#[derive(Debug, Clone)]
pub struct Alias {
    /// Выражение хранилища
    pub expr: &'static str,
    /// Тип значения колонки
    pub value_type: ValueType,
    /// Соединение, без которого выражение не вычислимо
    pub join: Option<Join>,
    /// Допустимо ли поле в ORDER BY
    pub sortable: bool,
}

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn sql(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// Скомпилированная сортировка
#[derive(Debug, Clone, Default)]
pub struct OrderClause {
    /// Фрагмент ORDER BY (пустой = сортировка не запрошена)
    pub sql: String,
    /// Соединения, которые нужны выражениям сортировки
    pub joins: BTreeSet<Join>,
}

/// Список разрешённых полей одной схемы (документы или рекомендации)
pub struct AliasTable {
    fields: IndexMap<&'static str, Alias>,
    /// Соединения, обязательные для схемы независимо от полей запроса
    base_joins: BTreeSet<Join>,
}

impl AliasTable {
    /// Схема документов
    pub fn documents() -> Self {
        let mut fields = IndexMap::new();
        let mut col = |name: &'static str, expr: &'static str, value_type: ValueType| {
            fields.insert(
                name,
                Alias {
                    expr,
                    value_type,
                    join: None,
                    sortable: true,
                },
            );
        };
        col("id", "docs.id", ValueType::Int);
        col("tracking_id", "docs.tracking_id", ValueType::String);
        col("publisher", "docs.publisher", ValueType::String);
        col("version", "docs.version", ValueType::String);
        col("title", "docs.title", ValueType::String);
        col("tlp", "docs.tlp", ValueType::Tlp);
        col("current_release_date", "docs.current_release_date", ValueType::Time);
        col("initial_release_date", "docs.initial_release_date", ValueType::Time);
        col("imported", "docs.imported", ValueType::Time);
        fields.insert(
            "original",
            Alias {
                expr: "docs.original",
                value_type: ValueType::Blob,
                join: None,
                sortable: false,
            },
        );
        Self {
            fields,
            base_joins: BTreeSet::new(),
        }
    }

    /// Схема рекомендаций: документы плюс состояние рабочего процесса.
    ///
    /// Рекомендация существует только для пары (издатель,
    /// отслеживаемый идентификатор) из таблицы рекомендаций, поэтому
    /// соединение с ней обязательно для любого запроса этой схемы.
    pub fn advisories() -> Self {
        let mut table = Self::documents();
        table.base_joins.insert(Join::Advisories);
        // Колонка состояния имеет тип workflow; наружу она всегда
        // ходит текстом, поэтому приведение зашито в выражение.
        table.fields.insert(
            "state",
            Alias {
                expr: "ads.state::text",
                value_type: ValueType::Workflow,
                join: Some(Join::Advisories),
                sortable: true,
            },
        );
        table
    }

    /// Выбирает схему по флагу `advisories`
    pub fn for_advisories(advisories: bool) -> Self {
        if advisories {
            Self::advisories()
        } else {
            Self::documents()
        }
    }

    /// Ищет поле по имени
    pub fn get(&self, name: &str) -> Option<&Alias> {
        self.fields.get(name)
    }

    /// Соединения, обязательные для схемы
    pub fn base_joins(&self) -> &BTreeSet<Join> {
        &self.base_joins
    }

    /// Разрешает имя поля или сообщает о неизвестном поле
    pub fn resolve(&self, name: &str) -> Result<&Alias> {
        self.fields
            .get(name)
            .ok_or_else(|| Error::unknown_field(name))
    }

    /// Проверяет список проекций до построения запроса.
    ///
    /// Сообщает о первом поле, отсутствующем в списке разрешённых.
    pub fn check_projections(&self, fields: &[String]) -> Result<()> {
        for field in fields {
            self.resolve(field)?;
        }
        Ok(())
    }

    /// Разбирает поля сортировки: ведущий `-` означает по убыванию
    pub fn create_order(&self, fields: &[String]) -> Result<OrderClause> {
        let mut order = OrderClause::default();
        let mut parts = Vec::with_capacity(fields.len());
        for field in fields {
            let (name, direction) = match field.strip_prefix('-') {
                Some(name) => (name, OrderDirection::Desc),
                None => (field.as_str(), OrderDirection::Asc),
            };
            let alias = self.resolve(name)?;
            if !alias.sortable {
                return Err(Error::validation(format!(
                    "field '{}' is not sortable",
                    name
                )));
            }
            if let Some(join) = alias.join {
                order.joins.insert(join);
            }
            parts.push(format!("{} {}", alias.expr, direction.sql()));
        }
        order.sql = parts.join(", ");
        Ok(order)
    }
}
