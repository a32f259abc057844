//! Таблица переходов рабочего процесса
//!
//! Набор состояний и ребра графа приходят из конфигурации
//! развертывания; здесь они только проверяются и индексируются.

use crate::common::config::WorkflowConfig;
use crate::common::types::{Role, Workflow};
use crate::common::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Таблица переходов: ориентированные ребра с наборами ролей
#[derive(Debug, Clone)]
pub struct TransitionTable {
    states: HashSet<Workflow>,
    initial_state: Workflow,
    edges: HashMap<(Workflow, Workflow), Vec<Role>>,
}

impl TransitionTable {
    /// Строит и проверяет таблицу из конфигурации
    pub fn from_config(config: &WorkflowConfig) -> Result<Self> {
        let states: HashSet<Workflow> = config.states.iter().cloned().collect();
        if !states.contains(&config.initial_state) {
            return Err(Error::configuration(format!(
                "initial state '{}' is not in the state set",
                config.initial_state
            )));
        }
        let mut edges = HashMap::new();
        for rule in &config.transitions {
            for state in [&rule.from, &rule.to] {
                if !states.contains(state) {
                    return Err(Error::configuration(format!(
                        "transition references unknown state '{}'",
                        state
                    )));
                }
            }
            if rule.roles.is_empty() {
                return Err(Error::configuration(format!(
                    "transition {} -> {} has no roles",
                    rule.from, rule.to
                )));
            }
            let mut roles = rule.roles.clone();
            roles.sort();
            roles.dedup();
            let key = (rule.from.clone(), rule.to.clone());
            if edges.insert(key, roles).is_some() {
                return Err(Error::configuration(format!(
                    "duplicate transition {} -> {}",
                    rule.from, rule.to
                )));
            }
        }
        Ok(Self {
            states,
            initial_state: config.initial_state.clone(),
            edges,
        })
    }

    /// Все состояния таблицы
    pub fn states(&self) -> &HashSet<Workflow> {
        &self.states
    }

    /// Состояние новой рекомендации
    pub fn initial_state(&self) -> &Workflow {
        &self.initial_state
    }

    /// Проверяет, известно ли состояние таблице
    pub fn is_state(&self, state: &Workflow) -> bool {
        self.states.contains(state)
    }

    /// Роли, которым разрешен переход `from` -> `to`.
    ///
    /// Пустой срез означает, что перехода нет вообще, а не
    /// "переход без ролей": отсутствующее ребро недоступно никому.
    pub fn transitions_roles(&self, from: &Workflow, to: &Workflow) -> &[Role] {
        self.edges
            .get(&(from.clone(), to.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
