//! Тесты для таблицы переходов

use crate::common::config::{TransitionRule, WorkflowConfig};
use crate::common::{Result, Role, Workflow};
use crate::workflow::TransitionTable;

#[test]
fn test_default_table_builds() -> Result<()> {
    let table = TransitionTable::from_config(&WorkflowConfig::default())?;
    assert_eq!(table.states().len(), 6);
    assert_eq!(table.initial_state(), &Workflow::from("new"));
    Ok(())
}

#[test]
fn test_known_edge_returns_roles() -> Result<()> {
    let table = TransitionTable::from_config(&WorkflowConfig::default())?;
    let roles = table.transitions_roles(&Workflow::from("new"), &Workflow::from("read"));
    assert_eq!(roles, &[Role::Editor]);
    Ok(())
}

#[test]
fn test_missing_edge_returns_empty_set() -> Result<()> {
    let table = TransitionTable::from_config(&WorkflowConfig::default())?;

    // Любая пара без ребра дает пустой набор, в том числе петли
    assert!(table
        .transitions_roles(&Workflow::from("new"), &Workflow::from("archived"))
        .is_empty());
    assert!(table
        .transitions_roles(&Workflow::from("new"), &Workflow::from("new"))
        .is_empty());
    assert!(table
        .transitions_roles(&Workflow::from("no_such"), &Workflow::from("read"))
        .is_empty());
    Ok(())
}

#[test]
fn test_unknown_state_in_transition() {
    let mut config = WorkflowConfig::default();
    config.transitions.push(TransitionRule {
        from: Workflow::from("new"),
        to: Workflow::from("limbo"),
        roles: vec![Role::Admin],
    });

    let err = TransitionTable::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("unknown state 'limbo'"));
}

#[test]
fn test_duplicate_edge_is_rejected() {
    let mut config = WorkflowConfig::default();
    config.transitions.push(TransitionRule {
        from: Workflow::from("new"),
        to: Workflow::from("read"),
        roles: vec![Role::Admin],
    });

    let err = TransitionTable::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("duplicate transition"));
}

#[test]
fn test_edge_without_roles_is_rejected() {
    let mut config = WorkflowConfig::default();
    config.transitions.push(TransitionRule {
        from: Workflow::from("archived"),
        to: Workflow::from("read"),
        roles: vec![],
    });

    let err = TransitionTable::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("has no roles"));
}

#[test]
fn test_initial_state_must_be_known() {
    let mut config = WorkflowConfig::default();
    config.initial_state = Workflow::from("limbo");

    let err = TransitionTable::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("initial state"));
}
