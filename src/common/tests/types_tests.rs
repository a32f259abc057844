//! Тесты для общих типов

use crate::common::{Role, Tlp, Workflow};
use std::str::FromStr;

#[test]
fn test_tlp_roundtrip() {
    for tlp in [Tlp::White, Tlp::Green, Tlp::Amber, Tlp::Red] {
        assert_eq!(Tlp::from_str(tlp.as_str()).unwrap(), tlp);
    }
    assert!(Tlp::from_str("purple").is_err());
}

#[test]
fn test_tlp_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Tlp::Amber).unwrap(), r#""amber""#);
    let tlp: Tlp = serde_json::from_str(r#""red""#).unwrap();
    assert_eq!(tlp, Tlp::Red);
}

#[test]
fn test_role_roundtrip() {
    for role in [
        Role::Editor,
        Role::Reviewer,
        Role::Auditor,
        Role::Importer,
        Role::Admin,
    ] {
        assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
    }
    assert!(Role::from_str("owner").is_err());
}

#[test]
fn test_workflow_is_transparent_in_json() {
    let state = Workflow::from("review");
    assert_eq!(serde_json::to_string(&state).unwrap(), r#""review""#);
    let back: Workflow = serde_json::from_str(r#""review""#).unwrap();
    assert_eq!(back, state);
}
