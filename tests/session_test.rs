//! Integration tests for dual-view edit sessions.
//!
//! A session edits one agent entry or one group of a document through two
//! views: structured form fields and the serialized YAML text form. These
//! tests cover the transition gates, the commit numbering policy, and the
//! documented round-trip defaults.

use agentdeck::legacy::{parse_document, AgentDef, GroupDef};
use agentdeck::models::RoiTier;
use agentdeck::session::{EditSession, View};
use agentdeck::Error;

fn ops_group() -> GroupDef {
    let doc = parse_document(
        "agentGroups:\n  - groupName: Ops\n    agents:\n      - name: A\n      - name: B\n",
    )
    .unwrap();
    doc.agent_groups.into_iter().next().unwrap()
}

// === Round trip ===

#[test]
fn test_minimal_draft_round_trips_with_defaults() {
    let mut session = EditSession::<AgentDef>::new_entity();
    session.set_form(AgentDef::new("Scout"));
    session.switch_to_text().unwrap();

    // Re-enter the form view from the serialized text alone
    session.switch_to_form().unwrap();
    let draft = session.form();

    assert_eq!(draft.name, "Scout");
    assert!(draft.tools.is_empty());
    assert!(draft.journey_steps.is_empty());
    assert_eq!(draft.metrics.roi_tier, RoiTier::Medium);
    assert_eq!(draft.objective, "");
}

#[test]
fn test_text_edits_survive_view_switches() {
    let mut session = EditSession::<AgentDef>::new_entity();
    session.set_form(AgentDef::new("Scout"));
    session.switch_to_text().unwrap();

    session.set_text("name: Scout\ntools:\n  - Slack\n  - Jira\n");
    session.switch_to_form().unwrap();
    assert_eq!(session.form().tools, vec!["Slack".to_string(), "Jira".to_string()]);

    session.switch_to_text().unwrap();
    assert!(session.text().contains("- Slack"));
}

// === Transition gates ===

#[test]
fn test_list_text_fails_shape_and_preserves_form() {
    let mut session = EditSession::<AgentDef>::new_entity();
    session.set_form(AgentDef::new("Scout"));
    session.switch_to_text().unwrap();

    session.set_text("- a\n- b\n");
    let err = session.switch_to_form().unwrap_err();

    assert!(matches!(err, Error::Shape(_)));
    assert_eq!(session.view(), View::Text);
    assert_eq!(session.form().name, "Scout");
}

#[test]
fn test_scalar_text_fails_shape() {
    let mut session = EditSession::<AgentDef>::new_entity();
    session.set_form(AgentDef::new("Scout"));
    session.switch_to_text().unwrap();

    session.set_text("just a string\n");
    assert!(matches!(session.switch_to_form(), Err(Error::Shape(_))));
}

#[test]
fn test_invalid_field_in_text_is_a_validation_error() {
    let mut session = EditSession::<AgentDef>::new_entity();
    session.set_form(AgentDef::new("Scout"));
    session.switch_to_text().unwrap();

    session.set_text("name: Scout\ntools: not-a-list\n");
    let err = session.switch_to_form().unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(err.to_string().contains("tools"));
}

// === Commit and numbering ===

#[test]
fn test_commit_new_agent_into_group() {
    let mut group = ops_group();
    let before = group.agents.len();

    let mut session = EditSession::<AgentDef>::new_entity();
    session.set_form(AgentDef::new("C"));
    session.commit(&mut group.agents).unwrap();

    assert_eq!(group.agents.len(), before + 1);
    assert_eq!(group.agents[2].name, "C");
    assert_eq!(group.agents[2].agent_number, Some(3));
}

#[test]
fn test_editing_via_text_preserves_omitted_number() {
    let mut group = ops_group();
    assert_eq!(group.agents[1].agent_number, Some(2));

    let mut session = EditSession::edit(1, &group.agents[1]);
    session.switch_to_text().unwrap();
    session.set_text("name: B\ndescription: now documented\n");
    session.commit(&mut group.agents).unwrap();

    assert_eq!(group.agents[1].agent_number, Some(2));
    assert_eq!(group.agents[1].description, "now documented");
}

#[test]
fn test_commit_failure_leaves_collection_untouched() {
    let mut group = ops_group();
    let before = group.agents.clone();

    let mut session = EditSession::edit(0, &group.agents[0]);
    session.switch_to_text().unwrap();
    session.set_text("name: ''\n");
    assert!(session.commit(&mut group.agents).is_err());

    assert_eq!(group.agents, before);
}

#[test]
fn test_group_session_commit_numbers_new_group() {
    let doc = parse_document(
        "agentGroups:\n  - groupName: Intake\n    agents: []\n",
    )
    .unwrap();
    let mut groups = doc.agent_groups;

    let mut session = EditSession::<GroupDef>::new_entity();
    session.set_form(GroupDef::new("Rollout"));
    session.commit(&mut groups).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].group_name, "Rollout");
    assert_eq!(groups[1].group_number, Some(2));
}

#[test]
fn test_abandoning_a_session_changes_nothing() {
    let mut group = ops_group();
    let before = group.agents.clone();
    {
        let mut session = EditSession::edit(0, &group.agents[0]);
        let mut edited = session.form().clone();
        edited.name = "Renamed".to_string();
        session.set_form(edited);
        // Dropped without commit
    }
    assert_eq!(group.agents, before);
}
