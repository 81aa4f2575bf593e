//! Integration tests for grouping, filtering, and search.
//!
//! These tests exercise the public API the rendering layer consumes:
//! records come out of a store, pass through filter/search refinement, and
//! are partitioned into ordered groups.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use agentdeck::engine::debounce::SearchDebouncer;
use agentdeck::engine::filter::{self, FilterMap};
use agentdeck::engine::group_by;
use agentdeck::models::Agent;
use agentdeck::store::{CanvasStore, MemoryStore};

fn agent(name: &str, phase: &str, phase_order: u32, agent_order: u32) -> Agent {
    let mut a = Agent::new("canvas-1", name);
    a.phase = phase.to_string();
    a.phase_order = Some(phase_order);
    a.agent_order = Some(agent_order);
    a
}

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    let mut lead = agent("Lead Scorer", "Discovery", 0, 0);
    lead.tags.insert("status".to_string(), "active".to_string());
    lead.tools = vec!["Salesforce".to_string()];

    let mut intake = agent("Invoice Triage", "Discovery", 0, 1);
    intake.tags.insert("status".to_string(), "draft".to_string());
    intake.objective = "Route invoices to approvers".to_string();

    let mut digest = agent("Digest Writer", "Rollout", 1, 0);
    digest.tags.insert("status".to_string(), "active".to_string());
    digest.tools = vec!["Slack".to_string()];

    for a in [lead, intake, digest] {
        store.create(&a).unwrap();
    }
    store
}

// === Grouping ===

#[test]
fn test_store_records_group_into_ordered_phases() {
    let store = seeded_store();
    let records = store.list("canvas-1").unwrap();
    let groups = group_by(&records, "phase");

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "Discovery");
    assert_eq!(groups[0].item_count, 2);
    assert_eq!(groups[0].items[0].name, "Lead Scorer");
    assert_eq!(groups[0].items[1].name, "Invoice Triage");
    assert_eq!(groups[1].label, "Rollout");
}

#[test]
fn test_soft_deleted_record_disappears_from_groups() {
    let mut store = seeded_store();
    let records = store.list("canvas-1").unwrap();
    let digest = records.iter().find(|a| a.name == "Digest Writer").unwrap();
    store.delete(&digest.id).unwrap();

    let groups = group_by(&store.list("canvas-1").unwrap(), "phase");
    assert_eq!(groups.len(), 1);
    let total: usize = groups.iter().map(|g| g.item_count).sum();
    assert_eq!(total, 2);
}

#[test]
fn test_grouping_by_tag_dimension() {
    let store = seeded_store();
    let groups = group_by(&store.list("canvas-1").unwrap(), "status");

    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["active", "draft"]);
    assert_eq!(groups[0].item_count, 2);
}

#[test]
fn test_group_ids_are_unique_within_a_pass() {
    let store = seeded_store();
    let groups = group_by(&store.list("canvas-1").unwrap(), "phase");
    let ids: HashSet<&str> = groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids.len(), groups.len());
}

// === Filter and search ===

#[test]
fn test_filter_then_search_then_group() {
    let store = seeded_store();
    let records = store.list("canvas-1").unwrap();

    let mut filters = FilterMap::new();
    filters.insert("status".to_string(), vec!["active".to_string()]);

    let refined = filter::refine(&records, &filters, "slack");
    assert_eq!(refined.len(), 1);
    assert_eq!(refined[0].name, "Digest Writer");

    let groups = group_by(&refined, "phase");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "Rollout");
}

#[test]
fn test_filtering_never_mutates_source() {
    let store = seeded_store();
    let records = store.list("canvas-1").unwrap();
    let before = records.clone();

    let mut filters = FilterMap::new();
    filters.insert("status".to_string(), vec!["draft".to_string()]);
    let _ = filter::refine(&records, &filters, "invoice");

    assert_eq!(records, before);
}

// === Debounced search ===

#[test]
fn test_debounced_search_applies_latest_query_only() {
    let store = seeded_store();
    let records = store.list("canvas-1").unwrap();
    let mut debouncer = SearchDebouncer::new(Duration::from_millis(100));
    let start = Instant::now();

    debouncer.submit("lead", start);
    debouncer.submit("invoice", start + Duration::from_millis(40));

    let fired = debouncer
        .poll(start + Duration::from_millis(140))
        .expect("latest query should fire");
    assert_eq!(fired, "invoice");

    let hits = filter::search(&records, &fired);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Invoice Triage");
    assert!(debouncer.poll(start + Duration::from_millis(300)).is_none());
}
