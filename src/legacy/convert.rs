//! Conversion between legacy documents and flat records.
//!
//! Import walks a normalized document and stamps each agent with the flat
//! model's grouping fields; export regenerates a document from flat
//! records. Regeneration is lossy relative to a hand-authored original
//! (cosmetic fields not represented in flat records are dropped), so
//! callers holding an original serialized form should prefer it and treat
//! regeneration as the fallback.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::dimension::UNCATEGORIZED;
use crate::display::{self, DisplayMeta};
use crate::ident;
use crate::legacy::{AgentDef, Document, GroupDef, SectionDefaults};
use crate::models::Agent;
use crate::store::CanvasStore;
use crate::Result;

/// Flatten a normalized document into backend records for a canvas.
///
/// Each agent is stamped with `phase` (its group's name), `phase_order`
/// (the group's number, positional when the document omitted it), and
/// `agent_order` (its position within the group). Group ids and phase tags
/// are not carried onto records; export regenerates them.
pub fn to_flat_records(doc: &Document, canvas_id: &str) -> Vec<Agent> {
    let mut records = Vec::new();
    for (i, group) in doc.agent_groups.iter().enumerate() {
        let phase_order = group.group_number.unwrap_or(i as u32);
        for (j, def) in group.agents.iter().enumerate() {
            let mut agent = Agent::new(canvas_id, &def.name);
            agent.objective = def.objective.clone();
            agent.description = def.description.clone();
            agent.tools = def.tools.clone();
            agent.journey_steps = def.journey_steps.clone();
            agent.demo_link = def.demo_link.clone();
            agent.video_link = def.video_link.clone();
            agent.metrics = def.metrics.clone();
            agent.phase = group.group_name.clone();
            agent.phase_order = Some(phase_order);
            agent.agent_order = Some(j as u32);
            records.push(agent);
        }
    }
    records
}

/// Regenerate a document from a canvas's flat records.
///
/// Soft-deleted records are skipped. Groups are rebuilt from each record's
/// phase, ordered by the records' phase-order hints (creation order when
/// absent); group ids are re-derived from the group names and agent
/// numbers are reassigned positionally. The tools config is rebuilt from
/// the display registry for every tool the records mention.
pub fn to_document(title: &str, agents: &[Agent], defaults: &SectionDefaults) -> Document {
    let mut groups: Vec<GroupDef> = Vec::new();
    let mut order_of: Vec<u32> = Vec::new();
    let mut index_of: BTreeMap<String, usize> = BTreeMap::new();

    for agent in agents.iter().filter(|a| !a.is_deleted()) {
        let phase = if agent.phase.trim().is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            agent.phase.trim().to_string()
        };
        let idx = *index_of.entry(phase.clone()).or_insert_with(|| {
            let creation_index = groups.len();
            groups.push(GroupDef::new(&phase));
            order_of.push(agent.phase_order.unwrap_or(creation_index as u32));
            creation_index
        });
        groups[idx].agents.push(to_agent_def(agent));
    }

    let mut ordered: Vec<(u32, GroupDef)> = order_of.into_iter().zip(groups).collect();
    ordered.sort_by_key(|(order, _)| *order);

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut tools_config: BTreeMap<String, DisplayMeta> = BTreeMap::new();
    let mut agent_groups = Vec::with_capacity(ordered.len());
    for (order, mut group) in ordered {
        let id = ident::derive_id(&group.group_name, &seen_ids, None);
        seen_ids.insert(id.clone());
        group.group_id = Some(id);
        group.group_number = Some(order);

        group.agents.sort_by_key(|a| a.agent_number);
        for (j, agent) in group.agents.iter_mut().enumerate() {
            agent.agent_number = Some(j as u32 + 1);
            for tool in &agent.tools {
                let key = display::normalize_tool_key(tool);
                tools_config
                    .entry(key.clone())
                    .or_insert_with(|| display::display_for("tools", tool));
            }
        }
        agent_groups.push(group);
    }

    Document {
        document_title: title.to_string(),
        section_defaults: defaults.clone(),
        tools_config,
        agent_groups,
    }
}

fn to_agent_def(agent: &Agent) -> AgentDef {
    AgentDef {
        name: agent.name.clone(),
        agent_number: agent.agent_order.map(|o| o + 1),
        objective: agent.objective.clone(),
        description: agent.description.clone(),
        tools: agent.tools.clone(),
        journey_steps: agent.journey_steps.clone(),
        demo_link: agent.demo_link.clone(),
        video_link: agent.video_link.clone(),
        metrics: agent.metrics.clone(),
    }
}

/// Parse a serialized legacy document and replace a canvas's records with
/// its agents. Returns the stored records, ids assigned.
///
/// The whole record set is substituted through the store's `bulk_replace`,
/// so a failed import never leaves a canvas half-replaced.
pub fn import_document(
    store: &mut dyn CanvasStore,
    canvas_id: &str,
    text: &str,
) -> Result<Vec<Agent>> {
    let doc = crate::legacy::parse_document(text)?;
    let records = to_flat_records(&doc, canvas_id);
    store.bulk_replace(canvas_id, &records)?;
    debug!(canvas_id, records = records.len(), "imported legacy document");
    store.list(canvas_id)
}

/// Regenerate a document from a canvas's stored records.
pub fn export_document(
    store: &dyn CanvasStore,
    canvas_id: &str,
    title: &str,
    defaults: &SectionDefaults,
) -> Result<Document> {
    let agents = store.list(canvas_id)?;
    let live: Vec<Agent> = agents.into_iter().filter(|a| !a.is_deleted()).collect();
    debug!(canvas_id, agents = live.len(), "exported legacy document");
    Ok(to_document(title, &live, defaults))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::parse_document;
    use crate::models::RoiTier;

    const TWO_GROUP_DOC: &str = "\
documentTitle: Pilot Canvas
agentGroups:
  - groupName: Intake
    groupNumber: 0
    agents:
      - name: Sorter
  - groupName: Ops
    groupNumber: 1
    agents:
      - name: A
      - name: B
";

    #[test]
    fn test_flatten_stamps_grouping_fields() {
        let doc = parse_document(TWO_GROUP_DOC).unwrap();
        let records = to_flat_records(&doc, "canvas-1");

        assert_eq!(records.len(), 3);
        let a = &records[1];
        assert_eq!(a.name, "A");
        assert_eq!(a.phase, "Ops");
        assert_eq!(a.phase_order, Some(1));
        assert_eq!(a.agent_order, Some(0));

        let b = &records[2];
        assert_eq!(b.name, "B");
        assert_eq!(b.phase, "Ops");
        assert_eq!(b.phase_order, Some(1));
        assert_eq!(b.agent_order, Some(1));
    }

    #[test]
    fn test_flatten_uses_position_for_missing_group_number() {
        let doc = parse_document(
            "agentGroups:\n  - groupName: Solo\n    agents:\n      - name: A\n",
        )
        .unwrap();
        let records = to_flat_records(&doc, "c");
        assert_eq!(records[0].phase_order, Some(0));
    }

    #[test]
    fn test_flatten_copies_agent_fields() {
        let doc = parse_document(
            "agentGroups:\n  - groupName: Ops\n    agents:\n      - name: A\n        objective: route\n        tools: [Slack]\n        metrics:\n          roiContribution: High\n",
        )
        .unwrap();
        let records = to_flat_records(&doc, "c");
        assert_eq!(records[0].objective, "route");
        assert_eq!(records[0].tools, vec!["Slack".to_string()]);
        assert_eq!(records[0].metrics.roi_tier, RoiTier::High);
    }

    #[test]
    fn test_regenerated_document_preserves_order_and_labels() {
        let doc = parse_document(TWO_GROUP_DOC).unwrap();
        let records = to_flat_records(&doc, "c");
        let again = to_document("Pilot Canvas", &records, &SectionDefaults::default());

        assert_eq!(again.document_title, "Pilot Canvas");
        let labels: Vec<&str> = again
            .agent_groups
            .iter()
            .map(|g| g.group_name.as_str())
            .collect();
        assert_eq!(labels, vec!["Intake", "Ops"]);
        let names: Vec<&str> = again.agent_groups[1]
            .agents
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(again.agent_groups[1].agents[0].agent_number, Some(1));
    }

    #[test]
    fn test_regenerated_document_rebuilds_tools_config() {
        let mut agent = Agent::new("c", "A");
        agent.phase = "Ops".to_string();
        agent.tools = vec!["Slack".to_string(), "Homegrown CRM".to_string()];

        let doc = to_document("T", &[agent], &SectionDefaults::default());
        assert!(doc.tools_config.contains_key("slack"));
        assert!(doc.tools_config.contains_key("homegrown-crm"));
        assert_eq!(doc.tools_config["slack"].label, "Slack");
    }

    #[test]
    fn test_export_skips_soft_deleted() {
        let mut live = Agent::new("c", "A");
        live.phase = "Ops".to_string();
        let mut gone = Agent::new("c", "B");
        gone.phase = "Ops".to_string();
        gone.deleted_at = Some(chrono::Utc::now());

        let doc = to_document("T", &[live, gone], &SectionDefaults::default());
        assert_eq!(doc.agent_groups[0].agents.len(), 1);
    }

    #[test]
    fn test_unphased_records_export_as_uncategorized() {
        let doc = to_document("T", &[Agent::new("c", "A")], &SectionDefaults::default());
        assert_eq!(doc.agent_groups[0].group_name, UNCATEGORIZED);
    }
}
