//! Legacy nested-document model and normalizer.
//!
//! Canvases predating the flat record model were authored as one nested
//! document per canvas: a title, section defaults, tool display overrides,
//! and an ordered list of agent groups. This module validates such a
//! document, fills structural defaults, and allocates the identifiers and
//! sequence numbers the rest of the system relies on. Conversion to and
//! from flat records lives in [`convert`].

pub mod convert;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::display::DisplayMeta;
use crate::models::AgentMetrics;
use crate::{ident, schema, Error, Result};

/// Structural defaults applied to a document's groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDefaults {
    pub icon: String,
    pub show_in_flow: bool,
    pub is_support: bool,
}

impl Default for SectionDefaults {
    fn default() -> Self {
        Self {
            icon: "layers".to_string(),
            show_in_flow: true,
            is_support: false,
        }
    }
}

/// An agent entry inside a legacy document group.
///
/// Also the draft type for agent edit sessions, so its wire shape is the
/// text view users see and edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDef {
    /// Agent name (required, non-empty, trimmed)
    pub name: String,

    /// Document-wide running number; assigned from position when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_number: Option<u32>,

    #[serde(default)]
    pub objective: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tools: Vec<String>,

    #[serde(default)]
    pub journey_steps: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,

    #[serde(default)]
    pub metrics: AgentMetrics,
}

impl AgentDef {
    /// Create a bare agent entry with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            ..Self::default()
        }
    }
}

/// A labeled group of agents inside a legacy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDef {
    /// Document-unique slug; derived from the group name when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Group label (required, non-empty, trimmed)
    pub group_name: String,

    /// Order of the group within the document; positional when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_number: Option<u32>,

    /// Free-form phase marker carried for export only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_tag: Option<String>,

    #[serde(default)]
    pub agents: Vec<AgentDef>,
}

impl GroupDef {
    /// Create an empty group with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            group_name: name.trim().to_string(),
            ..Self::default()
        }
    }
}

/// A legacy canvas document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub document_title: String,

    #[serde(default)]
    pub section_defaults: SectionDefaults,

    /// Per-document display overrides, keyed by tool name
    #[serde(default)]
    pub tools_config: BTreeMap<String, DisplayMeta>,

    pub agent_groups: Vec<GroupDef>,
}

impl Document {
    /// Serialize the document back to its YAML form.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Parse and normalize a serialized legacy document.
pub fn parse_document(text: &str) -> Result<Document> {
    let raw: serde_yaml::Value = serde_yaml::from_str(text)?;
    normalize(&raw)
}

/// Validate a raw legacy document, fill structural defaults, and allocate
/// group identifiers and sequence numbers.
///
/// Fails on the first violation found, with a field-qualified message.
/// Validation order follows the document: root shape, `agentGroups`
/// presence, then each group and its agents in order.
pub fn normalize(raw: &serde_yaml::Value) -> Result<Document> {
    let root = schema::as_mapping(raw)?;

    let document_title = schema::opt_string(root, "documentTitle", "")?;
    let section_defaults = decode_section_defaults(root)?;
    let tools_config = decode_tools_config(root)?;

    let groups_value = schema::field(root, "agentGroups")
        .ok_or_else(|| Error::Validation("agentGroups: required and must be a list".to_string()))?;
    let raw_groups = groups_value.as_sequence().ok_or_else(|| {
        Error::Validation(format!(
            "agentGroups: must be a list, found {}",
            schema::kind(groups_value)
        ))
    })?;

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut agent_groups = Vec::with_capacity(raw_groups.len());
    for (i, raw_group) in raw_groups.iter().enumerate() {
        let path = format!("agentGroups[{i}]");
        let mut group = schema::decode_group(raw_group, &path)?;

        if group.group_number.is_none() {
            group.group_number = Some(i as u32);
        }
        let id = ident::derive_id(&group.group_name, &seen_ids, group.group_id.as_deref());
        seen_ids.insert(id.clone());
        group.group_id = Some(id);

        for (j, agent) in group.agents.iter_mut().enumerate() {
            if agent.agent_number.is_none() {
                agent.agent_number = Some(ident::assign_number(None, None, j));
            }
        }
        agent_groups.push(group);
    }

    Ok(Document {
        document_title,
        section_defaults,
        tools_config,
        agent_groups,
    })
}

fn decode_section_defaults(root: &serde_yaml::Mapping) -> Result<SectionDefaults> {
    let fallback = SectionDefaults::default();
    let value = match schema::field(root, "sectionDefaults") {
        None => return Ok(fallback),
        Some(v) if v.is_null() => return Ok(fallback),
        Some(v) => v,
    };
    let map = value.as_mapping().ok_or_else(|| {
        Error::Validation(format!(
            "sectionDefaults: must be an object, found {}",
            schema::kind(value)
        ))
    })?;
    Ok(SectionDefaults {
        icon: schema::opt_string_or(map, "icon", "sectionDefaults", &fallback.icon)?,
        show_in_flow: schema::opt_bool(map, "showInFlow", "sectionDefaults")?
            .unwrap_or(fallback.show_in_flow),
        is_support: schema::opt_bool(map, "isSupport", "sectionDefaults")?
            .unwrap_or(fallback.is_support),
    })
}

fn decode_tools_config(root: &serde_yaml::Mapping) -> Result<BTreeMap<String, DisplayMeta>> {
    let value = match schema::field(root, "toolsConfig") {
        None => return Ok(BTreeMap::new()),
        Some(v) if v.is_null() => return Ok(BTreeMap::new()),
        Some(v) => v,
    };
    let map = value.as_mapping().ok_or_else(|| {
        Error::Validation(format!(
            "toolsConfig: must be an object, found {}",
            schema::kind(value)
        ))
    })?;

    let mut config = BTreeMap::new();
    for (key, entry) in map {
        let name = key.as_str().ok_or_else(|| {
            Error::Validation("toolsConfig: keys must be strings".to_string())
        })?;
        let path = format!("toolsConfig.{name}");
        let meta = schema::decode_display_meta(entry, &path, name)?;
        config.insert(name.to_string(), meta);
    }
    Ok(config)
}
