//! Data models for agentdeck entities.
//!
//! This module defines the core data structures:
//! - `Agent` - A named work item displayed on a canvas
//! - `AgentMetrics` - Usage and ROI display metrics for an agent
//! - `RoiTier` - ROI contribution tier
//! - `Group` - Derived, ordered bucket of agents sharing a dimension value
//!
//! All wire-facing types serialize with camelCase field names to match the
//! backend record schema and the legacy document schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ROI contribution tier for an agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoiTier {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    #[default]
    Medium,
    Low,
}

impl RoiTier {
    /// Parse from string, matching the display form used on the wire.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Very High" => Some(RoiTier::VeryHigh),
            "High" => Some(RoiTier::High),
            "Medium" => Some(RoiTier::Medium),
            "Low" => Some(RoiTier::Low),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoiTier::VeryHigh => "Very High",
            RoiTier::High => "High",
            RoiTier::Medium => "Medium",
            RoiTier::Low => "Low",
        }
    }
}

impl std::fmt::Display for RoiTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display-facing usage metrics for an agent.
///
/// The string fields hold already-formatted values (e.g. "1.2k runs",
/// "4h/week"); the backend's numeric metrics shape is bridged into this one
/// by the schema decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMetrics {
    /// Formatted usage figure for the current week
    #[serde(default)]
    pub usage_this_week: String,

    /// Formatted time-saved figure
    #[serde(default)]
    pub time_saved: String,

    /// ROI contribution tier
    #[serde(rename = "roiContribution", default)]
    pub roi_tier: RoiTier,
}

/// A named work item displayed on a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique record identifier, assigned by the store
    pub id: String,

    /// Canvas this agent belongs to
    pub canvas_id: String,

    /// Agent name (required, non-empty, trimmed)
    pub name: String,

    /// What the agent is for
    #[serde(default)]
    pub objective: String,

    /// Longer description
    #[serde(default)]
    pub description: String,

    /// Tool names used by the agent, in display order
    #[serde(default)]
    pub tools: Vec<String>,

    /// Steps of the agent's user journey, in display order
    #[serde(default)]
    pub journey_steps: Vec<String>,

    /// Link to a demo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,

    /// Link to a walkthrough video
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,

    /// Usage and ROI metrics
    #[serde(default)]
    pub metrics: AgentMetrics,

    /// Tag dimension values keyed by dimension id (e.g. department, status)
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// Value of the default grouping dimension; empty means unset
    #[serde(default)]
    pub phase: String,

    /// Order hint for the agent's phase group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_order: Option<u32>,

    /// Order within the phase group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_order: Option<u32>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Soft-delete timestamp; set agents are excluded from grouping and
    /// search but retained for audit history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Agent {
    /// Create a new agent on the given canvas.
    ///
    /// The name is trimmed; the store assigns the final id on create, so a
    /// fresh agent starts with an empty one.
    pub fn new(canvas_id: impl Into<String>, name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            canvas_id: canvas_id.into(),
            name: name.trim().to_string(),
            objective: String::new(),
            description: String::new(),
            tools: Vec::new(),
            journey_steps: Vec::new(),
            demo_link: None,
            video_link: None,
            metrics: AgentMetrics::default(),
            tags: BTreeMap::new(),
            phase: String::new(),
            phase_order: None,
            agent_order: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Whether this agent has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Bump the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A derived, ordered bucket of agents sharing a resolved dimension value.
///
/// Groups are value objects recomputed on every grouping pass; they are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Identifier unique within one grouping pass
    pub id: String,

    /// Display label (the resolved dimension value)
    pub label: String,

    /// Display color
    pub color: String,

    /// Display icon
    pub icon: String,

    /// Sort order; total across the pass, ties broken by creation order
    pub order: u32,

    /// Member agents, ordered by their order within the group
    pub items: Vec<Agent>,

    /// Number of member agents
    pub item_count: usize,
}
