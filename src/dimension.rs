//! Dimension registry.
//!
//! A dimension is a named categorical attribute of an agent usable as a
//! grouping or filter key. Each registered dimension carries a resolver, an
//! ordered vocabulary (used to rank groups), and a default value for agents
//! missing the attribute. Dimension ids not in the registry resolve through
//! the agent's tag map, so adding a dimension never touches the grouping or
//! filter control flow.

use crate::models::Agent;

/// The default grouping dimension.
pub const DEFAULT_DIMENSION: &str = "phase";

/// Value substituted when an agent has no value for the default dimension.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Value substituted when an agent has no value for a non-default dimension.
pub const UNASSIGNED: &str = "unassigned";

/// Rank assigned to values not present in a dimension's vocabulary; sorts
/// after every ranked value.
pub const UNRANKED: u32 = u32::MAX;

/// A registered categorical attribute of an agent.
pub struct Dimension {
    /// Registry key, as used in filter maps and `group_by` calls
    pub id: &'static str,

    /// Value used for agents missing this attribute
    pub default_value: &'static str,

    /// Ordered vocabulary; position decides group order for this dimension
    pub vocabulary: &'static [&'static str],

    resolver: fn(&Agent) -> Option<String>,
}

impl Dimension {
    /// Position of `value` in the vocabulary, or [`UNRANKED`].
    pub fn vocab_rank(&self, value: &str) -> u32 {
        self.vocabulary
            .iter()
            .position(|v| *v == value)
            .map(|p| p as u32)
            .unwrap_or(UNRANKED)
    }
}

fn resolve_phase(agent: &Agent) -> Option<String> {
    let phase = agent.phase.trim();
    if phase.is_empty() {
        None
    } else {
        Some(phase.to_string())
    }
}

fn resolve_department(agent: &Agent) -> Option<String> {
    agent.tags.get("department").cloned()
}

fn resolve_status(agent: &Agent) -> Option<String> {
    agent.tags.get("status").cloned()
}

fn resolve_roi(agent: &Agent) -> Option<String> {
    Some(agent.metrics.roi_tier.as_str().to_string())
}

static DIMENSIONS: &[Dimension] = &[
    Dimension {
        id: "phase",
        default_value: UNCATEGORIZED,
        vocabulary: &[],
        resolver: resolve_phase,
    },
    Dimension {
        id: "department",
        default_value: UNASSIGNED,
        vocabulary: &[
            "Engineering",
            "Sales",
            "Marketing",
            "Finance",
            "Operations",
            "Support",
            "HR",
        ],
        resolver: resolve_department,
    },
    Dimension {
        id: "status",
        default_value: UNASSIGNED,
        vocabulary: &["active", "draft", "paused", "retired"],
        resolver: resolve_status,
    },
    Dimension {
        id: "roi",
        default_value: UNASSIGNED,
        vocabulary: &["Very High", "High", "Medium", "Low"],
        resolver: resolve_roi,
    },
];

/// Look up a registered dimension by id.
pub fn lookup(id: &str) -> Option<&'static Dimension> {
    DIMENSIONS.iter().find(|d| d.id == id)
}

/// Resolve an agent's value for a dimension, if it has one.
///
/// Unregistered dimension ids read the agent's tag map by exact key.
pub fn resolve(agent: &Agent, dimension: &str) -> Option<String> {
    match lookup(dimension) {
        Some(dim) => (dim.resolver)(agent),
        None => agent.tags.get(dimension).cloned(),
    }
}

/// Resolve an agent's value for a dimension, substituting the dimension's
/// default for missing values.
pub fn resolve_or_default(agent: &Agent, dimension: &str) -> String {
    resolve(agent, dimension).unwrap_or_else(|| {
        lookup(dimension)
            .map(|d| d.default_value)
            .unwrap_or(UNASSIGNED)
            .to_string()
    })
}

/// Rank a value within a dimension's vocabulary. Unregistered dimensions
/// have no vocabulary, so every value is [`UNRANKED`].
pub fn vocab_rank(dimension: &str, value: &str) -> u32 {
    lookup(dimension)
        .map(|d| d.vocab_rank(value))
        .unwrap_or(UNRANKED)
}
