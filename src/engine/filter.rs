//! Filters and text search over agent collections.
//!
//! A filter map is a conjunction of per-dimension allow-lists; search is a
//! case-insensitive substring match over a fixed set of text fields. Both
//! operations return fresh vectors and never mutate their input, so they
//! compose in either order.

use std::collections::BTreeMap;

use crate::dimension;
use crate::models::Agent;

/// Allow-lists of dimension values, keyed by dimension id.
///
/// An empty or absent allow-list for a dimension is a no-op for that
/// dimension.
pub type FilterMap = BTreeMap<String, Vec<String>>;

/// Keep agents whose resolved value for every filtered dimension is in that
/// dimension's allow-list.
///
/// Soft-deleted agents are always excluded. Agents missing a value for a
/// filtered dimension are excluded as well.
pub fn apply_filters(agents: &[Agent], filters: &FilterMap) -> Vec<Agent> {
    agents
        .iter()
        .filter(|a| !a.is_deleted())
        .filter(|a| matches_filters(a, filters))
        .cloned()
        .collect()
}

fn matches_filters(agent: &Agent, filters: &FilterMap) -> bool {
    filters
        .iter()
        .filter(|(_, allowed)| !allowed.is_empty())
        .all(|(dim, allowed)| {
            dimension::resolve(agent, dim)
                .map(|value| allowed.contains(&value))
                .unwrap_or(false)
        })
}

/// Case-insensitive substring search across name, objective, description,
/// and joined tool names.
///
/// An empty or whitespace-only query is a no-op returning the input
/// elements unchanged.
pub fn search(agents: &[Agent], query: &str) -> Vec<Agent> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return agents.to_vec();
    }
    agents
        .iter()
        .filter(|a| !a.is_deleted())
        .filter(|a| searchable_text(a).contains(&query))
        .cloned()
        .collect()
}

fn searchable_text(agent: &Agent) -> String {
    format!(
        "{} {} {} {}",
        agent.name,
        agent.objective,
        agent.description,
        agent.tools.join(" ")
    )
    .to_lowercase()
}

/// Apply filters, then search: the canonical composition used ahead of a
/// grouping pass.
pub fn refine(agents: &[Agent], filters: &FilterMap, query: &str) -> Vec<Agent> {
    search(&apply_filters(agents, filters), query)
}
