//! Grouping engine.
//!
//! Partitions a flat agent collection into ordered groups keyed by a chosen
//! tag dimension. Grouping is a pure derivation: groups are value objects
//! recomputed on every pass, source agents are never mutated, and identical
//! input always yields identical output order.

pub mod debounce;
pub mod filter;

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::dimension::{self, DEFAULT_DIMENSION};
use crate::display::{self, GROUP_COLORS};
use crate::ident;
use crate::models::{Agent, Group};

/// Icon used for default-dimension groups, which have no display registry.
const DEFAULT_GROUP_ICON: &str = "layers";

/// Partition agents into ordered groups by the given dimension.
///
/// Soft-deleted agents are skipped. The first occurrence of a value creates
/// its group: default-dimension groups cycle the fixed color palette in
/// creation order and take their order from the creating agent's own order
/// hint (falling back to the creation index); other dimensions take display
/// metadata from the display adapter and their order from the dimension's
/// vocabulary rank. Groups are then sorted by order (stable on ties) and
/// each group's agents by their order within the group.
pub fn group_by(agents: &[Agent], dimension: &str) -> Vec<Group> {
    let is_default = dimension == DEFAULT_DIMENSION;
    let mut groups: Vec<Group> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut used_ids: HashSet<String> = HashSet::new();

    for agent in agents.iter().filter(|a| !a.is_deleted()) {
        let value = dimension::resolve_or_default(agent, dimension);
        let idx = match index_of.get(&value) {
            Some(&idx) => idx,
            None => {
                let creation_index = groups.len();
                let id = ident::derive_id(&value, &used_ids, None);
                used_ids.insert(id.clone());

                let (color, icon, order) = if is_default {
                    // Color depends only on first-seen order, not on value
                    // identity.
                    let color = GROUP_COLORS[creation_index % GROUP_COLORS.len()];
                    let order = agent.phase_order.unwrap_or(creation_index as u32);
                    (color.to_string(), DEFAULT_GROUP_ICON.to_string(), order)
                } else {
                    let meta = display::display_for(dimension, &value);
                    (meta.color, meta.icon, dimension::vocab_rank(dimension, &value))
                };

                groups.push(Group {
                    id,
                    label: value.clone(),
                    color,
                    icon,
                    order,
                    items: Vec::new(),
                    item_count: 0,
                });
                index_of.insert(value, creation_index);
                creation_index
            }
        };
        groups[idx].items.push(agent.clone());
    }

    groups.sort_by_key(|g| g.order);
    for group in &mut groups {
        group.items.sort_by_key(|a| a.agent_order.unwrap_or(0));
        group.item_count = group.items.len();
    }

    debug!(dimension, groups = groups.len(), "grouping pass complete");
    groups
}
