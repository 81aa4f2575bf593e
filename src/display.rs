//! Display metadata lookup for tags, tools, and metrics.
//!
//! This module maps raw attribute values to presentation metadata (label,
//! color, icon). Lookups are pure and never fail: unknown values resolve to
//! a neutral fallback so the rendering layer can always draw something.
//!
//! Tool-like keys are normalized (lowercase, spaces to hyphens) before the
//! lookup; arbitrary tag dimensions are matched by exact id.

use serde::{Deserialize, Serialize};

/// Presentation metadata for one raw attribute value.
///
/// Also the value type of the legacy document's `toolsConfig` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMeta {
    pub label: String,
    pub color: String,
    pub icon: String,
}

impl DisplayMeta {
    fn new(label: &str, color: &str, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Neutral color used when a value has no registered metadata.
pub const NEUTRAL_COLOR: &str = "#9CA3AF";

/// Generic icon used when a value has no registered metadata.
pub const GENERIC_ICON: &str = "tag";

/// Ordered color palette cycled over default-dimension groups, indexed by
/// each group's creation order within a grouping pass.
pub const GROUP_COLORS: &[&str] = &[
    "#3B82F6", // blue
    "#8B5CF6", // violet
    "#10B981", // emerald
    "#F59E0B", // amber
    "#EF4444", // red
    "#06B6D4", // cyan
    "#EC4899", // pink
    "#84CC16", // lime
];

/// Look up display metadata for a raw value of the given dimension.
///
/// Known dimensions: `tools` (normalized keys), `status` and `roi` (exact
/// keys). Anything else, and any unknown value, falls back to the raw value
/// as label with neutral color and a generic icon.
pub fn display_for(dimension: &str, raw: &str) -> DisplayMeta {
    let found = match dimension {
        "tools" | "tool" => tool_meta(&normalize_tool_key(raw)),
        "status" => status_meta(raw),
        "roi" => roi_meta(raw),
        _ => None,
    };
    found.unwrap_or_else(|| DisplayMeta::new(raw, NEUTRAL_COLOR, GENERIC_ICON))
}

/// Normalize a tool name into its registry key: lowercase, spaces to hyphens.
pub fn normalize_tool_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "-")
}

fn tool_meta(key: &str) -> Option<DisplayMeta> {
    let (label, color, icon) = match key {
        "slack" => ("Slack", "#611F69", "message-square"),
        "jira" => ("Jira", "#0052CC", "kanban"),
        "github" => ("GitHub", "#24292F", "git-branch"),
        "salesforce" => ("Salesforce", "#00A1E0", "cloud"),
        "zendesk" => ("Zendesk", "#03363D", "headphones"),
        "notion" => ("Notion", "#111111", "file-text"),
        "gmail" => ("Gmail", "#EA4335", "mail"),
        "google-sheets" => ("Google Sheets", "#188038", "table"),
        "confluence" => ("Confluence", "#172B4D", "book-open"),
        "workday" => ("Workday", "#F68D2E", "briefcase"),
        _ => return None,
    };
    Some(DisplayMeta::new(label, color, icon))
}

fn status_meta(key: &str) -> Option<DisplayMeta> {
    let (label, color, icon) = match key {
        "active" => ("Active", "#10B981", "check-circle"),
        "draft" => ("Draft", "#F59E0B", "pencil"),
        "paused" => ("Paused", "#9CA3AF", "pause-circle"),
        "retired" => ("Retired", "#6B7280", "archive"),
        _ => return None,
    };
    Some(DisplayMeta::new(label, color, icon))
}

fn roi_meta(key: &str) -> Option<DisplayMeta> {
    let (label, color, icon) = match key {
        "Very High" => ("Very High", "#059669", "trending-up"),
        "High" => ("High", "#10B981", "trending-up"),
        "Medium" => ("Medium", "#F59E0B", "minus"),
        "Low" => ("Low", "#9CA3AF", "trending-down"),
        _ => return None,
    };
    Some(DisplayMeta::new(label, color, icon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_lookup_normalizes_key() {
        let meta = display_for("tools", "  Google Sheets ");
        assert_eq!(meta.label, "Google Sheets");
        assert_eq!(meta.color, "#188038");

        let meta = display_for("tools", "SLACK");
        assert_eq!(meta.label, "Slack");
    }

    #[test]
    fn test_unknown_tool_falls_back() {
        let meta = display_for("tools", "Homegrown CRM");
        assert_eq!(meta.label, "Homegrown CRM");
        assert_eq!(meta.color, NEUTRAL_COLOR);
        assert_eq!(meta.icon, GENERIC_ICON);
    }

    #[test]
    fn test_status_is_exact_match() {
        assert_eq!(display_for("status", "active").label, "Active");
        // No normalization for tag dimensions
        assert_eq!(display_for("status", "Active").color, NEUTRAL_COLOR);
    }

    #[test]
    fn test_unknown_dimension_falls_back() {
        let meta = display_for("department", "Finance");
        assert_eq!(meta.label, "Finance");
        assert_eq!(meta.color, NEUTRAL_COLOR);
    }

    #[test]
    fn test_roi_tiers_have_metadata() {
        for tier in ["Very High", "High", "Medium", "Low"] {
            let meta = display_for("roi", tier);
            assert_eq!(meta.label, tier);
            assert_ne!(meta.color, NEUTRAL_COLOR);
        }
    }

    #[test]
    fn test_palette_is_nonempty_and_distinct() {
        assert!(!GROUP_COLORS.is_empty());
        let mut seen = std::collections::HashSet::new();
        for color in GROUP_COLORS {
            assert!(seen.insert(color));
        }
    }
}
