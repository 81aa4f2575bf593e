//! Typed decoders over parsed YAML values.
//!
//! Both the legacy document normalizer and the dual-view edit session
//! validate untrusted parsed text through this one layer, so shape and type
//! violations produce the same field-qualified messages everywhere. Every
//! helper takes the dotted/indexed path of the value being decoded and
//! reports the first violation found; no helper partially mutates a target.

use serde_yaml::{Mapping, Value};

use crate::display::{DisplayMeta, GENERIC_ICON, NEUTRAL_COLOR};
use crate::legacy::{AgentDef, GroupDef};
use crate::models::{AgentMetrics, RoiTier};
use crate::{Error, Result};

/// Human-readable name for a YAML value's kind, used in error messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "an object",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Require a value to be a single object (YAML mapping).
pub fn as_mapping(value: &Value) -> Result<&Mapping> {
    value.as_mapping().ok_or_else(|| {
        Error::Shape(format!("expected a single object, found {}", kind(value)))
    })
}

/// Fetch a field from a mapping by string key.
pub fn field<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(&Value::String(key.to_string()))
}

fn at(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Required non-empty string field; returned trimmed.
pub fn req_string(map: &Mapping, key: &str, path: &str) -> Result<String> {
    match field(map, key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(value) if !value.is_null() && !value.is_string() => Err(Error::Validation(format!(
            "{}: must be a string, found {}",
            at(path, key),
            kind(value)
        ))),
        _ => Err(Error::Validation(format!(
            "{}: required and must be a non-empty string",
            at(path, key)
        ))),
    }
}

/// Optional string field defaulting to the empty string.
pub fn opt_string(map: &Mapping, key: &str, path: &str) -> Result<String> {
    opt_string_or(map, key, path, "")
}

/// Optional string field with an explicit default.
pub fn opt_string_or(map: &Mapping, key: &str, path: &str, default: &str) -> Result<String> {
    Ok(opt_string_field(map, key, path)?.unwrap_or_else(|| default.to_string()))
}

/// Optional string field that stays absent when missing.
pub fn opt_string_field(map: &Mapping, key: &str, path: &str) -> Result<Option<String>> {
    match field(map, key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(value) => Err(Error::Validation(format!(
            "{}: must be a string, found {}",
            at(path, key),
            kind(value)
        ))),
    }
}

/// Optional list-of-strings field defaulting to empty.
pub fn opt_string_list(map: &Mapping, key: &str, path: &str) -> Result<Vec<String>> {
    let value = match field(map, key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(value) => value,
    };
    let seq = value.as_sequence().ok_or_else(|| {
        Error::Validation(format!(
            "{}: must be a list, found {}",
            at(path, key),
            kind(value)
        ))
    })?;
    let mut out = Vec::with_capacity(seq.len());
    for (i, item) in seq.iter().enumerate() {
        let s = item.as_str().ok_or_else(|| {
            Error::Validation(format!(
                "{}[{i}]: must be a string, found {}",
                at(path, key),
                kind(item)
            ))
        })?;
        out.push(s.to_string());
    }
    Ok(out)
}

/// Optional numeric field.
pub fn opt_u32(map: &Mapping, key: &str, path: &str) -> Result<Option<u32>> {
    match field(map, key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|n| Some(n as u32))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "{}: must be a non-negative whole number",
                    at(path, key)
                ))
            }),
        Some(value) => Err(Error::Validation(format!(
            "{}: must be a number, found {}",
            at(path, key),
            kind(value)
        ))),
    }
}

/// Optional boolean field.
pub fn opt_bool(map: &Mapping, key: &str, path: &str) -> Result<Option<bool>> {
    match field(map, key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(value) => Err(Error::Validation(format!(
            "{}: must be a boolean, found {}",
            at(path, key),
            kind(value)
        ))),
    }
}

/// Decode a `toolsConfig` entry. Missing sub-fields fall back to the tool
/// name and the neutral display defaults.
pub fn decode_display_meta(value: &Value, path: &str, name: &str) -> Result<DisplayMeta> {
    let map = value.as_mapping().ok_or_else(|| {
        Error::Validation(format!("{path}: must be an object, found {}", kind(value)))
    })?;
    Ok(DisplayMeta {
        label: opt_string_or(map, "label", path, name)?,
        color: opt_string_or(map, "color", path, NEUTRAL_COLOR)?,
        icon: opt_string_or(map, "icon", path, GENERIC_ICON)?,
    })
}

/// Decode an agent's metrics.
///
/// Two historical shapes exist: the display triple
/// `{usageThisWeek, timeSaved, roiContribution}` and the numeric backend
/// pair `{adoption, satisfaction}`. The shape is guessed from which keys
/// are present; numeric values are formatted into the display strings, so
/// round-tripping through the numeric shape loses the raw numbers.
pub fn decode_metrics(value: &Value, path: &str) -> Result<AgentMetrics> {
    let map = value.as_mapping().ok_or_else(|| {
        Error::Validation(format!("{path}: must be an object, found {}", kind(value)))
    })?;

    let mut metrics = AgentMetrics::default();
    if field(map, "usageThisWeek").is_some()
        || field(map, "timeSaved").is_some()
        || field(map, "roiContribution").is_some()
    {
        metrics.usage_this_week = opt_string(map, "usageThisWeek", path)?;
        metrics.time_saved = opt_string(map, "timeSaved", path)?;
        metrics.roi_tier = decode_roi_tier(map, "roiContribution", path)?.unwrap_or_default();
    } else {
        if let Some(n) = opt_f64(map, "adoption", path)? {
            metrics.usage_this_week = format!("{}%", format_number(n));
        }
        if let Some(n) = opt_f64(map, "satisfaction", path)? {
            metrics.time_saved = format_number(n);
        }
    }
    Ok(metrics)
}

fn decode_roi_tier(map: &Mapping, key: &str, path: &str) -> Result<Option<RoiTier>> {
    match opt_string_field(map, key, path)? {
        None => Ok(None),
        Some(s) => RoiTier::parse(&s).map(Some).ok_or_else(|| {
            Error::Validation(format!(
                "{}: must be one of \"Very High\", \"High\", \"Medium\", \"Low\"",
                at(path, key)
            ))
        }),
    }
}

fn opt_f64(map: &Mapping, key: &str, path: &str) -> Result<Option<f64>> {
    match field(map, key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(value) => Err(Error::Validation(format!(
            "{}: must be a number, found {}",
            at(path, key),
            kind(value)
        ))),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Decode an agent entry at the given path.
///
/// Applies the documented defaults for optional fields; leaves the
/// sequence number absent when the source omits it.
pub fn decode_agent(value: &Value, path: &str) -> Result<AgentDef> {
    let map = value.as_mapping().ok_or_else(|| {
        Error::Validation(format!("{path}: must be an object, found {}", kind(value)))
    })?;

    let name = req_string(map, "name", path)?;
    let agent_number = opt_u32(map, "agentNumber", path)?;
    let objective = opt_string(map, "objective", path)?;
    let description = opt_string(map, "description", path)?;
    let tools = opt_string_list(map, "tools", path)?;
    let journey_steps = opt_string_list(map, "journeySteps", path)?;
    let demo_link = opt_string_field(map, "demoLink", path)?;
    let video_link = opt_string_field(map, "videoLink", path)?;

    let mut metrics = match field(map, "metrics") {
        None | Some(Value::Null) => AgentMetrics::default(),
        Some(value) => decode_metrics(value, &at(path, "metrics"))?,
    };
    // Backend records hoist the ROI tier to a sibling of `metrics`.
    if let Some(tier) = decode_roi_tier(map, "roiContribution", path)? {
        metrics.roi_tier = tier;
    }

    Ok(AgentDef {
        name,
        agent_number,
        objective,
        description,
        tools,
        journey_steps,
        demo_link,
        video_link,
        metrics,
    })
}

/// Decode a group entry at the given path.
///
/// Identifier and sequence-number allocation are the normalizer's job; this
/// only validates shape and types.
pub fn decode_group(value: &Value, path: &str) -> Result<GroupDef> {
    let map = value.as_mapping().ok_or_else(|| {
        Error::Validation(format!("{path}: must be an object, found {}", kind(value)))
    })?;

    let group_name = req_string(map, "groupName", path)?;
    let group_number = opt_u32(map, "groupNumber", path)?;
    let group_id = opt_string_field(map, "groupId", path)?;
    let phase_tag = opt_string_field(map, "phaseTag", path)?;

    let agents_value = field(map, "agents").ok_or_else(|| {
        Error::Validation(format!(
            "{}: required and must be a list",
            at(path, "agents")
        ))
    })?;
    let raw_agents = agents_value.as_sequence().ok_or_else(|| {
        Error::Validation(format!(
            "{}: must be a list, found {}",
            at(path, "agents"),
            kind(agents_value)
        ))
    })?;
    let mut agents = Vec::with_capacity(raw_agents.len());
    for (j, raw_agent) in raw_agents.iter().enumerate() {
        agents.push(decode_agent(raw_agent, &format!("{}[{j}]", at(path, "agents")))?);
    }

    Ok(GroupDef {
        group_id,
        group_name,
        group_number,
        phase_tag,
        agents,
    })
}
