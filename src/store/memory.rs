//! In-memory store implementation.

use std::collections::HashMap;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::models::Agent;
use crate::store::CanvasStore;
use crate::{Error, Result};

/// HashMap-backed [`CanvasStore`] for tests and local mirroring.
///
/// `delete` is a soft delete: the record stays listed with `deleted_at`
/// set, and downstream grouping/search exclude it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, Agent>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a single record by id.
    pub fn get(&self, id: &str) -> Result<Agent> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("agent not found: {id}")))
    }

    fn insert_with_id(&mut self, agent: &Agent) -> String {
        let mut record = agent.clone();
        if record.id.trim().is_empty() {
            record.id = Uuid::new_v4().to_string();
        }
        let now = Utc::now();
        record.created_at = now;
        record.updated_at = now;
        let id = record.id.clone();
        self.records.insert(id.clone(), record);
        id
    }
}

impl CanvasStore for MemoryStore {
    fn list(&self, canvas_id: &str) -> Result<Vec<Agent>> {
        let mut agents: Vec<Agent> = self
            .records
            .values()
            .filter(|a| a.canvas_id == canvas_id)
            .cloned()
            .collect();
        agents.sort_by(|a, b| {
            (a.phase_order, a.agent_order, &a.name, &a.id)
                .cmp(&(b.phase_order, b.agent_order, &b.name, &b.id))
        });
        Ok(agents)
    }

    fn create(&mut self, agent: &Agent) -> Result<String> {
        if agent.name.trim().is_empty() {
            return Err(Error::Validation(
                "name: required and must be a non-empty string".to_string(),
            ));
        }
        if !agent.id.trim().is_empty() && self.records.contains_key(&agent.id) {
            return Err(Error::Store(format!("duplicate record id: {}", agent.id)));
        }
        Ok(self.insert_with_id(agent))
    }

    fn update(&mut self, id: &str, patch: &serde_json::Value) -> Result<()> {
        let record = self
            .records
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("agent not found: {id}")))?;

        let patch_map = match patch.as_object() {
            Some(map) => map,
            None => {
                warn!(id, "rejected non-object patch");
                return Err(Error::Store("update patch must be a JSON object".to_string()));
            }
        };

        // Merge onto the serialized record, then decode back; a patch that
        // breaks the record's shape fails here and leaves it untouched.
        let mut merged = serde_json::to_value(record)?;
        let merged_map = merged
            .as_object_mut()
            .ok_or_else(|| Error::Store("record did not serialize as an object".to_string()))?;
        for (key, value) in patch_map {
            merged_map.insert(key.clone(), value.clone());
        }
        let mut updated: Agent = serde_json::from_value(merged)?;
        if updated.name.trim().is_empty() {
            return Err(Error::Validation(
                "name: required and must be a non-empty string".to_string(),
            ));
        }
        updated.id = id.to_string();
        updated.touch();
        self.records.insert(id.to_string(), updated);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("agent not found: {id}")))?;
        record.deleted_at = Some(Utc::now());
        record.touch();
        Ok(())
    }

    fn bulk_replace(&mut self, canvas_id: &str, agents: &[Agent]) -> Result<()> {
        self.records.retain(|_, a| a.canvas_id != canvas_id);
        for agent in agents {
            let mut record = agent.clone();
            record.canvas_id = canvas_id.to_string();
            self.insert_with_id(&record);
        }
        Ok(())
    }
}
