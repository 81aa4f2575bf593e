//! Flat record store interface.
//!
//! The production record store is an external collaborator; this module
//! defines the seam the engine needs from it, plus an in-memory
//! implementation used by tests and as a local mirror:
//! - `CanvasStore` - CRUD per canvas, with bulk replace for legacy import
//! - `MemoryStore` - HashMap-backed reference implementation
//!
//! Store failures are surfaced to the caller verbatim and never retried;
//! a failed write leaves in-memory state as it was.

pub mod memory;

pub use memory::MemoryStore;

use crate::models::Agent;
use crate::Result;

/// Backend record store for agents, keyed by canvas and record id.
///
/// `bulk_replace` must substitute a canvas's whole record set atomically
/// from the caller's perspective; the legacy import path relies on that to
/// avoid partially-applied imports.
pub trait CanvasStore: Send + Sync {
    /// List all records for a canvas, including soft-deleted ones.
    fn list(&self, canvas_id: &str) -> Result<Vec<Agent>>;

    /// Create a record, assigning an id if the agent has none. Returns the
    /// record id.
    fn create(&mut self, agent: &Agent) -> Result<String>;

    /// Apply a partial update to a record. The patch is a JSON object whose
    /// top-level keys replace the record's corresponding fields.
    fn update(&mut self, id: &str, patch: &serde_json::Value) -> Result<()>;

    /// Soft-delete a record, retaining it for audit history.
    fn delete(&mut self, id: &str) -> Result<()>;

    /// Replace a canvas's whole record set.
    fn bulk_replace(&mut self, canvas_id: &str, agents: &[Agent]) -> Result<()>;
}
