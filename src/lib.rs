//! Agentdeck - catalog and grouping engine for multi-tenant agent canvases.
//!
//! This library is the reconciliation core behind a canvas editor that
//! displays named work items ("agents") in labeled groups. It provides:
//! - Stable slug and sequence-number allocation (`ident`)
//! - Display metadata lookup with safe fallbacks (`display`)
//! - Deterministic grouping by arbitrary tag dimension (`engine`)
//! - Composable filters and debounced text search (`engine::filter`)
//! - A dual-view (form/text) edit session state machine (`session`)
//! - Legacy nested-document import and export (`legacy`)
//! - The flat record store interface and an in-memory implementation (`store`)
//!
//! Rendering, transport, authentication, and the production record store are
//! external collaborators; this crate only defines the store seam it needs.

pub mod dimension;
pub mod display;
pub mod engine;
pub mod ident;
pub mod legacy;
pub mod models;
pub mod schema;
pub mod session;
pub mod store;

/// Library-level error type for agentdeck operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("shape error: {0}")]
    Shape(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),
}

/// Result type alias for agentdeck operations.
pub type Result<T> = std::result::Result<T, Error>;
