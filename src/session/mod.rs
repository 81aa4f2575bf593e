//! Dual-view edit sessions.
//!
//! One session edits one entity (an agent entry or a whole group) through
//! two interchangeable views: structured form fields and a serialized YAML
//! text representation of the same draft. Every transition between views is
//! gated by validation, so a failed switch leaves the prior view
//! authoritative and its buffers untouched.
//!
//! Sessions are plain caller-owned values. Dropping one cancels it;
//! [`EditSession::commit`] consumes it, so a committed draft cannot be
//! reused.

use serde::Serialize;
use tracing::debug;

use crate::legacy::{AgentDef, GroupDef};
use crate::{ident, schema, Error, Result};

/// The view currently backing an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Structured form fields are authoritative
    Form,
    /// The serialized text buffer is authoritative
    Text,
}

/// An entity that can be edited through a dual-view session.
pub trait Draftable: Clone + Serialize {
    /// Fresh draft for a "new entity" session.
    fn template() -> Self;

    /// Gate for extracting the draft from form fields. Failures block the
    /// transition but are recoverable by correcting the form.
    fn validate(&self) -> Result<()>;

    /// Decode a draft from the parsed text view.
    fn decode(value: &serde_yaml::Value) -> Result<Self>;

    /// The entity's running sequence number, if it carries one.
    fn number(&self) -> Option<u32>;

    /// Set the running sequence number.
    fn set_number(&mut self, number: u32);
}

impl Draftable for AgentDef {
    fn template() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(
                "name: required and must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }

    fn decode(value: &serde_yaml::Value) -> Result<Self> {
        schema::decode_agent(value, "")
    }

    fn number(&self) -> Option<u32> {
        self.agent_number
    }

    fn set_number(&mut self, number: u32) {
        self.agent_number = Some(number);
    }
}

impl Draftable for GroupDef {
    fn template() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.group_name.trim().is_empty() {
            return Err(Error::Validation(
                "groupName: required and must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }

    fn decode(value: &serde_yaml::Value) -> Result<Self> {
        schema::decode_group(value, "")
    }

    fn number(&self) -> Option<u32> {
        self.group_number
    }

    fn set_number(&mut self, number: u32) {
        self.group_number = Some(number);
    }
}

enum Target {
    New,
    Existing(usize),
}

/// A single open edit session over one draft entity.
pub struct EditSession<T: Draftable> {
    target: Target,
    draft: T,
    form: T,
    text: String,
    view: View,
}

impl<T: Draftable> EditSession<T> {
    /// Open a session for a new entity, starting from the template.
    pub fn new_entity() -> Self {
        let draft = T::template();
        Self {
            target: Target::New,
            form: draft.clone(),
            draft,
            text: String::new(),
            view: View::Form,
        }
    }

    /// Open a session editing the entity at `index`, as a deep copy.
    pub fn edit(index: usize, entity: &T) -> Self {
        Self {
            target: Target::Existing(index),
            draft: entity.clone(),
            form: entity.clone(),
            text: String::new(),
            view: View::Form,
        }
    }

    /// The active view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Current structured form fields.
    pub fn form(&self) -> &T {
        &self.form
    }

    /// Current text buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the structured form fields (the form view's edit path).
    pub fn set_form(&mut self, form: T) {
        self.form = form;
    }

    /// Replace the text buffer (the text view's edit path).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Rebuild the draft from the structured form fields.
    fn sync_from_form(&mut self) -> Result<()> {
        self.form.validate()?;
        self.draft = self.form.clone();
        Ok(())
    }

    /// Rebuild the draft from the text buffer.
    fn apply_from_text(&mut self) -> Result<()> {
        let value: serde_yaml::Value = serde_yaml::from_str(&self.text)?;
        schema::as_mapping(&value)?;
        self.draft = T::decode(&value)?;
        Ok(())
    }

    /// Switch to the text view: extract the draft from the form, serialize
    /// it, and populate the text buffer.
    ///
    /// On failure the transition is aborted and the form view stays
    /// authoritative.
    pub fn switch_to_text(&mut self) -> Result<()> {
        if self.view == View::Text {
            return Ok(());
        }
        self.sync_from_form()?;
        self.text = serde_yaml::to_string(&self.draft)?;
        self.view = View::Text;
        Ok(())
    }

    /// Switch to the form view: parse the text buffer, replace the draft,
    /// and repopulate the form fields.
    ///
    /// Fails with a parse error for malformed text and a shape error when
    /// the text is not a single object. On failure the transition is
    /// aborted; the text buffer and form fields are left untouched.
    pub fn switch_to_form(&mut self) -> Result<()> {
        if self.view == View::Form {
            return Ok(());
        }
        self.apply_from_text()?;
        self.form = self.draft.clone();
        self.view = View::Form;
        Ok(())
    }

    /// Commit the session into the target collection.
    ///
    /// The draft is first rebuilt from whichever view is active, failing
    /// exactly as the corresponding transition would. A draft without an
    /// explicit sequence number receives one: a new entity gets one past
    /// the collection length, an edited entity keeps its prior number even
    /// when a text round trip dropped the field. The session is consumed.
    pub fn commit(mut self, collection: &mut Vec<T>) -> Result<()> {
        match self.view {
            View::Form => self.sync_from_form()?,
            View::Text => self.apply_from_text()?,
        }
        let mut draft = self.draft;

        match self.target {
            Target::New => {
                let number = ident::assign_number(draft.number(), None, collection.len());
                draft.set_number(number);
                collection.push(draft);
                debug!(number, "committed new draft");
            }
            Target::Existing(index) => {
                let prior = collection.get(index).ok_or_else(|| {
                    Error::NotFound(format!("no entity at index {index} to replace"))
                })?;
                let number =
                    ident::assign_number(draft.number(), prior.number(), collection.len());
                draft.set_number(number);
                collection[index] = draft;
                debug!(index, number, "committed edited draft");
            }
        }
        Ok(())
    }
}
