//! Point-in-time copy of the record store.

use crate::records::{Contact, Event};
use crate::store::RecordStore;

/// Deep copy of both collections, tagged with what is about to change.
///
/// Entities are immutable values, so cloning the vectors is the whole
/// copy; nothing in the live store can reach into a snapshot afterwards.
#[derive(Clone, Debug)]
pub struct Snapshot {
    contacts: Vec<Contact>,
    events: Vec<Event>,
    description: String,
}

impl Snapshot {
    pub fn capture(store: &RecordStore, description: impl Into<String>) -> Self {
        Self {
            contacts: store.contacts().to_vec(),
            events: store.events().to_vec(),
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Split into `(contacts, events, description)`.
    pub fn into_parts(self) -> (Vec<Contact>, Vec<Event>, String) {
        (self.contacts, self.events, self.description)
    }
}
