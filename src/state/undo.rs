//! Single-slot undo.

use super::snapshot::Snapshot;
use crate::store::RecordStore;

/// Holds at most one [`Snapshot`].
///
/// Saving overwrites whatever was held; taking empties the slot.
#[derive(Clone, Debug, Default)]
pub struct UndoSlot {
    slot: Option<Snapshot>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `store`, replacing any earlier snapshot.
    pub fn save(&mut self, store: &RecordStore, description: impl Into<String>) {
        let snapshot = Snapshot::capture(store, description);
        tracing::debug!(
            description = snapshot.description(),
            contacts = snapshot.contacts().len(),
            events = snapshot.events().len(),
            replaced = self.slot.is_some(),
            "undo snapshot saved"
        );
        self.slot = Some(snapshot);
    }

    pub fn can_undo(&self) -> bool {
        self.slot.is_some()
    }

    /// Description of the held snapshot, if any.
    pub fn peek(&self) -> Option<&str> {
        self.slot.as_ref().map(Snapshot::description)
    }

    /// Remove and return the held snapshot.
    pub fn take(&mut self) -> Option<Snapshot> {
        self.slot.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Contact;
    use crate::types::{Email, Name, Phone};

    fn contact(name: &str) -> Contact {
        Contact::new(
            Name::parse(name).unwrap(),
            Phone::parse("12345678").unwrap(),
            Email::parse("someone@example.com").unwrap(),
        )
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = RecordStore::new();
        let mut slot = UndoSlot::new();
        assert!(!slot.can_undo());

        slot.save(&store, "first");
        store.add_contact(contact("Alice")).unwrap();
        slot.save(&store, "second");

        assert_eq!(slot.peek(), Some("second"));
        let snapshot = slot.take().unwrap();
        assert_eq!(snapshot.contacts().len(), 1);
        assert!(!slot.can_undo());
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = RecordStore::new();
        store.add_contact(contact("Alice")).unwrap();

        let mut slot = UndoSlot::new();
        slot.save(&store, "add Bob");
        store.add_contact(contact("Bob")).unwrap();
        store.clear_contacts_only();

        let (contacts, events, description) = slot.take().unwrap().into_parts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name().as_str(), "Alice");
        assert!(events.is_empty());
        assert_eq!(description, "add Bob");
    }
}
