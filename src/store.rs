//! Canonical contact and event collections.

use crate::error::{BookError, Result};
use crate::records::{Contact, Event};
use crate::types::{ContactId, EventDate, EventName, Name};

/// The record store.
///
/// Sole owner of the contact and event lists. Duplicate identities are
/// rejected on add and replace; [`RecordStore::reset_all`] bypasses those
/// checks and trusts its caller (snapshots and validated loads).
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    contacts: Vec<Contact>,
    events: Vec<Event>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Contacts ---

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// True when a contact with the same identity (name) exists.
    pub fn has_contact(&self, contact: &Contact) -> bool {
        self.contacts.iter().any(|c| c.is_same_contact(contact))
    }

    pub fn find_contact_by_id(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id() == id)
    }

    pub fn find_contact_by_name(&self, name: &Name) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.name().same_identity(name))
    }

    /// Append a contact.
    pub fn add_contact(&mut self, contact: Contact) -> Result<()> {
        if self.has_contact(&contact) {
            return Err(BookError::DuplicateContact(contact.name().to_string()));
        }
        tracing::debug!(contact = %contact.name(), id = %contact.id(), "contact added");
        self.contacts.push(contact);
        Ok(())
    }

    /// Remove a contact and detach it from every event.
    ///
    /// Each event it was in gets the contact's budget back, capped at the
    /// event's initial budget. Removing an absent contact is a no-op.
    pub fn remove_contact(&mut self, contact: &Contact) {
        let Some(pos) = self.contacts.iter().position(|c| c.id() == contact.id()) else {
            return;
        };
        let removed = self.contacts.remove(pos);

        for event in &mut self.events {
            if event.has_participant(removed.id()) {
                *event = event.without_participant(removed.id(), removed.budget());
            }
        }
        tracing::debug!(contact = %removed.name(), id = %removed.id(), "contact removed");
    }

    /// Swap `old` for `new` in place.
    ///
    /// `old` is located by identifier, so renames keep their position.
    pub fn replace_contact(&mut self, old: &Contact, new: Contact) -> Result<()> {
        let pos = self
            .contacts
            .iter()
            .position(|c| c.id() == old.id())
            .ok_or(BookError::ContactNotFound(old.id()))?;

        let collides = self
            .contacts
            .iter()
            .enumerate()
            .any(|(i, c)| i != pos && c.is_same_contact(&new));
        if collides {
            return Err(BookError::DuplicateContact(new.name().to_string()));
        }

        tracing::debug!(from = %old.name(), to = %new.name(), "contact replaced");
        self.contacts[pos] = new;
        Ok(())
    }

    /// Drop every contact and empty every participant list.
    ///
    /// Remaining budgets return to their initial values.
    pub fn clear_contacts_only(&mut self) {
        self.contacts.clear();
        for event in &mut self.events {
            *event = event.without_participants();
        }
        tracing::debug!("contacts cleared");
    }

    // --- Events ---

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// True when an event with the same identity (name) exists.
    pub fn has_event(&self, event: &Event) -> bool {
        self.events.iter().any(|e| e.is_same_event(event))
    }

    pub fn find_event_by_name(&self, name: &EventName) -> Option<&Event> {
        self.events.iter().find(|e| e.name().same_identity(name))
    }

    /// Events scheduled on `date`.
    pub fn events_on(&self, date: EventDate) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.date() == date)
    }

    /// Events listing `id` as a participant.
    pub fn events_with_participant(&self, id: ContactId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.has_participant(id))
    }

    pub fn add_event(&mut self, event: Event) -> Result<()> {
        if self.has_event(&event) {
            return Err(BookError::DuplicateEvent(event.name().to_string()));
        }
        tracing::debug!(event = %event.name(), date = %event.date(), "event added");
        self.events.push(event);
        Ok(())
    }

    /// Remove an event by identity. No-op if absent.
    pub fn remove_event(&mut self, event: &Event) {
        let before = self.events.len();
        self.events.retain(|e| !e.is_same_event(event));
        if self.events.len() != before {
            tracing::debug!(event = %event.name(), "event removed");
        }
    }

    /// Swap `old` for `new` in place, keyed on event identity.
    pub fn replace_event(&mut self, old: &Event, new: Event) -> Result<()> {
        let pos = self
            .events
            .iter()
            .position(|e| e.is_same_event(old))
            .ok_or_else(|| BookError::EventNotFound(old.name().to_string()))?;

        let collides = self
            .events
            .iter()
            .enumerate()
            .any(|(i, e)| i != pos && e.is_same_event(&new));
        if collides {
            return Err(BookError::DuplicateEvent(new.name().to_string()));
        }

        tracing::debug!(
            event = %new.name(),
            participants = new.participants().len(),
            remaining = %new.remaining_budget(),
            "event replaced"
        );
        self.events[pos] = new;
        Ok(())
    }

    pub fn clear_events_only(&mut self) {
        self.events.clear();
        tracing::debug!("events cleared");
    }

    // --- Bulk ---

    /// Replace both collections wholesale. No duplicate checks are made.
    pub fn reset_all(&mut self, contacts: Vec<Contact>, events: Vec<Event>) {
        tracing::debug!(
            contacts = contacts.len(),
            events = events.len(),
            "store reset"
        );
        self.contacts = contacts;
        self.events = events;
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty() && self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amount, Email, EventTime, Phone};

    fn contact(name: &str, budget: u64) -> Contact {
        Contact::new(
            Name::parse(name).unwrap(),
            Phone::parse("12345678").unwrap(),
            Email::parse("someone@example.com").unwrap(),
        )
        .with_budget(Amount::whole(budget))
    }

    fn event(name: &str, date: &str, budget: u64) -> Event {
        Event::new(
            EventName::parse(name).unwrap(),
            EventDate::parse(date).unwrap(),
            EventTime::parse("19:00").unwrap(),
            Amount::whole(budget),
        )
    }

    #[test]
    fn test_duplicate_contact_rejected() {
        let mut store = RecordStore::new();
        store.add_contact(contact("Alice", 100)).unwrap();

        let err = store.add_contact(contact("alice", 5)).unwrap_err();
        assert!(matches!(err, BookError::DuplicateContact(_)));
        assert_eq!(store.contacts().len(), 1);
    }

    #[test]
    fn test_replace_contact_collision() {
        let mut store = RecordStore::new();
        let alice = contact("Alice", 1);
        let bob = contact("Bob", 1);
        store.add_contact(alice.clone()).unwrap();
        store.add_contact(bob.clone()).unwrap();

        // Renaming onto another contact fails
        let err = store
            .replace_contact(&bob, bob.clone().with_name(Name::parse("ALICE").unwrap()))
            .unwrap_err();
        assert!(matches!(err, BookError::DuplicateContact(_)));

        // Changing only case of its own name is fine
        store
            .replace_contact(&alice, alice.clone().with_name(Name::parse("ALICE").unwrap()))
            .unwrap();
        assert_eq!(store.contacts()[0].name().as_str(), "ALICE");
        assert_eq!(store.contacts()[0].id(), alice.id());
    }

    #[test]
    fn test_replace_missing_contact() {
        let mut store = RecordStore::new();
        let ghost = contact("Ghost", 0);
        let err = store.replace_contact(&ghost, ghost.clone()).unwrap_err();
        assert!(matches!(err, BookError::ContactNotFound(id) if id == ghost.id()));
    }

    #[test]
    fn test_remove_contact_cascades() {
        let mut store = RecordStore::new();
        let alice = contact("Alice", 100);
        store.add_contact(alice.clone()).unwrap();
        store
            .add_event(event("Party", "01-01-2031", 500).with_participant(alice.id(), alice.budget()))
            .unwrap();
        assert_eq!(store.events()[0].remaining_budget(), Amount::whole(400));

        store.remove_contact(&alice);
        assert!(store.contacts().is_empty());
        assert!(store.events()[0].participants().is_empty());
        assert_eq!(store.events()[0].remaining_budget(), Amount::whole(500));

        // Second removal is a no-op
        store.remove_contact(&alice);
    }

    #[test]
    fn test_event_lookup_and_replace() {
        let mut store = RecordStore::new();
        let party = event("Party", "01-01-2031", 500);
        store.add_event(party.clone()).unwrap();
        store.add_event(event("Picnic", "01-01-2031", 50)).unwrap();
        assert!(store.add_event(event("PARTY", "02-02-2031", 1)).is_err());

        let on_day = store
            .events_on(EventDate::parse("01-01-2031").unwrap())
            .count();
        assert_eq!(on_day, 2);

        let renamed = party.with_details(
            EventName::parse("Picnic").unwrap(),
            party.date(),
            party.time(),
            party.initial_budget(),
            party.remaining_budget(),
        );
        let err = store.replace_event(&party, renamed).unwrap_err();
        assert!(matches!(err, BookError::DuplicateEvent(_)));

        let name = EventName::parse("party").unwrap();
        assert!(store.find_event_by_name(&name).is_some());
    }

    #[test]
    fn test_clear_contacts_resets_budgets() {
        let mut store = RecordStore::new();
        let alice = contact("Alice", 100);
        store.add_contact(alice.clone()).unwrap();
        store
            .add_event(event("Party", "01-01-2031", 500).with_participant(alice.id(), alice.budget()))
            .unwrap();

        store.clear_contacts_only();
        assert!(store.contacts().is_empty());
        assert_eq!(store.events().len(), 1);
        assert_eq!(store.events()[0].remaining_budget(), Amount::whole(500));
    }

    #[test]
    fn test_reset_all_skips_checks() {
        let mut store = RecordStore::new();
        store.reset_all(vec![contact("A", 0), contact("B", 0)], vec![]);
        assert_eq!(store.contacts().len(), 2);
        store.clear_events_only();
        assert!(!store.is_empty());
    }
}
