//! The party book: store, views and undo slot behind one handle.

use crate::error::{BookError, Result};
use crate::records::{Contact, Event};
use crate::state::UndoSlot;
use crate::store::RecordStore;
use crate::types::{Clock, Index, SystemClock};
use crate::views::{ContactFilter, EventFilter, FilteredView};
use chrono::NaiveDateTime;
use std::fmt;
use std::sync::Arc;

/// Returned by [`Book::undo`] when the slot is empty.
pub const NOTHING_TO_UNDO: &str = "No operation to undo";

/// The model every command works against.
///
/// Owned by the caller and passed by `&mut`; there is no global instance.
pub struct Book {
    store: RecordStore,
    contact_view: FilteredView<ContactFilter>,
    event_view: FilteredView<EventFilter>,
    undo: UndoSlot,
    clock: Arc<dyn Clock>,
}

impl Book {
    /// Empty book reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_store(RecordStore::new(), clock)
    }

    pub fn with_store(store: RecordStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            contact_view: FilteredView::default(),
            event_view: FilteredView::default(),
            undo: UndoSlot::new(),
            clock,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Direct store access. Bypasses the undo slot.
    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    // --- Views ---

    /// Contacts passing the current filter, sorted by name ignoring case.
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        let mut visible = self.contact_view.apply(self.store.contacts());
        visible.sort_by_cached_key(|c| c.name().identity_key());
        visible
    }

    /// Events passing the current filter, in insertion order.
    pub fn visible_events(&self) -> Vec<&Event> {
        self.event_view.apply(self.store.events())
    }

    pub fn contact_filter(&self) -> &ContactFilter {
        self.contact_view.filter()
    }

    pub fn event_filter(&self) -> &EventFilter {
        self.event_view.filter()
    }

    pub fn set_contact_filter(&mut self, filter: ContactFilter) {
        self.contact_view.set_filter(filter);
    }

    pub fn set_event_filter(&mut self, filter: EventFilter) {
        self.event_view.set_filter(filter);
    }

    /// Resolve a position in the visible contact list.
    pub fn contact_at(&self, index: Index) -> Result<&Contact> {
        let visible = self.visible_contacts();
        let len = visible.len();
        visible
            .get(index.zero_based())
            .copied()
            .ok_or(BookError::InvalidContactIndex {
                index: index.one_based(),
                len,
            })
    }

    /// Resolve a position in the visible event list.
    pub fn event_at(&self, index: Index) -> Result<&Event> {
        let visible = self.visible_events();
        let len = visible.len();
        visible
            .get(index.zero_based())
            .copied()
            .ok_or(BookError::InvalidEventIndex {
                index: index.one_based(),
                len,
            })
    }

    // --- Whole-book operations ---

    /// Replace every record and show everything again.
    pub fn reset_all(&mut self, contacts: Vec<Contact>, events: Vec<Event>) {
        self.store.reset_all(contacts, events);
        self.contact_view.reset();
        self.event_view.reset();
    }

    // --- Undo ---

    /// Capture the current store so the next [`Book::undo`] can restore it.
    pub fn save_state_for_undo(&mut self, description: impl Into<String>) {
        self.undo.save(&self.store, description);
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    /// Restore the held snapshot and return its description.
    ///
    /// Returns [`NOTHING_TO_UNDO`] and leaves the book alone when no
    /// snapshot is held.
    pub fn undo(&mut self) -> String {
        let Some(snapshot) = self.undo.take() else {
            return NOTHING_TO_UNDO.to_string();
        };
        let (contacts, events, description) = snapshot.into_parts();
        self.reset_all(contacts, events);
        tracing::info!(description = %description, "undo applied");
        description
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl fmt::Debug for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Book")
            .field("contacts", &self.store.contacts().len())
            .field("events", &self.store.events().len())
            .field("contact_filter", self.contact_view.filter())
            .field("event_filter", self.event_view.filter())
            .field("undo", &self.undo.peek())
            .finish()
    }
}
