//! Add, edit and delete parties.

use super::assignment::admit_contacts;
use super::{join_names, CommandResult, Confirmation, PendingAction};
use crate::book::Book;
use crate::error::{BookError, Result};
use crate::records::Event;
use crate::types::{Amount, EventDate, EventName, EventTime, Index};
use crate::views::EventFilter;

/// A party to create, with contacts to assign straight away.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEvent {
    pub name: EventName,
    pub date: EventDate,
    pub time: EventTime,
    pub budget: Amount,
    /// Positions in the visible contact list.
    pub contacts: Vec<Index>,
}

impl NewEvent {
    pub fn new(name: EventName, date: EventDate, time: EventTime, budget: Amount) -> Self {
        Self {
            name,
            date,
            time,
            budget,
            contacts: Vec::new(),
        }
    }

    pub fn with_contacts(mut self, contacts: impl IntoIterator<Item = Index>) -> Self {
        self.contacts = contacts.into_iter().collect();
        self
    }
}

/// Fields to change on a party. `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditEventDescriptor {
    pub name: Option<EventName>,
    pub date: Option<EventDate>,
    pub time: Option<EventTime>,
    pub budget: Option<Amount>,
}

impl EditEventDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some() || self.date.is_some() || self.time.is_some() || self.budget.is_some()
    }
}

pub(super) fn add_event(book: &mut Book, new_event: NewEvent) -> Result<CommandResult> {
    let NewEvent {
        name,
        date,
        time,
        budget,
        contacts,
    } = new_event;

    if date.is_in_past(time, book.now()) {
        return Err(BookError::EventInPast {
            name: name.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        });
    }

    let event = Event::new(name, date, time, budget);
    if book.store().has_event(&event) {
        return Err(BookError::DuplicateEvent(event.name().to_string()));
    }
    let (event, names) = admit_contacts(book, &event, &contacts)?;

    book.save_state_for_undo(format!("add party {}", event.name()));
    let mut feedback = format!(
        "New party added: {} on {} at {} (budget {})",
        event.name(),
        event.date(),
        event.time(),
        event.initial_budget()
    );
    if !names.is_empty() {
        feedback.push_str(&format!("\nAssigned: {}", join_names(&names)));
    }
    book.store_mut().add_event(event)?;
    book.set_event_filter(EventFilter::All);

    Ok(CommandResult::mutation(feedback))
}

pub(super) fn edit_event(
    book: &mut Book,
    index: Index,
    edit: EditEventDescriptor,
) -> Result<CommandResult> {
    if !edit.is_any_field_edited() {
        return Err(BookError::NothingToEdit);
    }
    let original = book.event_at(index)?.clone();

    let name = edit.name.unwrap_or_else(|| original.name().clone());
    let date = edit.date.unwrap_or(original.date());
    let time = edit.time.unwrap_or(original.time());
    let (initial, remaining) = match edit.budget {
        Some(budget) => {
            let spent = original.spent();
            let remaining = budget
                .checked_sub(spent)
                .ok_or(BookError::BudgetBelowSpent { budget, spent })?;
            (budget, remaining)
        }
        None => (original.initial_budget(), original.remaining_budget()),
    };
    let edited = original.with_details(name, date, time, initial, remaining);

    let collides = book
        .store()
        .events()
        .iter()
        .any(|e| !e.is_same_event(&original) && e.is_same_event(&edited));
    if collides {
        return Err(BookError::DuplicateEvent(edited.name().to_string()));
    }

    if date != original.date() {
        check_schedule(book, &original, date)?;
    }

    book.save_state_for_undo(format!("edit party {index}"));
    let feedback = format!("Edited Party: {}", edited.name());
    book.store_mut().replace_event(&original, edited)?;
    book.set_event_filter(EventFilter::All);

    Ok(CommandResult::mutation(feedback))
}

/// Fails if moving `event` to `date` would double-book any participant.
fn check_schedule(book: &Book, event: &Event, date: EventDate) -> Result<()> {
    for &id in event.participants() {
        let clash = book
            .store()
            .events_on(date)
            .find(|other| !other.is_same_event(event) && other.has_participant(id));
        if let Some(other) = clash {
            let contact = book
                .store()
                .find_contact_by_id(id)
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| id.to_string());
            return Err(BookError::ScheduleConflict {
                contact,
                other: other.name().to_string(),
                date,
            });
        }
    }
    Ok(())
}

pub(super) fn request_delete(book: &Book, index: Index) -> Result<Confirmation> {
    let event = book.event_at(index)?;
    Ok(Confirmation::new(
        PendingAction::DeleteEvent(event.name().clone()),
        format!(
            "Are you sure you want to delete this party? ({})",
            event.name()
        ),
    ))
}

pub(super) fn confirm_delete(book: &mut Book, name: &EventName) -> Result<CommandResult> {
    let event = book
        .store()
        .find_event_by_name(name)
        .cloned()
        .ok_or_else(|| BookError::EventNotFound(name.to_string()))?;

    book.save_state_for_undo(format!("delete party {}", event.name()));
    book.store_mut().remove_event(&event);
    book.set_event_filter(EventFilter::All);

    Ok(CommandResult::mutation(format!(
        "Deleted Party: {}",
        event.name()
    )))
}
