//! Budget-aware assign and unassign.

use super::{join_names, CommandResult};
use crate::book::Book;
use crate::error::{BookError, Result};
use crate::records::Event;
use crate::types::Index;

/// Add the contacts at `indexes` to `event`, checking each in order.
///
/// Returns the extended event and the names admitted. Nothing is written;
/// the first failing contact aborts the whole batch. Per contact:
/// 1. the index resolves in the visible contact list;
/// 2. it is not already a participant, counting earlier batch entries;
/// 3. it is not in another event on the same date;
/// 4. its budget fits in what remains after earlier batch entries.
pub(super) fn admit_contacts(
    book: &Book,
    event: &Event,
    indexes: &[Index],
) -> Result<(Event, Vec<String>)> {
    let mut next = event.clone();
    let mut names = Vec::with_capacity(indexes.len());

    for &index in indexes {
        let contact = book.contact_at(index)?;

        if next.has_participant(contact.id()) {
            return Err(BookError::AlreadyAssigned {
                contact: contact.name().to_string(),
                event: event.name().to_string(),
            });
        }

        let clash = book
            .store()
            .events_on(next.date())
            .find(|other| !other.is_same_event(event) && other.has_participant(contact.id()));
        if let Some(other) = clash {
            return Err(BookError::ScheduleConflict {
                contact: contact.name().to_string(),
                other: other.name().to_string(),
                date: other.date(),
            });
        }

        if contact.budget() > next.remaining_budget() {
            return Err(BookError::BudgetExceeded {
                contact: contact.name().to_string(),
                event: event.name().to_string(),
                budget: contact.budget(),
                remaining: next.remaining_budget(),
            });
        }

        next = next.with_participant(contact.id(), contact.budget());
        names.push(contact.name().to_string());
    }

    Ok((next, names))
}

pub(super) fn assign(book: &mut Book, event_index: Index, indexes: &[Index]) -> Result<CommandResult> {
    if indexes.is_empty() {
        return Err(BookError::invalid(
            "contact indexes",
            "at least one contact must be given",
        ));
    }
    let event = book.event_at(event_index)?.clone();
    let (updated, names) = admit_contacts(book, &event, indexes)?;

    book.save_state_for_undo(format!("assign to party {event_index}"));
    book.store_mut().replace_event(&event, updated)?;

    Ok(CommandResult::mutation(format!(
        "Assigned the following people to {}'s party: {}",
        event.name(),
        join_names(&names)
    )))
}

pub(super) fn unassign(
    book: &mut Book,
    event_index: Index,
    indexes: &[Index],
) -> Result<CommandResult> {
    if indexes.is_empty() {
        return Err(BookError::invalid(
            "contact indexes",
            "at least one contact must be given",
        ));
    }
    let event = book.event_at(event_index)?.clone();
    let mut next = event.clone();
    let mut names = Vec::with_capacity(indexes.len());

    for &index in indexes {
        let contact = book.contact_at(index)?;
        if !next.has_participant(contact.id()) {
            return Err(BookError::NotAssigned {
                contact: contact.name().to_string(),
                event: event.name().to_string(),
            });
        }
        next = next.without_participant(contact.id(), contact.budget());
        names.push(contact.name().to_string());
    }

    book.save_state_for_undo(format!("unassign from party {event_index}"));
    book.store_mut().replace_event(&event, next)?;

    Ok(CommandResult::mutation(format!(
        "Unassigned the following people from {}'s party: {}",
        event.name(),
        join_names(&names)
    )))
}
