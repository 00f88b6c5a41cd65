//! Read-only commands that only change what the views show.

use super::CommandResult;
use crate::book::Book;
use crate::error::Result;
use crate::types::{Index, Tag};
use crate::views::{ContactFilter, EventFilter};
use std::collections::BTreeSet;

pub(super) fn list_contacts(book: &mut Book) -> CommandResult {
    book.set_contact_filter(ContactFilter::All);
    CommandResult::query("Listed all contacts")
}

pub(super) fn list_events(book: &mut Book) -> CommandResult {
    book.set_event_filter(EventFilter::All);
    CommandResult::query("Listed all parties")
}

pub(super) fn find_contacts(book: &mut Book, keywords: &[String]) -> CommandResult {
    book.set_contact_filter(ContactFilter::keywords(keywords));
    CommandResult::query(format!(
        "{} contacts listed!",
        book.visible_contacts().len()
    ))
}

pub(super) fn find_events(book: &mut Book, keywords: &[String]) -> CommandResult {
    book.set_event_filter(EventFilter::keywords(keywords));
    CommandResult::query(format!("{} parties listed!", book.visible_events().len()))
}

pub(super) fn view_event(book: &mut Book, index: Index) -> Result<CommandResult> {
    let event = book.event_at(index)?;
    let name = event.name().to_string();
    let filter = ContactFilter::participants_of(event);

    book.set_contact_filter(filter);
    Ok(CommandResult::query(format!(
        "Listed all people assigned to party: {name}"
    )))
}

/// Distinct tags across all contacts, sorted.
pub(super) fn list_tags(book: &Book) -> CommandResult {
    let tags: BTreeSet<&Tag> = book
        .store()
        .contacts()
        .iter()
        .flat_map(|c| c.tags())
        .collect();

    if tags.is_empty() {
        return CommandResult::query("No tags found");
    }
    let listed: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
    CommandResult::query(format!("Listed all tags:\n{}", listed.join("\n")))
}
