//! Add, edit and delete contacts.

use super::{CommandResult, Confirmation, PendingAction};
use crate::book::Book;
use crate::error::{BookError, Result};
use crate::records::{Contact, Event};
use crate::types::{Amount, ContactId, Email, Index, Name, Phone, Tag, Website};
use crate::views::ContactFilter;
use std::collections::BTreeSet;

/// Fields to change on a contact. `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditContactDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub website: Option<Website>,
    /// Replaces the whole tag set when present.
    pub tags: Option<BTreeSet<Tag>>,
    pub budget: Option<Amount>,
}

impl EditContactDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.website.is_some()
            || self.tags.is_some()
            || self.budget.is_some()
    }

    fn apply(self, contact: &Contact) -> Contact {
        let mut edited = contact.clone();
        if let Some(name) = self.name {
            edited = edited.with_name(name);
        }
        if let Some(phone) = self.phone {
            edited = edited.with_phone(phone);
        }
        if let Some(email) = self.email {
            edited = edited.with_email(email);
        }
        if let Some(website) = self.website {
            edited = edited.with_website(website);
        }
        if let Some(tags) = self.tags {
            edited = edited.with_tags(tags);
        }
        if let Some(budget) = self.budget {
            edited = edited.with_budget(budget);
        }
        edited
    }
}

pub(super) fn add_contact(book: &mut Book, contact: Contact) -> Result<CommandResult> {
    if book.store().has_contact(&contact) {
        return Err(BookError::DuplicateContact(contact.name().to_string()));
    }

    let name = contact.name().to_string();
    book.save_state_for_undo(format!("add {name}"));
    book.store_mut().add_contact(contact)?;
    book.set_contact_filter(ContactFilter::All);

    Ok(CommandResult::mutation(format!("New contact added: {name}")))
}

pub(super) fn edit_contact(
    book: &mut Book,
    index: Index,
    edit: EditContactDescriptor,
) -> Result<CommandResult> {
    if !edit.is_any_field_edited() {
        return Err(BookError::NothingToEdit);
    }
    let original = book.contact_at(index)?.clone();
    let edited = edit.apply(&original);

    let collides = book
        .store()
        .contacts()
        .iter()
        .any(|c| c.id() != original.id() && c.is_same_contact(&edited));
    if collides {
        return Err(BookError::DuplicateContact(edited.name().to_string()));
    }

    let rebalanced = rebalance_events(book, &original, &edited)?;

    book.save_state_for_undo(format!("edit contact {index}"));
    let name = edited.name().to_string();
    book.store_mut().replace_contact(&original, edited)?;
    for (old, new) in rebalanced {
        book.store_mut().replace_event(&old, new)?;
    }

    Ok(CommandResult::mutation(format!("Edited Contact: {name}")))
}

/// Events the contact is in, with remaining budgets moved by the budget change.
fn rebalance_events(book: &Book, original: &Contact, edited: &Contact) -> Result<Vec<(Event, Event)>> {
    let (old_budget, new_budget) = (original.budget(), edited.budget());
    if old_budget == new_budget {
        return Ok(Vec::new());
    }

    book.store()
        .events_with_participant(original.id())
        .map(|event| {
            // What the contact may draw on: what is left plus its current share.
            let available = event.remaining_budget().saturating_add(old_budget);
            let remaining = available.checked_sub(new_budget).ok_or_else(|| {
                BookError::BudgetExceeded {
                    contact: edited.name().to_string(),
                    event: event.name().to_string(),
                    budget: new_budget,
                    remaining: available,
                }
            })?;
            Ok((event.clone(), event.with_remaining_budget(remaining)))
        })
        .collect()
}

pub(super) fn request_delete(book: &Book, index: Index) -> Result<Confirmation> {
    let contact = book.contact_at(index)?;
    Ok(Confirmation::new(
        PendingAction::DeleteContact(contact.id()),
        format!(
            "Are you sure you want to delete this contact? ({})",
            contact.name()
        ),
    ))
}

pub(super) fn confirm_delete(book: &mut Book, id: ContactId) -> Result<CommandResult> {
    let contact = book
        .store()
        .find_contact_by_id(id)
        .cloned()
        .ok_or(BookError::ContactNotFound(id))?;

    book.save_state_for_undo(format!("delete contact {}", contact.name()));
    book.store_mut().remove_contact(&contact);
    book.set_contact_filter(ContactFilter::All);

    Ok(CommandResult::mutation(format!(
        "Deleted Contact: {}",
        contact.name()
    )))
}
