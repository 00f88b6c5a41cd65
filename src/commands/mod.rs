//! Mutation and query commands.
//!
//! Commands arrive as already-validated values. [`Command::execute`] runs
//! one against a [`Book`]. Every mutating command validates first, saves an
//! undo snapshot, then changes the store, so a rejected command leaves both
//! the store and the undo slot untouched.
//!
//! Deletes and clears are two-phase: the first call returns
//! [`Outcome::Pending`] with a [`Confirmation`]; calling
//! [`Confirmation::confirm`] applies it and dropping it discards it.

mod assignment;
mod clear;
mod contacts;
mod events;
mod queries;

pub use clear::ClearTarget;
pub use contacts::EditContactDescriptor;
pub use events::{EditEventDescriptor, NewEvent};

use crate::book::Book;
use crate::error::{BookError, Result};
use crate::records::Contact;
use crate::types::{ContactId, EventName, Index};

/// Every operation a host can run against the book.
#[derive(Clone, Debug)]
pub enum Command {
    /// Add the contacts at `contacts` (visible positions) to the event at `event`.
    Assign { event: Index, contacts: Vec<Index> },
    Unassign { event: Index, contacts: Vec<Index> },
    AddContact(Contact),
    AddEvent(NewEvent),
    EditContact {
        index: Index,
        edit: EditContactDescriptor,
    },
    EditEvent {
        index: Index,
        edit: EditEventDescriptor,
    },
    DeleteContact(Index),
    DeleteEvent(Index),
    Clear(ClearTarget),
    /// Apply a confirmation returned by an earlier command.
    Confirm(Confirmation),
    Undo,
    ListContacts,
    ListEvents,
    FindContacts(Vec<String>),
    FindEvents(Vec<String>),
    /// Show only the participants of the event at this position.
    ViewEvent(Index),
    ListTags,
}

impl Command {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Assign { .. } => "assign",
            Command::Unassign { .. } => "unassign",
            Command::AddContact(_) => "add_contact",
            Command::AddEvent(_) => "add_event",
            Command::EditContact { .. } => "edit_contact",
            Command::EditEvent { .. } => "edit_event",
            Command::DeleteContact(_) => "delete_contact",
            Command::DeleteEvent(_) => "delete_event",
            Command::Clear(_) => "clear",
            Command::Confirm(_) => "confirm",
            Command::Undo => "undo",
            Command::ListContacts => "list_contacts",
            Command::ListEvents => "list_events",
            Command::FindContacts(_) => "find_contacts",
            Command::FindEvents(_) => "find_events",
            Command::ViewEvent(_) => "view_event",
            Command::ListTags => "list_tags",
        }
    }

    /// Run the command.
    pub fn execute(self, book: &mut Book) -> Result<Outcome> {
        let name = self.name();
        let outcome = match self {
            Command::Assign { event, contacts } => {
                assignment::assign(book, event, &contacts).map(Outcome::Completed)
            }
            Command::Unassign { event, contacts } => {
                assignment::unassign(book, event, &contacts).map(Outcome::Completed)
            }
            Command::AddContact(contact) => {
                contacts::add_contact(book, contact).map(Outcome::Completed)
            }
            Command::AddEvent(new_event) => events::add_event(book, new_event).map(Outcome::Completed),
            Command::EditContact { index, edit } => {
                contacts::edit_contact(book, index, edit).map(Outcome::Completed)
            }
            Command::EditEvent { index, edit } => {
                events::edit_event(book, index, edit).map(Outcome::Completed)
            }
            Command::DeleteContact(index) => contacts::request_delete(book, index).map(Outcome::Pending),
            Command::DeleteEvent(index) => events::request_delete(book, index).map(Outcome::Pending),
            Command::Clear(target) => Ok(Outcome::Pending(clear::request_clear(target))),
            Command::Confirm(confirmation) => confirmation.confirm(book).map(Outcome::Completed),
            Command::Undo => undo(book).map(Outcome::Completed),
            Command::ListContacts => Ok(Outcome::Completed(queries::list_contacts(book))),
            Command::ListEvents => Ok(Outcome::Completed(queries::list_events(book))),
            Command::FindContacts(keywords) => {
                Ok(Outcome::Completed(queries::find_contacts(book, &keywords)))
            }
            Command::FindEvents(keywords) => {
                Ok(Outcome::Completed(queries::find_events(book, &keywords)))
            }
            Command::ViewEvent(index) => queries::view_event(book, index).map(Outcome::Completed),
            Command::ListTags => Ok(Outcome::Completed(queries::list_tags(book))),
        };

        match &outcome {
            Ok(Outcome::Completed(result)) if result.mutated => {
                tracing::info!(command = name, "command applied");
            }
            Ok(Outcome::Pending(confirmation)) => {
                tracing::info!(command = name, prompt = confirmation.prompt(), "awaiting confirmation");
            }
            Ok(_) => {}
            Err(error) => {
                tracing::debug!(command = name, error = %error, "command rejected");
            }
        }
        outcome
    }
}

fn undo(book: &mut Book) -> Result<CommandResult> {
    if !book.can_undo() {
        return Err(BookError::NothingToUndo);
    }
    let description = book.undo();
    Ok(CommandResult::mutation(format!(
        "Previous command undone: {description}"
    )))
}

/// Feedback from a finished command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Message for the user.
    pub feedback: String,
    /// True when the store changed and should be persisted.
    pub mutated: bool,
}

impl CommandResult {
    pub fn mutation(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            mutated: true,
        }
    }

    pub fn query(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            mutated: false,
        }
    }
}

/// What running a command produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed(CommandResult),
    /// The command needs an explicit confirmation before it runs.
    Pending(Confirmation),
}

impl Outcome {
    pub fn feedback(&self) -> &str {
        match self {
            Outcome::Completed(result) => &result.feedback,
            Outcome::Pending(confirmation) => confirmation.prompt(),
        }
    }

    pub fn mutated(&self) -> bool {
        matches!(self, Outcome::Completed(result) if result.mutated)
    }

    /// The pending confirmation, if the command is waiting for one.
    pub fn into_pending(self) -> Option<Confirmation> {
        match self {
            Outcome::Pending(confirmation) => Some(confirmation),
            Outcome::Completed(_) => None,
        }
    }
}

/// A destructive command waiting to be confirmed.
///
/// Holds the identity of its target, never a view position, so changing
/// filters in between cannot redirect it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    action: PendingAction,
    prompt: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PendingAction {
    DeleteContact(ContactId),
    DeleteEvent(EventName),
    Clear(ClearTarget),
}

impl Confirmation {
    fn new(action: PendingAction, prompt: impl Into<String>) -> Self {
        Self {
            action,
            prompt: prompt.into(),
        }
    }

    /// Question to put to the user.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Apply the pending action.
    pub fn confirm(self, book: &mut Book) -> Result<CommandResult> {
        match self.action {
            PendingAction::DeleteContact(id) => contacts::confirm_delete(book, id),
            PendingAction::DeleteEvent(name) => events::confirm_delete(book, &name),
            PendingAction::Clear(target) => Ok(clear::confirm_clear(book, target)),
        }
    }
}

/// Join names as `A, B, C`.
fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
