//! Bulk clearing.

use super::{CommandResult, Confirmation, PendingAction};
use crate::book::Book;
use std::fmt;

/// What a clear wipes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearTarget {
    All,
    Contacts,
    Events,
}

impl fmt::Display for ClearTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClearTarget::All => "all",
            ClearTarget::Contacts => "contacts",
            ClearTarget::Events => "events",
        })
    }
}

pub(super) fn request_clear(target: ClearTarget) -> Confirmation {
    let prompt = match target {
        ClearTarget::All => "Are you sure you want to clear the party planner?",
        ClearTarget::Contacts => "Are you sure you want to clear all contacts?",
        ClearTarget::Events => "Are you sure you want to clear all parties?",
    };
    Confirmation::new(PendingAction::Clear(target), prompt)
}

pub(super) fn confirm_clear(book: &mut Book, target: ClearTarget) -> CommandResult {
    book.save_state_for_undo(format!("clear {target}"));

    let feedback = match target {
        ClearTarget::All => {
            book.reset_all(Vec::new(), Vec::new());
            "Party planner has been cleared!"
        }
        ClearTarget::Contacts => {
            book.store_mut().clear_contacts_only();
            book.set_contact_filter(Default::default());
            "Contacts have been cleared!"
        }
        ClearTarget::Events => {
            book.store_mut().clear_events_only();
            book.set_event_filter(Default::default());
            "Parties have been cleared!"
        }
    };
    CommandResult::mutation(feedback)
}
