//! # Party Book
//!
//! A record store for contacts and the parties they are invited to, with
//! budget-aware assignment and single-level undo.
//!
//! ## Core Concepts
//!
//! - **Records**: immutable [`Contact`] and [`Event`] values, replaced wholesale on edit
//! - **Store**: the canonical lists, with no duplicate identities
//! - **Views**: pull-based filters over the store
//! - **Undo**: one snapshot of the whole store, taken before each mutation
//! - **Commands**: validated operations that keep budgets and schedules consistent
//!
//! ## Example
//!
//! ```ignore
//! use partybook::{BookConfig, Command, Session, SystemClock};
//! use std::sync::Arc;
//!
//! let mut session = Session::open(BookConfig::default(), Arc::new(SystemClock))?;
//!
//! session.execute(Command::AddContact(contact))?;
//! session.execute(Command::Assign {
//!     event: Index::from_one_based(1)?,
//!     contacts: vec![Index::from_one_based(1)?],
//! })?;
//!
//! // Deletes ask first
//! let pending = session.execute(Command::DeleteEvent(Index::from_one_based(1)?))?;
//! if let Some(confirmation) = pending.into_pending() {
//!     session.execute(Command::Confirm(confirmation))?;
//! }
//! ```

pub mod book;
pub mod commands;
pub mod config;
pub mod error;
pub mod records;
pub mod session;
pub mod state;
pub mod storage;
pub mod store;
pub mod types;
pub mod views;

// Re-exports
pub use book::{Book, NOTHING_TO_UNDO};
pub use commands::{
    ClearTarget, Command, CommandResult, Confirmation, EditContactDescriptor,
    EditEventDescriptor, NewEvent, Outcome,
};
pub use config::BookConfig;
pub use error::{BookError, ErrorKind, Result};
pub use records::{Contact, Event};
pub use session::{Session, SharedSession};
pub use state::{Snapshot, UndoSlot};
pub use storage::JsonStorage;
pub use store::RecordStore;
pub use types::*;
pub use views::{ContactFilter, EventFilter, FilteredView, Predicate};
