//! Contact and event entities.
//!
//! Both are immutable values. The store replaces them wholesale on edit,
//! and events refer to contacts only by [`ContactId`](crate::types::ContactId).

mod contact;
mod event;

pub use contact::Contact;
pub use event::Event;
