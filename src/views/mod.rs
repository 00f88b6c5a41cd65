//! Filtered views over the record store.
//!
//! A view stores a predicate and nothing else. Readers pull the visible
//! records on demand through [`Book::visible_contacts`](crate::Book::visible_contacts)
//! and [`Book::visible_events`](crate::Book::visible_events), so there is no
//! change notification to keep in sync.
//!
//! # Example
//!
//! ```ignore
//! book.set_contact_filter(ContactFilter::keywords(["alice"]));
//! for contact in book.visible_contacts() {
//!     println!("{}", contact.name());
//! }
//! ```

mod filter;
mod view;

pub use filter::{ContactFilter, CustomPredicate, EventFilter, Predicate};
pub use view::FilteredView;
