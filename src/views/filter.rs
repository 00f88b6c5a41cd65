//! Predicates deciding what a view shows.

use crate::records::{Contact, Event};
use crate::types::{ContactId, EventDate};
use std::fmt;
use std::sync::Arc;

/// Something that can accept or reject an item of type `T`.
pub trait Predicate<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Shared closure used by the `Custom` filter variants.
pub type CustomPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Filter for the contact view.
#[derive(Clone, Default)]
pub enum ContactFilter {
    /// Show every contact.
    #[default]
    All,
    /// Name or any tag contains one of the keywords, ignoring case.
    Keywords(Vec<String>),
    /// Only the listed contacts (an event's participants).
    Participants(Vec<ContactId>),
    Custom(CustomPredicate<Contact>),
}

impl ContactFilter {
    /// Match contacts against keywords. Blank keywords are dropped.
    pub fn keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ContactFilter::Keywords(normalize_keywords(keywords))
    }

    /// Show the participants of `event`.
    pub fn participants_of(event: &Event) -> Self {
        ContactFilter::Participants(event.participants().to_vec())
    }

    pub fn custom(f: impl Fn(&Contact) -> bool + Send + Sync + 'static) -> Self {
        ContactFilter::Custom(Arc::new(f))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ContactFilter::All)
    }
}

impl Predicate<Contact> for ContactFilter {
    fn matches(&self, contact: &Contact) -> bool {
        match self {
            ContactFilter::All => true,
            ContactFilter::Keywords(keywords) => {
                let name = contact.name().as_str().to_lowercase();
                keywords.iter().any(|k| {
                    name.contains(k.as_str())
                        || contact
                            .tags()
                            .iter()
                            .any(|t| t.as_str().to_lowercase().contains(k.as_str()))
                })
            }
            ContactFilter::Participants(ids) => ids.contains(&contact.id()),
            ContactFilter::Custom(f) => f(contact),
        }
    }
}

impl fmt::Debug for ContactFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactFilter::All => write!(f, "All"),
            ContactFilter::Keywords(k) => f.debug_tuple("Keywords").field(k).finish(),
            ContactFilter::Participants(ids) => f.debug_tuple("Participants").field(ids).finish(),
            ContactFilter::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Filter for the event view.
#[derive(Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    /// Event name contains one of the keywords, ignoring case.
    Keywords(Vec<String>),
    OnDate(EventDate),
    Custom(CustomPredicate<Event>),
}

impl EventFilter {
    pub fn keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        EventFilter::Keywords(normalize_keywords(keywords))
    }

    pub fn custom(f: impl Fn(&Event) -> bool + Send + Sync + 'static) -> Self {
        EventFilter::Custom(Arc::new(f))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, EventFilter::All)
    }
}

impl Predicate<Event> for EventFilter {
    fn matches(&self, event: &Event) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Keywords(keywords) => {
                let name = event.name().as_str().to_lowercase();
                keywords.iter().any(|k| name.contains(k.as_str()))
            }
            EventFilter::OnDate(date) => event.date() == *date,
            EventFilter::Custom(f) => f(event),
        }
    }
}

impl fmt::Debug for EventFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventFilter::All => write!(f, "All"),
            EventFilter::Keywords(k) => f.debug_tuple("Keywords").field(k).finish(),
            EventFilter::OnDate(d) => f.debug_tuple("OnDate").field(d).finish(),
            EventFilter::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
