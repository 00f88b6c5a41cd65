//! Contact entity.

use crate::types::{Amount, ContactId, Email, Name, Phone, Tag, Website};
use std::collections::BTreeSet;

/// A person who can be invited to parties.
///
/// Contacts are immutable: an edit builds a new `Contact` carrying the same
/// [`ContactId`] and the store swaps it in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    id: ContactId,
    name: Name,
    phone: Phone,
    email: Email,
    website: Website,
    tags: BTreeSet<Tag>,
    budget: Amount,
}

impl Contact {
    /// Create a contact with a freshly generated identifier.
    ///
    /// Website, tags and budget start empty; use the `with_*` methods to set them.
    pub fn new(name: Name, phone: Phone, email: Email) -> Self {
        Self::with_id(ContactId::new(), name, phone, email)
    }

    /// Create a contact with a caller-provided identifier.
    ///
    /// Used by load paths where the identifier already exists.
    pub fn with_id(id: ContactId, name: Name, phone: Phone, email: Email) -> Self {
        Self {
            id,
            name,
            phone,
            email,
            website: Website::none(),
            tags: BTreeSet::new(),
            budget: Amount::ZERO,
        }
    }

    pub fn with_name(mut self, name: Name) -> Self {
        self.name = name;
        self
    }

    pub fn with_phone(mut self, phone: Phone) -> Self {
        self.phone = phone;
        self
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = email;
        self
    }

    pub fn with_website(mut self, website: Website) -> Self {
        self.website = website;
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn with_budget(mut self, budget: Amount) -> Self {
        self.budget = budget;
        self
    }

    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn website(&self) -> &Website {
        &self.website
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn budget(&self) -> Amount {
        self.budget
    }

    /// Weaker equality used for duplicate detection: same name, ignoring case.
    pub fn is_same_contact(&self, other: &Contact) -> bool {
        self.name.same_identity(&other.name)
    }
}
