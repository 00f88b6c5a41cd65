//! JSON file persistence with an integrity checksum.
//!
//! File layout:
//!
//! ```text
//! {
//!   "contacts": [ { "id", "name", "phone", "email", "website", "tags", "budget" } ],
//!   "events":   [ { "name", "date", "time", "participants", "initial_budget", "remaining_budget" } ],
//!   "checksum": "<hex sha-256>"
//! }
//! ```
//!
//! The checksum covers the canonical (compact, key-sorted) JSON of
//! `{contacts, events}`. Files without one are accepted as legacy.

use crate::error::{BookError, Result};
use crate::records::{Contact, Event};
use crate::store::RecordStore;
use crate::types::{
    Amount, ContactId, Email, EventDate, EventName, EventTime, Hash, Name, Phone, Tag, Website,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct StoredContact {
    /// Missing in legacy files; a fresh id is generated on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    phone: String,
    email: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    budget: Option<String>,
}

impl StoredContact {
    fn from_contact(contact: &Contact) -> Self {
        Self {
            id: Some(contact.id().to_string()),
            name: contact.name().to_string(),
            phone: contact.phone().to_string(),
            email: contact.email().to_string(),
            website: contact.website().to_string(),
            tags: contact.tags().iter().map(|t| t.to_string()).collect(),
            budget: Some(contact.budget().to_string()),
        }
    }

    fn into_contact(self) -> Result<Contact> {
        let id = match self.id.as_deref() {
            Some(id) if !id.trim().is_empty() => ContactId::parse(id)?,
            _ => ContactId::new(),
        };
        let tags = self
            .tags
            .iter()
            .map(|t| Tag::parse(t))
            .collect::<Result<Vec<_>>>()?;
        let budget = match self.budget.as_deref() {
            Some(budget) => Amount::parse(budget)?,
            None => Amount::ZERO,
        };

        Ok(Contact::with_id(
            id,
            Name::parse(&self.name)?,
            Phone::parse(&self.phone)?,
            Email::parse(&self.email)?,
        )
        .with_website(Website::parse(&self.website)?)
        .with_tags(tags)
        .with_budget(budget))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEvent {
    name: String,
    date: String,
    time: String,
    #[serde(default)]
    participants: Vec<String>,
    initial_budget: String,
    /// Missing in legacy files; defaults to the initial budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remaining_budget: Option<String>,
}

impl StoredEvent {
    fn from_event(event: &Event) -> Self {
        Self {
            name: event.name().to_string(),
            date: event.date().to_string(),
            time: event.time().to_string(),
            participants: event.participants().iter().map(|id| id.to_string()).collect(),
            initial_budget: event.initial_budget().to_string(),
            remaining_budget: Some(event.remaining_budget().to_string()),
        }
    }

    fn into_event(self) -> Result<Event> {
        let initial = Amount::parse(&self.initial_budget)?;
        let remaining = match self.remaining_budget.as_deref() {
            Some(remaining) => Amount::parse(remaining)?,
            None => initial,
        };
        let participants = self
            .participants
            .iter()
            .map(|id| ContactId::parse(id))
            .collect::<Result<Vec<_>>>()?;

        Event::restore(
            EventName::parse(&self.name)?,
            EventDate::parse(&self.date)?,
            EventTime::parse(&self.time)?,
            participants,
            initial,
            remaining,
        )
    }
}

#[derive(Serialize)]
struct StoredBook<'a> {
    contacts: &'a Value,
    events: &'a Value,
    checksum: String,
}

/// Checksum over the canonical JSON of both collections.
fn checksum(contacts: &Value, events: &Value) -> Result<Hash> {
    let mut payload = serde_json::Map::new();
    payload.insert("contacts".into(), contacts.clone());
    payload.insert("events".into(), events.clone());
    let bytes = serde_json::to_vec(&Value::Object(payload))?;
    Ok(Hash::from_bytes(&bytes))
}

/// Reads and writes a [`RecordStore`] as one JSON file.
#[derive(Clone, Debug)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store. `Ok(None)` when the file does not exist.
    pub fn read(&self) -> Result<Option<RecordStore>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        let root: Value =
            serde_json::from_str(&text).map_err(|e| BookError::Deserialization(e.to_string()))?;
        let Value::Object(mut root) = root else {
            return Err(BookError::Deserialization(
                "top level must be a JSON object".into(),
            ));
        };

        let contacts = root.remove("contacts").unwrap_or(Value::Array(Vec::new()));
        let events = root.remove("events").unwrap_or(Value::Array(Vec::new()));
        let stored_checksum = root
            .remove("checksum")
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|s| !s.trim().is_empty());

        match stored_checksum {
            None => {
                tracing::info!(path = %self.path.display(), "no checksum present, accepting legacy file");
            }
            Some(expected) => {
                let actual = checksum(&contacts, &events)?.to_hex();
                if !actual.eq_ignore_ascii_case(expected.trim()) {
                    tracing::error!(
                        path = %self.path.display(),
                        expected = %expected,
                        actual = %actual,
                        "checksum mismatch"
                    );
                    return Err(BookError::Corruption(format!(
                        "checksum mismatch in {}: expected {expected}, computed {actual}",
                        self.path.display()
                    )));
                }
            }
        }

        let contacts: Vec<StoredContact> = serde_json::from_value(contacts)
            .map_err(|e| BookError::Deserialization(e.to_string()))?;
        let events: Vec<StoredEvent> = serde_json::from_value(events)
            .map_err(|e| BookError::Deserialization(e.to_string()))?;

        let mut store = RecordStore::new();
        for stored in contacts {
            let contact = stored.into_contact()?;
            if store.has_contact(&contact) {
                return Err(BookError::InvalidFormat(format!(
                    "contacts list contains duplicate contact {}",
                    contact.name()
                )));
            }
            store.add_contact(contact)?;
        }
        for stored in events {
            let event = stored.into_event()?;
            if store.has_event(&event) {
                return Err(BookError::InvalidFormat(format!(
                    "events list contains duplicate party {}",
                    event.name()
                )));
            }
            store.add_event(event)?;
        }

        tracing::info!(
            path = %self.path.display(),
            contacts = store.contacts().len(),
            events = store.events().len(),
            "book loaded"
        );
        Ok(Some(store))
    }

    /// Write the store with a fresh checksum, replacing the file.
    pub fn save(&self, store: &RecordStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contacts: Vec<StoredContact> =
            store.contacts().iter().map(StoredContact::from_contact).collect();
        let events: Vec<StoredEvent> = store.events().iter().map(StoredEvent::from_event).collect();
        let contacts = serde_json::to_value(contacts)?;
        let events = serde_json::to_value(events)?;

        let book = StoredBook {
            checksum: checksum(&contacts, &events)?.to_hex(),
            contacts: &contacts,
            events: &events,
        };
        let bytes = serde_json::to_vec_pretty(&book)?;

        let mut file = File::create(&self.path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;

        tracing::info!(
            path = %self.path.display(),
            contacts = store.contacts().len(),
            events = store.events().len(),
            "book saved"
        );
        Ok(())
    }
}
