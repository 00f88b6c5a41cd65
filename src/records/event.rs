//! Event (party) entity.

use crate::error::{BookError, Result};
use crate::types::{Amount, ContactId, EventDate, EventName, EventTime};

/// A scheduled party with a budget shared out among its participants.
///
/// # Invariants
/// - `participants` holds no duplicate identifiers.
/// - `remaining_budget <= initial_budget`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    name: EventName,
    date: EventDate,
    time: EventTime,
    participants: Vec<ContactId>,
    initial_budget: Amount,
    remaining_budget: Amount,
}

impl Event {
    /// A new party with no participants; its whole budget remains.
    pub fn new(name: EventName, date: EventDate, time: EventTime, budget: Amount) -> Self {
        Self {
            name,
            date,
            time,
            participants: Vec::new(),
            initial_budget: budget,
            remaining_budget: budget,
        }
    }

    /// Rebuild a party from persisted parts, checking its invariants.
    pub fn restore(
        name: EventName,
        date: EventDate,
        time: EventTime,
        participants: Vec<ContactId>,
        initial_budget: Amount,
        remaining_budget: Amount,
    ) -> Result<Self> {
        if remaining_budget > initial_budget {
            return Err(BookError::invalid(
                "remaining budget",
                format!(
                    "{remaining_budget} exceeds the initial budget {initial_budget} of party {name}"
                ),
            ));
        }
        for (i, id) in participants.iter().enumerate() {
            if participants[..i].contains(id) {
                return Err(BookError::invalid(
                    "participants",
                    format!("contact {id} is listed twice in party {name}"),
                ));
            }
        }

        Ok(Self {
            name,
            date,
            time,
            participants,
            initial_budget,
            remaining_budget,
        })
    }

    pub fn name(&self) -> &EventName {
        &self.name
    }

    pub fn date(&self) -> EventDate {
        self.date
    }

    pub fn time(&self) -> EventTime {
        self.time
    }

    pub fn participants(&self) -> &[ContactId] {
        &self.participants
    }

    pub fn initial_budget(&self) -> Amount {
        self.initial_budget
    }

    pub fn remaining_budget(&self) -> Amount {
        self.remaining_budget
    }

    /// Budget already handed out to participants.
    pub fn spent(&self) -> Amount {
        self.initial_budget.saturating_sub(self.remaining_budget)
    }

    pub fn has_participant(&self, id: ContactId) -> bool {
        self.participants.contains(&id)
    }

    /// Events are the same party when their names match, ignoring case.
    pub fn is_same_event(&self, other: &Event) -> bool {
        self.name.same_identity(&other.name)
    }

    /// Copy with `id` appended and `cost` taken from the remaining budget.
    ///
    /// Callers check membership and budget first; the remainder saturates at zero.
    pub fn with_participant(&self, id: ContactId, cost: Amount) -> Event {
        let mut next = self.clone();
        if !next.participants.contains(&id) {
            next.participants.push(id);
        }
        next.remaining_budget = next.remaining_budget.saturating_sub(cost);
        next
    }

    /// Copy with `id` removed and `refund` returned, capped at the initial budget.
    pub fn without_participant(&self, id: ContactId, refund: Amount) -> Event {
        let mut next = self.clone();
        next.participants.retain(|p| *p != id);
        next.remaining_budget = next
            .remaining_budget
            .saturating_add(refund)
            .min(next.initial_budget);
        next
    }

    /// Copy with every participant dropped and the whole budget restored.
    pub fn without_participants(&self) -> Event {
        let mut next = self.clone();
        next.participants.clear();
        next.remaining_budget = next.initial_budget;
        next
    }

    /// Copy with new descriptive fields and budgets, keeping participants.
    ///
    /// The caller guarantees `remaining_budget <= initial_budget`.
    pub fn with_details(
        &self,
        name: EventName,
        date: EventDate,
        time: EventTime,
        initial_budget: Amount,
        remaining_budget: Amount,
    ) -> Event {
        Event {
            name,
            date,
            time,
            participants: self.participants.clone(),
            initial_budget,
            remaining_budget: remaining_budget.min(initial_budget),
        }
    }

    /// Copy with the remaining budget replaced, capped at the initial budget.
    pub fn with_remaining_budget(&self, remaining_budget: Amount) -> Event {
        let mut next = self.clone();
        next.remaining_budget = remaining_budget.min(next.initial_budget);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(budget: u64) -> Event {
        Event::new(
            EventName::parse("Party").unwrap(),
            EventDate::parse("12-12-2030").unwrap(),
            EventTime::parse("18:00").unwrap(),
            Amount::whole(budget),
        )
    }

    #[test]
    fn test_new_event_has_full_budget() {
        let event = party(500);
        assert_eq!(event.remaining_budget(), Amount::whole(500));
        assert_eq!(event.spent(), Amount::ZERO);
        assert!(event.participants().is_empty());
    }

    #[test]
    fn test_assign_and_unassign_budget() {
        let a = ContactId::new();
        let b = ContactId::new();
        let event = party(500)
            .with_participant(a, Amount::whole(100))
            .with_participant(b, Amount::whole(200));
        assert_eq!(event.remaining_budget(), Amount::whole(200));
        assert_eq!(event.participants(), &[a, b]);

        let event = event.without_participant(a, Amount::whole(100));
        assert_eq!(event.remaining_budget(), Amount::whole(300));
        assert_eq!(event.participants(), &[b]);
    }

    #[test]
    fn test_refund_is_capped_at_initial() {
        let a = ContactId::new();
        let event = party(100).with_participant(a, Amount::whole(10));
        let event = event.without_participant(a, Amount::whole(50));
        assert_eq!(event.remaining_budget(), Amount::whole(100));
    }

    #[test]
    fn test_restore_rejects_broken_invariants() {
        let name = EventName::parse("Party").unwrap();
        let date = EventDate::parse("12-12-2030").unwrap();
        let time = EventTime::parse("18:00").unwrap();
        let id = ContactId::new();

        let over = Event::restore(
            name.clone(),
            date,
            time,
            vec![],
            Amount::whole(10),
            Amount::whole(20),
        );
        assert!(over.is_err());

        let twice = Event::restore(
            name,
            date,
            time,
            vec![id, id],
            Amount::whole(10),
            Amount::whole(10),
        );
        assert!(twice.is_err());
    }

    #[test]
    fn test_same_event_ignores_case() {
        let a = party(1);
        let b = Event::new(
            EventName::parse("PARTY").unwrap(),
            EventDate::parse("01-01-2031").unwrap(),
            EventTime::parse("10:00").unwrap(),
            Amount::ZERO,
        );
        assert!(a.is_same_event(&b));
    }
}
