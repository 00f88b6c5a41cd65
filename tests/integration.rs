//! Integration tests for the party book.

use chrono::NaiveDate;
use partybook::{
    Amount, Book, BookError, ClearTarget, Command, Contact, ContactFilter, EditEventDescriptor,
    Email, ErrorKind, EventDate, EventName, EventTime, FixedClock, Index, Name, NewEvent, Outcome,
    Phone, Tag,
};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn test_book() -> Book {
    init_tracing();
    let now = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    Book::new(Arc::new(FixedClock(now)))
}

fn contact(name: &str, budget: &str) -> Contact {
    Contact::new(
        Name::parse(name).unwrap(),
        Phone::parse("91234567").unwrap(),
        Email::parse("guest@example.com").unwrap(),
    )
    .with_budget(Amount::parse(budget).unwrap())
}

fn party(name: &str, date: &str, budget: &str) -> NewEvent {
    NewEvent::new(
        EventName::parse(name).unwrap(),
        EventDate::parse(date).unwrap(),
        EventTime::parse("19:00").unwrap(),
        Amount::parse(budget).unwrap(),
    )
}

fn idx(one_based: usize) -> Index {
    Index::from_one_based(one_based).unwrap()
}

fn run(book: &mut Book, command: Command) -> String {
    command.execute(book).unwrap().feedback().to_string()
}

// --- Scenarios ---

#[test]
fn test_duplicate_contact_is_rejected() {
    let mut book = test_book();
    run(&mut book, Command::AddContact(contact("Alice", "100")));

    let err = Command::AddContact(contact("Alice", "100"))
        .execute(&mut book)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateEntity);

    let alices = book
        .store()
        .contacts()
        .iter()
        .filter(|c| c.name().as_str() == "Alice")
        .count();
    assert_eq!(alices, 1);
}

#[test]
fn test_assign_then_unassign_moves_budget() {
    let mut book = test_book();
    run(&mut book, Command::AddContact(contact("Alice", "100")));
    run(&mut book, Command::AddContact(contact("Bob", "200")));
    run(&mut book, Command::AddEvent(party("Party", "14-02-2026", "500")));

    let feedback = run(
        &mut book,
        Command::Assign {
            event: idx(1),
            contacts: vec![idx(1), idx(2)],
        },
    );
    assert_eq!(
        feedback,
        "Assigned the following people to Party's party: Alice, Bob"
    );
    assert_eq!(
        book.store().events()[0].remaining_budget(),
        Amount::whole(200)
    );

    run(
        &mut book,
        Command::Unassign {
            event: idx(1),
            contacts: vec![idx(1)],
        },
    );
    let event = &book.store().events()[0];
    assert_eq!(event.remaining_budget(), Amount::whole(300));
    assert_eq!(event.participants().len(), 1);
}

#[test]
fn test_budget_exceeded_leaves_event_alone() {
    let mut book = test_book();
    run(&mut book, Command::AddContact(contact("Carol", "600")));
    run(&mut book, Command::AddEvent(party("Party", "14-02-2026", "500")));
    let before = book.store().events()[0].clone();

    let err = Command::Assign {
        event: idx(1),
        contacts: vec![idx(1)],
    }
    .execute(&mut book)
    .unwrap_err();

    assert!(matches!(err, BookError::BudgetExceeded { .. }));
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    assert_eq!(book.store().events()[0], before);
}

#[test]
fn test_saved_state_undoes_direct_add() {
    let mut book = test_book();
    book.save_state_for_undo("add p");
    book.store_mut().add_contact(contact("Bob", "0")).unwrap();

    assert_eq!(book.undo(), "add p");
    let bob = Name::parse("Bob").unwrap();
    assert!(book.store().find_contact_by_name(&bob).is_none());
}

#[test]
fn test_double_booking_rejected() {
    let mut book = test_book();
    run(&mut book, Command::AddContact(contact("Alice", "10")));
    run(
        &mut book,
        Command::AddEvent(party("Lunch", "14-02-2026", "100").with_contacts([idx(1)])),
    );
    run(&mut book, Command::AddEvent(party("Dinner", "14-02-2026", "100")));
    let before = book.store().events().to_vec();

    let err = Command::Assign {
        event: idx(2),
        contacts: vec![idx(1)],
    }
    .execute(&mut book)
    .unwrap_err();

    assert!(matches!(err, BookError::ScheduleConflict { ref other, .. } if other == "Lunch"));
    assert_eq!(book.store().events(), before.as_slice());

    // Inline assignment on a new party that day is refused too
    let err = Command::AddEvent(party("Supper", "14-02-2026", "100").with_contacts([idx(1)]))
        .execute(&mut book)
        .unwrap_err();
    assert!(matches!(err, BookError::ScheduleConflict { .. }));
    assert_eq!(book.store().events().len(), 2);
}

// --- Workflows ---

#[test]
fn test_delete_contact_restores_event_budget() {
    let mut book = test_book();
    run(&mut book, Command::AddContact(contact("Alice", "150")));
    run(
        &mut book,
        Command::AddEvent(party("Party", "14-02-2026", "500").with_contacts([idx(1)])),
    );
    assert_eq!(
        book.store().events()[0].remaining_budget(),
        Amount::whole(350)
    );

    let outcome = Command::DeleteContact(idx(1)).execute(&mut book).unwrap();
    let confirmation = outcome.into_pending().unwrap();
    assert_eq!(book.store().contacts().len(), 1);

    let outcome = Command::Confirm(confirmation).execute(&mut book).unwrap();
    assert_eq!(outcome.feedback(), "Deleted Contact: Alice");

    let event = &book.store().events()[0];
    assert!(event.participants().is_empty());
    assert_eq!(event.remaining_budget(), Amount::whole(500));
}

#[test]
fn test_view_and_find() {
    let mut book = test_book();
    run(
        &mut book,
        Command::AddContact(contact("Alice", "0").with_tags([Tag::parse("friends").unwrap()])),
    );
    run(&mut book, Command::AddContact(contact("Bob", "0")));
    run(&mut book, Command::AddContact(contact("Charlie", "0")));
    // Visible order: Alice, Bob, Charlie
    run(
        &mut book,
        Command::AddEvent(party("Party", "14-02-2026", "0").with_contacts([idx(2), idx(3)])),
    );

    let feedback = run(&mut book, Command::ViewEvent(idx(1)));
    assert_eq!(feedback, "Listed all people assigned to party: Party");
    let names: Vec<_> = book
        .visible_contacts()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(names, vec!["Bob", "Charlie"]);

    // Indexes now refer to the filtered view
    let err = Command::DeleteContact(idx(3)).execute(&mut book).unwrap_err();
    assert!(matches!(err, BookError::InvalidContactIndex { index: 3, len: 2 }));

    let feedback = run(&mut book, Command::FindContacts(vec!["FRIENDS".into()]));
    assert_eq!(feedback, "1 contacts listed!");
    assert_eq!(book.visible_contacts()[0].name().as_str(), "Alice");

    run(&mut book, Command::ListContacts);
    assert!(matches!(book.contact_filter(), ContactFilter::All));
    assert_eq!(book.visible_contacts().len(), 3);

    let feedback = run(&mut book, Command::ListTags);
    assert_eq!(feedback, "Listed all tags:\nfriends");
}

#[test]
fn test_edit_event_date_and_budget() {
    let mut book = test_book();
    run(&mut book, Command::AddContact(contact("Alice", "40")));
    run(
        &mut book,
        Command::AddEvent(party("Party", "14-02-2026", "100").with_contacts([idx(1)])),
    );

    let edit = EditEventDescriptor {
        date: Some(EventDate::parse("15-02-2026").unwrap()),
        budget: Some(Amount::whole(50)),
        ..Default::default()
    };
    let feedback = run(&mut book, Command::EditEvent { index: idx(1), edit });
    assert_eq!(feedback, "Edited Party: Party");

    let event = &book.store().events()[0];
    assert_eq!(event.date().to_string(), "15-02-2026");
    assert_eq!(event.initial_budget(), Amount::whole(50));
    assert_eq!(event.remaining_budget(), Amount::whole(10));
}

#[test]
fn test_clear_requires_confirmation() {
    let mut book = test_book();
    run(&mut book, Command::AddContact(contact("Alice", "0")));
    run(&mut book, Command::AddEvent(party("Party", "14-02-2026", "0")));

    let outcome = Command::Clear(ClearTarget::Events)
        .execute(&mut book)
        .unwrap();
    assert!(!outcome.mutated());
    let Outcome::Pending(confirmation) = outcome else {
        panic!("clear should ask for confirmation");
    };
    assert_eq!(book.store().events().len(), 1);

    let feedback = Command::Confirm(confirmation)
        .execute(&mut book)
        .unwrap()
        .feedback()
        .to_string();
    assert_eq!(feedback, "Parties have been cleared!");
    assert!(book.store().events().is_empty());
    assert_eq!(book.store().contacts().len(), 1);
}

#[test]
fn test_undo_command_messages() {
    let mut book = test_book();
    let err = Command::Undo.execute(&mut book).unwrap_err();
    assert!(matches!(err, BookError::NothingToUndo));

    run(&mut book, Command::AddEvent(party("Party", "14-02-2026", "0")));
    let feedback = run(&mut book, Command::Undo);
    assert_eq!(feedback, "Previous command undone: add party Party");
    assert!(book.store().events().is_empty());
}
