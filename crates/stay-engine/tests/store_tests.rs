//! Tests for the reservation store: identity assignment, replace-by-identity,
//! idempotent removal, room listing and seeding.

use chrono::NaiveDate;
use stay_engine::{
    GuestInfo, Payment, ProposedStay, Reservation, ReservationId, ReservationStore, RoomNumber,
    StayError,
};

fn d(s: &str) -> NaiveDate {
    stay_engine::parse_iso_date(s).unwrap()
}

fn stay(room: u32, name: &str, check_in: &str, check_out: &str) -> ProposedStay {
    ProposedStay {
        room: RoomNumber(room),
        guest: GuestInfo::named(name),
        check_in: d(check_in),
        check_out: d(check_out),
        payment: Payment::default(),
    }
}

#[test]
fn add_assigns_distinct_identities() {
    let mut store = ReservationStore::new();

    let a = store.add(stay(1, "A", "2024-06-01", "2024-06-02"));
    let b = store.add(stay(2, "B", "2024-06-01", "2024-06-02"));
    let c = store.add(stay(3, "C", "2024-06-01", "2024-06-02"));

    assert_ne!(a.id, b.id);
    assert_ne!(b.id, c.id);
    assert_ne!(a.id, c.id);
    assert_eq!(store.len(), 3);
}

#[test]
fn identities_are_not_reused_after_removal() {
    let mut store = ReservationStore::new();
    let a = store.add(stay(1, "A", "2024-06-01", "2024-06-02"));
    store.remove(a.id);

    let b = store.add(stay(1, "B", "2024-06-01", "2024-06-02"));

    assert_ne!(a.id, b.id);
}

#[test]
fn added_record_is_visible_immediately() {
    let mut store = ReservationStore::new();
    let a = store.add(stay(1, "A", "2024-06-01", "2024-06-02"));

    assert_eq!(store.get(a.id), Some(&a));
}

#[test]
fn update_replaces_fields_and_keeps_identity() {
    let mut store = ReservationStore::new();
    let original = store.add(stay(1, "A", "2024-06-01", "2024-06-02"));

    let mut fields = stay(2, "Renamed", "2024-07-01", "2024-07-03");
    fields.guest.phone = "(555) 123-4567".to_string();
    let updated = store.update(original.id, fields).unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.room, RoomNumber(2));
    assert_eq!(updated.guest.name, "Renamed");
    assert_eq!(updated.guest.phone, "(555) 123-4567");
    assert_eq!(store.get(original.id), Some(&updated));
    assert_eq!(store.len(), 1);
}

#[test]
fn update_of_absent_identity_is_not_found() {
    let mut store = ReservationStore::new();

    let err = store
        .update(ReservationId(42), stay(1, "A", "2024-06-01", "2024-06-02"))
        .unwrap_err();

    assert!(matches!(err, StayError::NotFound(_)));
    assert!(store.is_empty());
}

#[test]
fn remove_is_idempotent() {
    let mut store = ReservationStore::new();
    let a = store.add(stay(1, "A", "2024-06-01", "2024-06-02"));

    assert_eq!(store.remove(a.id), Some(a.clone()));
    assert_eq!(store.remove(a.id), None);
    assert!(store.is_empty());
}

#[test]
fn list_by_room_returns_only_that_room() {
    let mut store = ReservationStore::new();
    store.add(stay(1, "A", "2024-06-01", "2024-06-02"));
    store.add(stay(2, "B", "2024-06-01", "2024-06-02"));
    store.add(stay(1, "C", "2024-06-10", "2024-06-12"));

    let mut names: Vec<&str> = store
        .list_by_room(RoomNumber(1))
        .map(|r| r.guest.name.as_str())
        .collect();
    names.sort();

    assert_eq!(names, vec!["A", "C"]);
    assert_eq!(store.list_by_room(RoomNumber(3)).count(), 0);
}

#[test]
fn exempted_payment_discards_supplied_amount() {
    let mut store = ReservationStore::new();
    let mut candidate = stay(1, "A", "2024-06-01", "2024-06-02");
    candidate.payment = Payment {
        amount_paid: "$500".to_string(),
        is_exempted: true,
    };

    let committed = store.add(candidate);

    assert!(committed.payment.is_exempted);
    assert_eq!(committed.payment.amount_paid, "");
    assert_eq!(committed.payment.effective_amount(), "");
    assert_eq!(committed.payment.display(), "EXEMPTED");
}

#[test]
fn unpaid_stay_displays_zero() {
    let mut store = ReservationStore::new();
    let committed = store.add(stay(1, "A", "2024-06-01", "2024-06-02"));
    assert_eq!(committed.payment.display(), "$0.00");
}

// ── Seeding ─────────────────────────────────────────────────────────────────

fn seeded(id: u64, room: u32, check_in: &str, check_out: &str) -> Reservation {
    Reservation::from_stay(ReservationId(id), stay(room, "Seed", check_in, check_out))
}

#[test]
fn seeded_store_resumes_identities_past_largest() {
    let mut store = ReservationStore::from_reservations(vec![
        seeded(7, 1, "2024-06-01", "2024-06-02"),
        seeded(3, 2, "2024-06-01", "2024-06-02"),
    ])
    .unwrap();

    let fresh = store.add(stay(3, "New", "2024-06-01", "2024-06-02"));

    assert_eq!(fresh.id, ReservationId(8));
}

#[test]
fn seeding_rejects_duplicate_identities() {
    let err = ReservationStore::from_reservations(vec![
        seeded(1, 1, "2024-06-01", "2024-06-02"),
        seeded(1, 2, "2024-06-01", "2024-06-02"),
    ])
    .unwrap_err();

    assert!(matches!(err, StayError::InvalidId(_)));
}

#[test]
fn seeding_rejects_reversed_ranges() {
    let mut bad = seeded(1, 1, "2024-06-01", "2024-06-02");
    bad.check_out = d("2024-05-01");

    let err = ReservationStore::from_reservations(vec![bad]).unwrap_err();

    assert!(matches!(err, StayError::RangeInvalid { .. }));
}

#[test]
fn seeding_normalizes_exempted_payments() {
    let mut record = seeded(1, 1, "2024-06-01", "2024-06-02");
    record.payment = Payment {
        amount_paid: "$90".to_string(),
        is_exempted: true,
    };

    let store = ReservationStore::from_reservations(vec![record]).unwrap();

    assert_eq!(store.get(ReservationId(1)).unwrap().payment.amount_paid, "");
}

#[test]
fn seeding_rejects_identity_without_successor() {
    let err = ReservationStore::from_reservations(vec![seeded(
        u64::MAX,
        1,
        "2024-06-01",
        "2024-06-05",
    )])
    .unwrap_err();

    assert!(matches!(err, StayError::InvalidId(_)));
}

#[test]
fn exhausted_counter_restarts_at_lowest_free_identity() {
    let mut store = ReservationStore::from_reservations(vec![
        seeded(1, 1, "2024-06-01", "2024-06-02"),
        seeded(u64::MAX - 1, 2, "2024-06-01", "2024-06-02"),
    ])
    .unwrap();

    let last = store.add(stay(3, "Last", "2024-06-01", "2024-06-02"));
    let wrapped = store.add(stay(3, "Wrapped", "2024-07-01", "2024-07-02"));
    let next = store.add(stay(3, "Next", "2024-08-01", "2024-08-02"));

    assert_eq!(last.id, ReservationId(u64::MAX));
    assert_eq!(wrapped.id, ReservationId(2));
    assert_eq!(next.id, ReservationId(3));
    assert_eq!(store.len(), 5);
}
