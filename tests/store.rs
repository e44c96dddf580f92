use roombook::construct::{BookingKeeper, Span};
use roombook::datatype::Timestamp;

fn ts(s: &str) -> Timestamp {
    s.parse().expect("valid timestamp")
}

// one hour slot starting at the given hour on 2026-06-01
fn slot(keeper: &mut BookingKeeper, room: u64, hour: u32, user: &str) -> u64 {
    let start = ts(&format!("2026-06-01T{hour:02}:00:00Z"));
    let end = ts(&format!("2026-06-01T{:02}:00:00Z", hour + 1));
    keeper.insert(room, start, end, user.to_string()).id
}

#[test]
fn insert_assigns_increasing_ids() {
    let mut keeper = BookingKeeper::new();
    assert!(keeper.is_empty());
    let ids: Vec<u64> = (0..4).map(|i| slot(&mut keeper, 1, 8 + i, "alice")).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(keeper.len(), 4);
}

#[test]
fn delete_leaves_others_untouched() {
    let mut keeper = BookingKeeper::new();
    for i in 0..5 {
        slot(&mut keeper, 1 + (i % 2) as u64, 8 + i, "alice");
    }
    let before = keeper.list_all();
    assert!(keeper.delete_by_id(3));
    let after = keeper.list_all();
    assert_eq!(after.len(), 4);
    let expected: Vec<_> = before.into_iter().filter(|b| b.id != 3).collect();
    assert_eq!(after, expected, "remaining bookings unchanged and in order");
    for booking in &after {
        assert_eq!(keeper.find_by_id(booking.id).as_ref(), Some(booking));
    }
    assert!(keeper.find_by_id(3).is_none());
}

#[test]
fn delete_of_missing_id_reports_false() {
    let mut keeper = BookingKeeper::new();
    slot(&mut keeper, 1, 9, "alice");
    assert!(!keeper.delete_by_id(42));
    assert!(keeper.delete_by_id(1));
    assert!(!keeper.delete_by_id(1), "second delete finds nothing");
}

#[test]
fn ids_are_never_reused() {
    let mut keeper = BookingKeeper::new();
    let first = slot(&mut keeper, 1, 9, "alice");
    assert!(keeper.delete_by_id(first));
    let second = slot(&mut keeper, 1, 9, "bob");
    assert_eq!(second, 2);
    assert!(keeper.delete_by_id(second));
    let third = slot(&mut keeper, 1, 9, "carl");
    assert_eq!(third, 3);
    assert_eq!(keeper.lower_bound(), 3);
}

#[test]
fn list_by_room_filters_in_insertion_order() {
    let mut keeper = BookingKeeper::new();
    // later slot inserted first, so insertion order differs from time order
    let late = slot(&mut keeper, 1, 15, "alice");
    slot(&mut keeper, 2, 9, "bob");
    let early = slot(&mut keeper, 1, 9, "carl");
    let ids: Vec<u64> = keeper.list_by_room(1).iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![late, early]);
    assert!(keeper.list_by_room(3).is_empty());
}

#[test]
fn listing_does_not_mutate() {
    let mut keeper = BookingKeeper::new();
    slot(&mut keeper, 1, 9, "alice");
    slot(&mut keeper, 2, 10, "bob");
    let all = keeper.list_all();
    let room = keeper.list_by_room(1);
    assert_eq!(keeper.list_all(), all);
    assert_eq!(keeper.list_by_room(1), room);
    assert_eq!(keeper.len(), 2);
}

#[test]
fn overlapping_uses_half_open_spans() {
    let mut keeper = BookingKeeper::new();
    let nine = slot(&mut keeper, 1, 9, "alice");
    let eleven = slot(&mut keeper, 1, 11, "bob");
    slot(&mut keeper, 2, 9, "carl");

    let query = Span::new(ts("2026-06-01T09:30:00Z").instant(), ts("2026-06-01T11:30:00Z").instant());
    assert_eq!(keeper.overlapping(1, &query).collect::<Vec<_>>(), vec![nine, eleven]);

    let gap = Span::new(ts("2026-06-01T10:00:00Z").instant(), ts("2026-06-01T11:00:00Z").instant());
    assert_eq!(keeper.overlapping(1, &gap).count(), 0, "touching both neighbours is not overlap");

    assert_eq!(keeper.overlapping(3, &query).count(), 0);
}

#[test]
fn overlapping_forgets_deleted_bookings() {
    let mut keeper = BookingKeeper::new();
    let id = slot(&mut keeper, 1, 9, "alice");
    let span = keeper.find_by_id(id).unwrap().span();
    assert_eq!(keeper.overlapping(1, &span).count(), 1);
    keeper.delete_by_id(id);
    assert_eq!(keeper.overlapping(1, &span).count(), 0);
}

#[test]
fn timestamps_round_trip_their_text() {
    let mut keeper = BookingKeeper::new();
    let booking = keeper.insert(
        1,
        ts("2026-06-01T12:00:00+02:00"),
        ts("2026-06-01T11:00:00.500Z"),
        "alice".into(),
    );
    let json = serde_json::to_value(&booking).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 1,
            "roomId": 1,
            "start": "2026-06-01T12:00:00+02:00",
            "end": "2026-06-01T11:00:00.500Z",
            "user": "alice"
        })
    );
    // offset is honoured when comparing
    assert_eq!(ts("2026-06-01T12:00:00+02:00"), ts("2026-06-01T10:00:00Z"));
}

#[test]
fn insert_accepts_a_reversed_interval() {
    let mut keeper = BookingKeeper::new();
    let booking = keeper.insert(1, ts("2026-06-01T11:00:00Z"), ts("2026-06-01T10:00:00Z"), "alice".into());
    assert_eq!(booking.id, 1);
    assert_eq!(keeper.find_by_id(1), Some(booking));
    assert!(keeper.delete_by_id(1));
}

#[test]
fn space_separated_timestamps_do_not_parse() {
    assert!(Timestamp::parse("2026-06-01 10:00:00Z").is_none());
    assert!(Timestamp::parse("2026-06-01T10:00:00Z").is_some());
    assert!("2026-06-01 10:00:00+02:00".parse::<Timestamp>().is_err());
}
