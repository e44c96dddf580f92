use std::collections::{BTreeMap, HashMap};

// other lookups use HashMap with a fast hasher
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;

// used to compare and order spans
use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

// used to print out readable forms of a construct
use std::fmt;

use crate::datatype::Timestamp;

// ------------- Identifiers -------------
pub type RoomId = u64;
pub type BookingId = u64;

pub type RoomHasher = BuildHasherDefault<SeaHasher>;

pub const GENESIS: BookingId = 0;

/// Hands out booking identifiers. Unlike a generator that recycles released
/// values, this one only ever moves forward, so a deleted id is never seen again.
#[derive(Debug)]
pub struct BookingGenerator {
    lower_bound: BookingId,
}

impl BookingGenerator {
    pub fn new() -> Self {
        Self { lower_bound: GENESIS }
    }
    pub fn generate(&mut self) -> BookingId {
        self.lower_bound += 1;
        self.lower_bound
    }
    pub fn lower_bound(&self) -> BookingId {
        self.lower_bound
    }
}

impl Default for BookingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- Span -------------
/// Half-open interval `[start, end)`. A reversed pair is kept as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Span {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
    // touching endpoints do not overlap
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

// ------------- Room -------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// The fixed catalog of rooms. Built once and only read afterwards.
#[derive(Debug, Clone)]
pub struct RoomKeeper {
    kept: Vec<Room>,
}

impl RoomKeeper {
    /// Rooms get identifiers 1, 2, ... in the order their names are given.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let kept = names
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Room::new(id, name))
            .collect();
        Self { kept }
    }
    pub fn exists(&self, room_id: RoomId) -> bool {
        self.kept.iter().any(|room| room.id == room_id)
    }
    pub fn get(&self, room_id: RoomId) -> Option<&Room> {
        self.kept.iter().find(|room| room.id == room_id)
    }
    pub fn list(&self) -> &[Room] {
        &self.kept
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

impl Default for RoomKeeper {
    fn default() -> Self {
        Self::from_names(["Room A", "Room B", "Room C"])
    }
}

// ------------- Booking -------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    pub start: Timestamp,
    pub end: Timestamp,
    pub user: String,
}

impl Booking {
    pub fn span(&self) -> Span {
        Span::new(self.start.instant(), self.end.instant())
    }
}

/// Owns every booking together with the identifier generator.
///
/// Identifiers only grow, so ordering the map by id is the same as ordering
/// by insertion. Each room additionally keeps its spans sorted by start,
/// which lets `overlapping` stop as soon as a span starts at or after the
/// end of the query window.
#[derive(Debug, Default)]
pub struct BookingKeeper {
    generator: BookingGenerator,
    kept: BTreeMap<BookingId, Booking>,
    room_lookup: HashMap<RoomId, Vec<(Span, BookingId)>, RoomHasher>,
}

impl BookingKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    pub fn lower_bound(&self) -> BookingId {
        self.generator.lower_bound()
    }

    /// Stores a booking without any checks and never fails; callers validate first.
    pub fn insert(
        &mut self,
        room_id: RoomId,
        start: Timestamp,
        end: Timestamp,
        user: String,
    ) -> Booking {
        let id = self.generator.generate();
        let booking = Booking { id, room_id, start, end, user };
        let span = booking.span();
        let spans = self.room_lookup.entry(room_id).or_default();
        let pos = spans.partition_point(|(s, _)| s.start <= span.start);
        spans.insert(pos, (span, id));
        self.kept.insert(id, booking.clone());
        booking
    }

    pub fn remove(&mut self, id: BookingId) -> Option<Booking> {
        let booking = self.kept.remove(&id)?;
        if let Some(spans) = self.room_lookup.get_mut(&booking.room_id) {
            spans.retain(|(_, kept_id)| *kept_id != id);
            if spans.is_empty() {
                self.room_lookup.remove(&booking.room_id);
            }
        }
        Some(booking)
    }

    pub fn delete_by_id(&mut self, id: BookingId) -> bool {
        self.remove(id).is_some()
    }

    pub fn find_by_id(&self, id: BookingId) -> Option<Booking> {
        self.kept.get(&id).cloned()
    }

    pub fn list_all(&self) -> Vec<Booking> {
        self.kept.values().cloned().collect()
    }

    pub fn list_by_room(&self, room_id: RoomId) -> Vec<Booking> {
        self.kept
            .values()
            .filter(|booking| booking.room_id == room_id)
            .cloned()
            .collect()
    }

    /// Ids of bookings in `room_id` whose span overlaps `query`, earliest start first.
    pub fn overlapping(&self, room_id: RoomId, query: &Span) -> impl Iterator<Item = BookingId> + '_ {
        let spans = self
            .room_lookup
            .get(&room_id)
            .map(|spans| spans.as_slice())
            .unwrap_or_default();
        // everything from right_bound on starts at or after query.end
        let right_bound = spans.partition_point(|(s, _)| s.start < query.end);
        let query = *query;
        spans[..right_bound]
            .iter()
            .filter(move |(span, _)| span.overlaps(&query))
            .map(|(_, id)| *id)
    }
}
