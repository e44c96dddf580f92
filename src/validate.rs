//! Admission rules for new bookings.
//!
//! [`validate`] is a pure decision: it reads the catalog and a snapshot of the
//! store and either admits the request or names the first rule it broke. It
//! never writes; committing an [`Admission`] is up to the caller, which must
//! keep the store locked between the decision and the insert.
//!
//! Rules are checked in this order and the first failure wins:
//! 1. every field present and well-formed ([`BookingError::MalformedRequest`])
//! 2. the room exists ([`BookingError::UnknownRoom`])
//! 3. start is strictly before end ([`BookingError::InvalidInterval`])
//! 4. start is not before now ([`BookingError::PastBooking`])
//! 5. no overlap with another booking of the room ([`BookingError::RoomConflict`])

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::construct::{Booking, BookingKeeper, RoomId, RoomKeeper, Span};
use crate::datatype::Timestamp;
use crate::error::{BookingError, Result};

/// A booking request as it arrives, before anything has been checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: Option<RoomId>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub user: Option<String>,
}

impl BookingRequest {
    pub fn new(room_id: RoomId, start: &str, end: &str, user: &str) -> Self {
        Self {
            room_id: Some(room_id),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            user: Some(user.to_string()),
        }
    }
}

/// A request whose fields are present and parsed, but not yet checked
/// against the catalog or the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub room_id: RoomId,
    pub start: Timestamp,
    pub end: Timestamp,
    pub user: String,
}

impl TryFrom<&BookingRequest> for Candidate {
    type Error = BookingError;

    fn try_from(request: &BookingRequest) -> Result<Self> {
        let (Some(room_id), Some(start), Some(end), Some(user)) = (
            request.room_id,
            request.start.as_deref(),
            request.end.as_deref(),
            request.user.as_deref(),
        ) else {
            return Err(BookingError::missing_fields());
        };
        if room_id == 0 || start.is_empty() || end.is_empty() || user.is_empty() {
            return Err(BookingError::missing_fields());
        }
        let (Some(start), Some(end)) = (Timestamp::parse(start), Timestamp::parse(end)) else {
            return Err(BookingError::invalid_date());
        };
        Ok(Candidate {
            room_id,
            start,
            end,
            user: user.to_string(),
        })
    }
}

/// Everything `BookingKeeper::insert` needs for an accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub room_id: RoomId,
    pub start: Timestamp,
    pub end: Timestamp,
    pub user: String,
}

impl Admission {
    pub fn span(&self) -> Span {
        Span::new(self.start.instant(), self.end.instant())
    }
    pub fn commit(self, bookings: &mut BookingKeeper) -> Booking {
        bookings.insert(self.room_id, self.start, self.end, self.user)
    }
}

pub fn validate(
    request: &BookingRequest,
    rooms: &RoomKeeper,
    bookings: &BookingKeeper,
    now: DateTime<Utc>,
) -> Result<Admission> {
    let candidate = Candidate::try_from(request)?;
    check(candidate, rooms, bookings, now)
}

/// Rules 2 to 5, for a candidate that is already well-formed.
pub fn check(
    candidate: Candidate,
    rooms: &RoomKeeper,
    bookings: &BookingKeeper,
    now: DateTime<Utc>,
) -> Result<Admission> {
    if !rooms.exists(candidate.room_id) {
        return Err(BookingError::UnknownRoom(candidate.room_id));
    }
    if candidate.start >= candidate.end {
        return Err(BookingError::InvalidInterval);
    }
    // closed lower bound: starting exactly now is fine
    if candidate.start.instant() < now {
        return Err(BookingError::PastBooking);
    }
    let span = Span::new(candidate.start.instant(), candidate.end.instant());
    if let Some(with) = bookings.overlapping(candidate.room_id, &span).next() {
        return Err(BookingError::RoomConflict { with });
    }
    Ok(Admission {
        room_id: candidate.room_id,
        start: candidate.start,
        end: candidate.end,
        user: candidate.user,
    })
}
