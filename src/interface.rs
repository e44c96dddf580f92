//! Shared handle to the catalog and the booking store.
//!
//! [`BookingInterface`] is built once at startup and handed to the HTTP layer
//! behind an `Arc`. It owns the only lock around the store: submissions and
//! cancellations take it exclusively and keep it from the overlap check until
//! the insert is done, so two overlapping requests can never both get in.
//! Listings take it shared.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::construct::{Booking, BookingId, BookingKeeper, Room, RoomId, RoomKeeper};
use crate::error::{BookingError, Result};
use crate::validate::{BookingRequest, validate};

/// Source of the "now" that the past-booking rule compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(instant) => *instant,
        }
    }
}

#[derive(Debug)]
pub struct BookingInterface {
    rooms: Arc<RoomKeeper>,
    bookings: RwLock<BookingKeeper>,
    clock: Clock,
}

impl BookingInterface {
    pub fn new(rooms: RoomKeeper, clock: Clock) -> Self {
        Self {
            rooms: Arc::new(rooms),
            bookings: RwLock::new(BookingKeeper::new()),
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BookingKeeper>> {
        self.bookings
            .read()
            .map_err(|e| BookingError::Lock(e.to_string()))
    }
    fn write(&self) -> Result<RwLockWriteGuard<'_, BookingKeeper>> {
        self.bookings
            .write()
            .map_err(|e| BookingError::Lock(e.to_string()))
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.list().to_vec()
    }

    pub fn bookings(&self) -> Result<Vec<Booking>> {
        Ok(self.read()?.list_all())
    }

    pub fn bookings_for_room(&self, room_id: RoomId) -> Result<Vec<Booking>> {
        if !self.rooms.exists(room_id) {
            return Err(BookingError::UnknownRoom(room_id));
        }
        Ok(self.read()?.list_by_room(room_id))
    }

    pub fn find(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self.read()?.find_by_id(id))
    }

    /// Validates and stores a booking as one step under the write lock.
    pub fn submit(&self, request: &BookingRequest) -> Result<Booking> {
        let mut bookings = self.write()?;
        let now = self.clock.now();
        let admission = validate(request, &self.rooms, &bookings, now)?;
        debug!(room_id = admission.room_id, span = %admission.span(), "admitted");
        let booking = admission.commit(&mut bookings);
        info!(id = booking.id, room_id = booking.room_id, user = %booking.user, "booking created");
        Ok(booking)
    }

    pub fn cancel(&self, id: BookingId) -> Result<Booking> {
        let removed = self.write()?.remove(id);
        match removed {
            Some(booking) => {
                info!(id, room_id = booking.room_id, "booking deleted");
                Ok(booking)
            }
            None => Err(BookingError::NotFound(id)),
        }
    }
}

impl Default for BookingInterface {
    fn default() -> Self {
        Self::new(RoomKeeper::default(), Clock::System)
    }
}
