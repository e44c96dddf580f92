use thiserror::Error;

use crate::construct::{BookingId, RoomId};

// The Display text of each variant is what clients see in `{"error": ...}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("{0}")]
    MalformedRequest(String),
    #[error("Room not found")]
    UnknownRoom(RoomId),
    #[error("Start time must be before end time")]
    InvalidInterval,
    #[error("Cannot book in the past")]
    PastBooking,
    #[error("Room already booked for this time")]
    RoomConflict { with: BookingId },
    #[error("Booking not found")]
    NotFound(BookingId),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;

impl BookingError {
    pub fn missing_fields() -> Self {
        Self::MalformedRequest("Missing required fields".into())
    }
    pub fn invalid_date() -> Self {
        Self::MalformedRequest("Invalid date format".into())
    }
    pub fn invalid_json() -> Self {
        Self::MalformedRequest("Invalid JSON".into())
    }
}

// Helper conversions
impl From<config::ConfigError> for BookingError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
