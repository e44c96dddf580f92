//! Roombook – a small in-memory room booking service.
//!
//! A fixed catalog of rooms can be booked for half-open time intervals
//! `[start, end)`. Requests are checked before anything is stored: the room
//! must exist, the interval must be non-empty and not start in the past, and
//! it must not overlap another booking of the same room. Touching endpoints,
//! one booking ending exactly when the next begins, are fine.
//!
//! ## Modules
//! * [`construct`] – Rooms, bookings, spans and the keepers that own them.
//! * [`datatype`] – [`datatype::Timestamp`], an RFC3339 instant that keeps its original text.
//! * [`validate`] – The admission rules, as a pure function over a store snapshot.
//! * [`interface`] – [`interface::BookingInterface`], the locked handle shared with handlers.
//! * [`server`] – The axum router exposing rooms and bookings as JSON.
//! * [`settings`] – Layered configuration (defaults, file, environment).
//! * [`error`] – [`error::BookingError`] and the crate `Result` alias.
//!
//! ## HTTP
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/rooms` | all rooms |
//! | GET | `/bookings` | all bookings |
//! | GET | `/bookings/room?roomId=N` | bookings of one room |
//! | POST | `/bookings` | create from `{roomId, start, end, user}` |
//! | DELETE | `/bookings?id=N` | delete one booking |
//!
//! ## Quick Start
//! ```
//! use roombook::construct::RoomKeeper;
//! use roombook::interface::{BookingInterface, Clock};
//! use roombook::validate::BookingRequest;
//! let clock = Clock::Fixed("2026-01-01T00:00:00Z".parse().unwrap());
//! let desk = BookingInterface::new(RoomKeeper::default(), clock);
//! let booking = desk
//!     .submit(&BookingRequest::new(1, "2026-06-01T10:00:00Z", "2026-06-01T11:00:00Z", "alice"))
//!     .unwrap();
//! assert_eq!(booking.id, 1);
//! assert_eq!(desk.bookings_for_room(1).unwrap().len(), 1);
//! ```

pub mod construct;
pub mod datatype;
pub mod error;
pub mod interface;
pub mod server;
pub mod settings;
pub mod validate;
