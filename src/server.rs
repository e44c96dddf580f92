use std::sync::Arc;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use serde::Serialize;
use tracing::{error, info, warn};
use crate::construct::{Booking, BookingId, Room, RoomId};
use crate::error::BookingError;
use crate::interface::BookingInterface;
use crate::validate::BookingRequest;

pub type AppState = Arc<BookingInterface>;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

// Query values stay raw strings so a bad number gets our own 400 message,
// and a repeated key takes its first value.
type QueryPairs = Vec<(String, String)>;

fn first<'a>(pairs: &'a QueryPairs, key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

impl BookingError {
    pub fn status(&self) -> StatusCode {
        match self {
            BookingError::MalformedRequest(_)
            | BookingError::InvalidInterval
            | BookingError::PastBooking => StatusCode::BAD_REQUEST,
            BookingError::UnknownRoom(_) | BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::RoomConflict { .. } => StatusCode::CONFLICT,
            BookingError::Config(_) | BookingError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = if status.is_server_error() {
            error!(error = %self, "internal error");
            "Internal error".to_string()
        } else {
            warn!(error = %self, code = %status.as_u16(), "request rejected");
            self.to_string()
        };
        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

fn reject(message: &str) -> BookingError {
    BookingError::MalformedRequest(message.to_string())
}

pub fn router(interface: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);
    Router::new()
        .route("/rooms", get(list_rooms))
        .route(
            "/bookings",
            get(list_bookings).post(create_booking).delete(delete_booking),
        )
        .route("/bookings/room", get(list_bookings_by_room))
        .layer(cors)
        .with_state(interface)
}

async fn list_rooms(State(iface): State<AppState>) -> Json<Vec<Room>> {
    Json(iface.rooms())
}

async fn list_bookings(State(iface): State<AppState>) -> Result<Json<Vec<Booking>>, BookingError> {
    Ok(Json(iface.bookings()?))
}

async fn list_bookings_by_room(
    State(iface): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<Booking>>, BookingError> {
    let Query(pairs) = query.map_err(|_| reject("Invalid roomId"))?;
    let raw = first(&pairs, "roomId")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| reject("roomId required as query param"))?;
    let room_id: RoomId = raw.parse().map_err(|_| reject("Invalid roomId"))?;
    Ok(Json(iface.bookings_for_room(room_id)?))
}

async fn create_booking(
    State(iface): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), BookingError> {
    let Json(request) = payload.map_err(|e| {
        info!(error = %e, "unreadable booking body");
        BookingError::invalid_json()
    })?;
    let booking = iface.submit(&request)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn delete_booking(
    State(iface): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<MessageBody>, BookingError> {
    let Query(pairs) = query.map_err(|_| reject("Invalid id"))?;
    let id: BookingId = first(&pairs, "id")
        .unwrap_or_default()
        .parse()
        .map_err(|_| reject("Invalid id"))?;
    iface.cancel(id)?;
    Ok(Json(MessageBody { message: "Booking deleted successfully".into() }))
}
