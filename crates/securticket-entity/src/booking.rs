//! Booking types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::Event;

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created but not yet paid.
    Pending,
    /// Payment completed.
    Confirmed,
    /// Cancelled; seats returned to the event.
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A booking as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Numeric booking ID.
    pub id: i64,
    /// ID of the booked event.
    pub event: i64,
    /// Full event details, when the endpoint embeds them.
    #[serde(default)]
    pub event_details: Option<Event>,
    /// Username of the booking owner, when embedded.
    #[serde(default)]
    pub user_username: Option<String>,
    /// Number of seats booked.
    pub seats_booked: u32,
    /// Server-computed total as a decimal string.
    pub total_price: String,
    /// Current status.
    pub status: BookingStatus,
    /// Payment intent ID once a payment was started.
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    /// Short unique booking reference.
    pub booking_reference: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for creating a booking. The server validates seat
/// availability and computes the total price.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    /// ID of the event to book.
    pub event: i64,
    /// Number of seats requested.
    pub seats_booked: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_deserializes() {
        let json = r#"{
            "id": 11,
            "event": 3,
            "seats_booked": 2,
            "total_price": "51.00",
            "status": "pending",
            "booking_reference": "A1B2C3D4"
        }"#;
        let booking: Booking = serde_json::from_str(json).expect("deserialize");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.event_details.is_none());
    }
}
