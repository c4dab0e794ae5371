//! Booking endpoints.

use securticket_core::result::AppResult;
use securticket_entity::booking::{Booking, BookingRequest};

use crate::http::{ApiClient, Method};
use crate::response;

impl ApiClient {
    /// POST `/bookings/` — create a booking. The server validates seat
    /// availability and computes the total price; seat/validation errors
    /// surface verbatim.
    pub async fn create_booking(&self, request: &BookingRequest) -> AppResult<Booking> {
        let body = serde_json::to_value(request)?;
        let response = self.dispatch(Method::Post, "/bookings/", Some(body)).await?;
        response::into_result(response)
    }

    /// GET `/bookings/my_bookings/` — list the current user's bookings.
    pub async fn my_bookings(&self) -> AppResult<Vec<Booking>> {
        let response = self
            .dispatch(Method::Get, "/bookings/my_bookings/", None)
            .await?;
        response::into_result(response)
    }

    /// POST `/bookings/{id}/cancel/` — cancel a booking; the server
    /// returns the seats to the event.
    pub async fn cancel_booking(&self, id: i64) -> AppResult<()> {
        let response = self
            .dispatch(Method::Post, &format!("/bookings/{id}/cancel/"), None)
            .await?;
        response::into_unit_result(response)
    }
}
