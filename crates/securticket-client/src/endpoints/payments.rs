//! Payment endpoints for the hosted payment-element flow.

use securticket_core::result::AppResult;
use securticket_entity::payment::{
    PaymentConfirmRequest, PaymentIntent, PaymentIntentRequest, PaymentStatus,
};

use crate::http::{ApiClient, Method};
use crate::response;

impl ApiClient {
    /// POST `/payments/create-payment-intent/` — start a hosted payment
    /// flow for a pending booking.
    pub async fn create_payment_intent(&self, booking_id: i64) -> AppResult<PaymentIntent> {
        let body = serde_json::to_value(PaymentIntentRequest { booking_id })?;
        let response = self
            .dispatch(Method::Post, "/payments/create-payment-intent/", Some(body))
            .await?;
        response::into_result(response)
    }

    /// POST `/payments/confirm-manual/` — finalize the booking after the
    /// payment element reported success.
    pub async fn confirm_payment(&self, request: &PaymentConfirmRequest) -> AppResult<()> {
        let body = serde_json::to_value(request)?;
        let response = self
            .dispatch(Method::Post, "/payments/confirm-manual/", Some(body))
            .await?;
        response::into_unit_result(response)
    }

    /// GET `/payments/status/{booking_id}/` — payment status for a booking.
    pub async fn payment_status(&self, booking_id: i64) -> AppResult<PaymentStatus> {
        let response = self
            .dispatch(Method::Get, &format!("/payments/status/{booking_id}/"), None)
            .await?;
        response::into_result(response)
    }
}
