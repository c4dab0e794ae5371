//! Payment types for the hosted payment-element flow.

use serde::{Deserialize, Serialize};

/// Response from the payment-intent creation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Client secret handed to the hosted payment element.
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    /// Summary of the booking being paid for.
    pub booking: PaymentBookingSummary,
}

/// Booking summary embedded in the payment-intent response.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentBookingSummary {
    /// Numeric booking ID.
    pub id: i64,
    /// Short booking reference.
    pub reference: String,
    /// Total as a decimal string.
    pub total_price: String,
}

/// Request body for creating a payment intent.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentIntentRequest {
    /// The booking to pay for.
    pub booking_id: i64,
}

/// Request body for the post-payment manual confirmation call.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentConfirmRequest {
    /// The booking that was paid.
    pub booking_id: i64,
    /// The payment intent reported successful by the payment element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,
}

/// Payment status for a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatus {
    /// Provider-side intent status (e.g. `"succeeded"`), or `"pending"`
    /// when no payment was started.
    pub status: String,
    /// The booking's own status, when included.
    #[serde(default)]
    pub booking_status: Option<String>,
    /// Amount in major units, when included.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Informational message, when included.
    #[serde(default)]
    pub message: Option<String>,
}
