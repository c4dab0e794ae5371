//! Typed endpoint wrappers, grouped by API area.

pub mod auth;
pub mod bookings;
pub mod events;
pub mod logs;
pub mod payments;

pub use auth::LoginOutcome;
