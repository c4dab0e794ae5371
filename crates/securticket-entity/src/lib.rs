//! # securticket-entity
//!
//! Domain and wire types for the SecurTicket API. Field names follow the
//! remote API's snake_case JSON; decimal amounts arrive as strings and are
//! carried verbatim.

pub mod auth;
pub mod booking;
pub mod event;
pub mod log;
pub mod payment;
pub mod user;
