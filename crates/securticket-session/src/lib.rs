//! # securticket-session
//!
//! Persisted authentication state and the lockout countdown state machine.
//!
//! The [`manager::SessionManager`] owns the stored access/refresh tokens and
//! user profile and performs the durable writes behind login, silent token
//! renewal, and logout. The [`lockout::LockoutGate`] tracks the
//! client-observed "account temporarily locked" state, persists it across
//! restarts, and counts down to unlock. Both operate through the
//! [`store::StateStore`] abstraction so tests can swap in an in-memory
//! store.

pub mod countdown;
pub mod lockout;
pub mod manager;
pub mod store;

pub use countdown::{CountdownEvent, CountdownHandle, spawn_countdown};
pub use lockout::{LockoutGate, LockoutState, LoginPhase, Tick, format_remaining};
pub use manager::SessionManager;
pub use store::{FileStateStore, MemoryStateStore, StateStore};
