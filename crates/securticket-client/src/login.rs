//! Login flow: the login endpoint combined with the lockout gate and the
//! ephemeral attempts-remaining warning.

use tracing::info;

use securticket_core::result::AppResult;
use securticket_entity::user::UserProfile;
use securticket_session::{LockoutGate, LockoutState};

use crate::endpoints::LoginOutcome;
use crate::http::ApiClient;

/// Result of submitting credentials through the flow.
#[derive(Debug, Clone)]
pub enum LoginResult {
    /// Authenticated; the session is persisted.
    Success(UserProfile),
    /// Submission refused locally: the gate is in the Locked phase.
    /// Locked state takes precedence over whatever was submitted.
    Blocked(LockoutState),
    /// The server reported a lockout; the gate recorded and persisted it.
    Locked(LockoutState),
    /// Rate limited; transient message, no state change.
    RateLimited {
        /// Message to display.
        message: String,
    },
    /// Credentials rejected.
    Rejected {
        /// Message to display.
        message: String,
    },
}

/// Drives login attempts against the lockout gate.
///
/// `submit` takes `&mut self`, so a second submission cannot start while
/// one is outstanding; the exclusive borrow is the re-entrancy guard.
#[derive(Debug)]
pub struct LoginFlow {
    client: ApiClient,
    gate: LockoutGate,
    attempts_remaining: Option<u32>,
}

impl LoginFlow {
    /// Build a flow around an already-restored gate.
    pub fn new(client: ApiClient, gate: LockoutGate) -> Self {
        Self {
            client,
            gate,
            attempts_remaining: None,
        }
    }

    /// Restore the gate from persisted state and build the flow; the
    /// startup path.
    pub async fn restore(client: ApiClient) -> Self {
        let gate = LockoutGate::restore(client.session().store()).await;
        Self::new(client, gate)
    }

    /// The lockout gate, for countdown rendering.
    pub fn gate(&self) -> &LockoutGate {
        &self.gate
    }

    /// Take the gate out of the flow (to hand it to a countdown ticker).
    pub fn into_gate(self) -> LockoutGate {
        self.gate
    }

    /// The warning from the last rejected attempt, if any. Ephemeral:
    /// never persisted, cleared at the start of every submission.
    pub fn attempts_remaining(&self) -> Option<u32> {
        self.attempts_remaining
    }

    /// Submit credentials.
    ///
    /// Only transport-level failures return `Err`; every server response
    /// maps to a [`LoginResult`] variant.
    pub async fn submit(&mut self, username: &str, password: &str) -> AppResult<LoginResult> {
        // Locked state blocks submission outright, regardless of payload.
        if let Some(state) = self.gate.lockout() {
            return Ok(LoginResult::Blocked(state.clone()));
        }

        // A new submission clears the previous warning before the
        // response arrives.
        self.attempts_remaining = None;

        let result = match self.client.login(username, password).await? {
            LoginOutcome::Success(success) => {
                // A successful login purges any persisted lockout,
                // whatever the current phase.
                self.gate.clear_on_success().await?;
                info!(username, "Login succeeded");
                LoginResult::Success(success.user)
            }
            LoginOutcome::Locked(notice) => {
                let state = self.gate.record_lockout(&notice, username).await?;
                LoginResult::Locked(state)
            }
            LoginOutcome::RateLimited { message } => LoginResult::RateLimited { message },
            LoginOutcome::Rejected {
                message,
                attempts_remaining,
            } => {
                self.attempts_remaining = attempts_remaining;
                LoginResult::Rejected { message }
            }
        };

        Ok(result)
    }
}
