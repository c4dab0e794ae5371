//! Login, logout, registration, and whoami commands.

use std::io::Write;

use clap::Args;
use dialoguer::{Input, Password};

use crate::output::{self, OutputFormat};
use securticket_client::{ApiClient, LoginFlow, LoginResult};
use securticket_core::error::AppError;
use securticket_entity::auth::{RegisterRequest, StrengthLevel};
use securticket_session::{spawn_countdown, CountdownEvent, LockoutState};

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,
}

/// Execute the login flow.
pub async fn login(args: &LoginArgs, config_path: &str) -> Result<(), AppError> {
    let client = super::build_client(config_path)?;
    let mut flow = LoginFlow::restore(client.clone()).await;

    // A lockout that survived a previous run blocks the prompt until it
    // expires.
    if let Some(state) = flow.gate().lockout() {
        let state = state.clone();
        flow = wait_for_unlock(client.clone(), flow, &state).await?;
    }

    let username = match &args.username {
        Some(u) => u.clone(),
        None => prompt_username(flow.gate().lockout())?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

    match flow.submit(&username, &password).await? {
        LoginResult::Success(user) => {
            output::print_success(&format!("Logged in as {} ({})", user.username, user.role));
            if user.role.is_admin() {
                println!("Admin commands are available: event create/update/delete, logs.");
            }
        }
        LoginResult::Blocked(state) | LoginResult::Locked(state) => {
            println!("🔒 Account locked: {}", state.error);
            wait_for_unlock(client, flow, &state).await?;
            println!("You may now try logging in again.");
        }
        LoginResult::RateLimited { message } => {
            output::print_warning(&message);
        }
        LoginResult::Rejected { message } => {
            output::print_warning(&message);
            if let Some(n) = flow.attempts_remaining() {
                output::print_warning(&format!("{n} attempts remaining before lockout"));
            }
            return Err(AppError::authentication("Login failed"));
        }
    }

    Ok(())
}

/// Render the live countdown until the lock expires, then return the flow
/// rebuilt around the unlocked gate.
async fn wait_for_unlock(
    client: ApiClient,
    flow: LoginFlow,
    state: &LockoutState,
) -> Result<LoginFlow, AppError> {
    println!("🔒 {}", state.error);
    println!(
        "Locked until {} — the prompt unlocks when the timer expires.",
        state.locked_until.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let (handle, mut events) = spawn_countdown(flow.into_gate());
    render_event(&events.borrow());

    loop {
        if events.changed().await.is_err() {
            break;
        }
        let event = events.borrow().clone();
        render_event(&event);
        if event == CountdownEvent::Finished {
            break;
        }
    }

    let gate = handle.join().await?;
    Ok(LoginFlow::new(client, gate))
}

fn render_event(event: &CountdownEvent) {
    match event {
        CountdownEvent::Remaining { display, .. } => {
            print!("\r⏱ {display} until unlock   ");
            let _ = std::io::stdout().flush();
        }
        CountdownEvent::Unlocked => {
            println!();
            output::print_success("Account unlocked. You may now try logging in again.");
        }
        CountdownEvent::Finished => {}
    }
}

fn prompt_username(lockout: Option<&LockoutState>) -> Result<String, AppError> {
    let mut input = Input::<String>::new().with_prompt("Username");
    if let Some(state) = lockout {
        input = input.default(state.username.clone());
    }
    input
        .interact_text()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))
}

/// Execute logout.
pub async fn logout(config_path: &str) -> Result<(), AppError> {
    let client = super::build_client(config_path)?;
    if !client.session().is_authenticated().await {
        output::print_warning("Not logged in.");
        return Ok(());
    }
    client.logout().await?;
    output::print_success("Logged out");
    Ok(())
}

/// Execute registration with interactive prompts.
pub async fn register(config_path: &str) -> Result<(), AppError> {
    let client = super::build_client(config_path)?;

    let username: String = Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
    let email: String = Input::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

    // Advisory strength preview; the server still enforces its policy.
    match client.check_password_strength(&password).await {
        Ok(strength) => {
            if strength.level == StrengthLevel::Weak {
                output::print_warning(&format!(
                    "Weak password (score {}/5): {}",
                    strength.score,
                    strength.feedback.join(", ")
                ));
            }
        }
        Err(e) => tracing::debug!(error = %e, "Strength check unavailable"),
    }

    let request = RegisterRequest {
        username,
        email,
        password: password.clone(),
        password2: password,
        first_name: None,
        last_name: None,
        phone: None,
    };

    let success = client.register(&request).await?;
    output::print_success(&format!("Registered and logged in as {}", success.user.username));
    Ok(())
}

/// Show the currently logged-in user from local state.
pub async fn whoami(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let client = super::build_client(config_path)?;
    match client.session().current_user().await {
        Some(user) => {
            output::print_item(&user, format);
            if !client.session().is_authenticated().await {
                output::print_warning("Access token expired; the next request will renew it.");
            }
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
