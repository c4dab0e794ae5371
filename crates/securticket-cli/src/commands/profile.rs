//! Profile and password management CLI commands.

use clap::{Args, Subcommand};
use dialoguer::Password;

use crate::output::{self, OutputFormat};
use securticket_core::error::AppError;
use securticket_entity::auth::{ChangePasswordRequest, StrengthLevel};
use securticket_entity::user::ProfileUpdate;

/// Arguments for profile commands
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Profile subcommand
    #[command(subcommand)]
    pub command: ProfileCommand,
}

/// Profile subcommands
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Fetch and show the current profile
    Show,
    /// Update profile fields
    Update {
        /// New email address
        #[arg(long)]
        email: Option<String>,
        /// New first name
        #[arg(long)]
        first_name: Option<String>,
        /// New last name
        #[arg(long)]
        last_name: Option<String>,
        /// New phone number
        #[arg(long)]
        phone: Option<String>,
    },
}

/// Arguments for password commands
#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Password subcommand
    #[command(subcommand)]
    pub command: PasswordCommand,
}

/// Password subcommands
#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Change the account password
    Change,
    /// Score a password without changing anything
    Strength,
}

/// Execute profile commands
pub async fn execute(
    args: &ProfileArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = super::build_client(config_path)?;

    match &args.command {
        ProfileCommand::Show => {
            let profile = client.fetch_profile().await?;
            output::print_item(&profile, format);
        }
        ProfileCommand::Update {
            email,
            first_name,
            last_name,
            phone,
        } => {
            let update = ProfileUpdate {
                email: email.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                phone: phone.clone(),
            };
            let profile = client.update_profile(&update).await?;
            output::print_success(&format!("Profile updated for {}", profile.username));
            output::print_item(&profile, format);
        }
    }

    Ok(())
}

/// Execute password commands
pub async fn password(
    args: &PasswordArgs,
    config_path: &str,
    _format: OutputFormat,
) -> Result<(), AppError> {
    let client = super::build_client(config_path)?;

    match &args.command {
        PasswordCommand::Change => {
            let old_password = Password::new()
                .with_prompt("Current password")
                .interact()
                .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
            let new_password = Password::new()
                .with_prompt("New password")
                .with_confirmation("Confirm new password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

            client
                .change_password(&ChangePasswordRequest {
                    old_password,
                    new_password,
                })
                .await?;
            output::print_success("Password changed");
        }
        PasswordCommand::Strength => {
            let candidate = Password::new()
                .with_prompt("Password to score")
                .interact()
                .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

            let strength = client.check_password_strength(&candidate).await?;
            let marker = match strength.level {
                StrengthLevel::Weak => "✗",
                StrengthLevel::Medium => "~",
                StrengthLevel::Strong => "✓",
            };
            println!(
                "{marker} {} (score {}/5, length {})",
                strength.level, strength.score, strength.length
            );
            for suggestion in &strength.feedback {
                println!("  - {suggestion}");
            }
        }
    }

    Ok(())
}
