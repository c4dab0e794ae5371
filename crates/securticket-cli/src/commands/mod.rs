//! CLI command definitions and dispatch.

pub mod auth;
pub mod booking;
pub mod event;
pub mod logs;
pub mod payment;
pub mod profile;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use securticket_client::{ApiClient, ReqwestTransport};
use securticket_core::config::AppConfig;
use securticket_core::error::AppError;
use securticket_session::{FileStateStore, SessionManager};

/// SecurTicket — ticket booking storefront
#[derive(Debug, Parser)]
#[command(name = "securticket", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in (runs the lockout-aware login flow)
    Login(auth::LoginArgs),
    /// Log out and clear the stored session
    Logout,
    /// Register a new account
    Register,
    /// Show the currently logged-in user
    Whoami,
    /// Profile management
    Profile(profile::ProfileArgs),
    /// Password management
    Password(profile::PasswordArgs),
    /// Browse and manage events
    Event(event::EventArgs),
    /// Manage bookings
    Booking(booking::BookingArgs),
    /// Payment flow for a booking
    Payment(payment::PaymentArgs),
    /// Activity log (admin)
    Logs(logs::LogsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => auth::login(args, &self.config).await,
            Commands::Logout => auth::logout(&self.config).await,
            Commands::Register => auth::register(&self.config).await,
            Commands::Whoami => auth::whoami(&self.config, self.format).await,
            Commands::Profile(args) => profile::execute(args, &self.config, self.format).await,
            Commands::Password(args) => profile::password(args, &self.config, self.format).await,
            Commands::Event(args) => event::execute(args, &self.config, self.format).await,
            Commands::Booking(args) => booking::execute(args, &self.config, self.format).await,
            Commands::Payment(args) => payment::execute(args, &self.config, self.format).await,
            Commands::Logs(args) => logs::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: build the API client from configuration
pub fn build_client(config_path: &str) -> Result<ApiClient, AppError> {
    let config = AppConfig::load(config_path)?;
    let store = Arc::new(FileStateStore::new(&config.session.state_dir));
    let session = SessionManager::new(store, config.session.clone());
    let transport = Arc::new(ReqwestTransport::new(&config.api)?);
    Ok(ApiClient::new(transport, session))
}
