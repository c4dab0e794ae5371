//! Payment CLI commands for the hosted payment-element flow.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use securticket_core::error::AppError;
use securticket_entity::payment::PaymentConfirmRequest;

/// Arguments for payment commands
#[derive(Debug, Args)]
pub struct PaymentArgs {
    /// Payment subcommand
    #[command(subcommand)]
    pub command: PaymentCommand,
}

/// Payment subcommands
#[derive(Debug, Subcommand)]
pub enum PaymentCommand {
    /// Start a payment for a pending booking
    Start {
        /// Booking ID
        #[arg(short, long)]
        booking: i64,
    },
    /// Confirm a completed payment
    Confirm {
        /// Booking ID
        #[arg(short, long)]
        booking: i64,
        /// Payment intent reported by the payment element
        #[arg(short, long)]
        intent: Option<String>,
    },
    /// Show payment status for a booking
    Status {
        /// Booking ID
        #[arg(short, long)]
        booking: i64,
    },
}

/// Execute payment commands
pub async fn execute(
    args: &PaymentArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = super::build_client(config_path)?;

    match &args.command {
        PaymentCommand::Start { booking } => {
            let intent = client.create_payment_intent(*booking).await?;
            output::print_success(&format!(
                "Payment started for booking {} (total {})",
                intent.booking.reference, intent.booking.total_price
            ));
            // The secret goes to the hosted payment element, not to logs.
            println!("Client secret: {}", intent.client_secret);
            println!(
                "Complete the payment in the hosted element, then run \
                 `securticket payment confirm --booking {}`.",
                intent.booking.id
            );
        }
        PaymentCommand::Confirm { booking, intent } => {
            client
                .confirm_payment(&PaymentConfirmRequest {
                    booking_id: *booking,
                    payment_intent_id: intent.clone(),
                })
                .await?;
            output::print_success(&format!("Booking {booking} confirmed"));
        }
        PaymentCommand::Status { booking } => {
            let status = client.payment_status(*booking).await?;
            output::print_item(&status, format);
        }
    }

    Ok(())
}
