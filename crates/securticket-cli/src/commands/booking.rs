//! Booking management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use securticket_core::error::AppError;
use securticket_entity::booking::{Booking, BookingRequest};

/// Arguments for booking commands
#[derive(Debug, Args)]
pub struct BookingArgs {
    /// Booking subcommand
    #[command(subcommand)]
    pub command: BookingCommand,
}

/// Booking subcommands
#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    /// Book seats for an event
    Create {
        /// Event ID
        #[arg(short, long)]
        event: i64,
        /// Number of seats
        #[arg(short, long, default_value_t = 1)]
        seats: u32,
    },
    /// List your bookings
    List,
    /// Cancel a booking
    Cancel {
        /// Booking ID
        id: i64,
    },
}

/// Booking display row for table output
#[derive(Debug, Serialize, Tabled)]
struct BookingRow {
    /// Booking ID
    id: i64,
    /// Reference
    reference: String,
    /// Event title
    event: String,
    /// Seats
    seats: u32,
    /// Total price
    total: String,
    /// Status
    status: String,
}

impl From<&Booking> for BookingRow {
    fn from(b: &Booking) -> Self {
        BookingRow {
            id: b.id,
            reference: b.booking_reference.clone(),
            event: b
                .event_details
                .as_ref()
                .map(|e| e.title.clone())
                .unwrap_or_else(|| format!("#{}", b.event)),
            seats: b.seats_booked,
            total: b.total_price.clone(),
            status: b.status.to_string(),
        }
    }
}

/// Execute booking commands
pub async fn execute(
    args: &BookingArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = super::build_client(config_path)?;

    match &args.command {
        BookingCommand::Create { event, seats } => {
            let booking = client
                .create_booking(&BookingRequest {
                    event: *event,
                    seats_booked: *seats,
                })
                .await?;
            output::print_success(&format!(
                "Booked {} seat(s), reference {} (total {})",
                booking.seats_booked, booking.booking_reference, booking.total_price
            ));
            println!("Run `securticket payment start --booking {}` to pay.", booking.id);
        }
        BookingCommand::List => {
            let bookings = client.my_bookings().await?;
            let rows: Vec<BookingRow> = bookings.iter().map(BookingRow::from).collect();
            output::print_list(&rows, format);
        }
        BookingCommand::Cancel { id } => {
            client.cancel_booking(*id).await?;
            output::print_success(&format!("Cancelled booking {id}; seats returned"));
        }
    }

    Ok(())
}
