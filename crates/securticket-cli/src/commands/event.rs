//! Event browsing and administration CLI commands.

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use securticket_core::error::AppError;
use securticket_entity::event::{Event, EventCategory, EventInput};

/// Arguments for event commands
#[derive(Debug, Args)]
pub struct EventArgs {
    /// Event subcommand
    #[command(subcommand)]
    pub command: EventCommand,
}

/// Event subcommands
#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// List all events
    List {
        /// Only events from today onward
        #[arg(long)]
        upcoming: bool,
        /// Filter by category (movie, concert, sports, theater)
        #[arg(short, long)]
        category: Option<EventCategory>,
    },
    /// Show one event
    Show {
        /// Event ID
        id: i64,
    },
    /// Create an event (admin)
    Create(EventFields),
    /// Update an event (admin)
    Update {
        /// Event ID
        id: i64,
        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event (admin)
    Delete {
        /// Event ID
        id: i64,
    },
}

/// Fields for event creation and update
#[derive(Debug, Args)]
pub struct EventFields {
    /// Event title
    #[arg(long)]
    pub title: String,
    /// Long description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Category (movie, concert, sports, theater)
    #[arg(long)]
    pub category: EventCategory,
    /// Venue name
    #[arg(long)]
    pub venue: String,
    /// Event date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
    /// Start time (HH:MM:SS)
    #[arg(long)]
    pub time: NaiveTime,
    /// Total seat capacity
    #[arg(long)]
    pub total_seats: u32,
    /// Ticket price as a decimal string, e.g. 49.99
    #[arg(long)]
    pub price: String,
}

impl From<&EventFields> for EventInput {
    fn from(f: &EventFields) -> Self {
        EventInput {
            title: f.title.clone(),
            description: f.description.clone(),
            category: f.category,
            venue: f.venue.clone(),
            date: f.date,
            time: f.time,
            total_seats: f.total_seats,
            price: f.price.clone(),
        }
    }
}

/// Event display row for table output
#[derive(Debug, Serialize, Tabled)]
struct EventRow {
    /// Event ID
    id: i64,
    /// Title
    title: String,
    /// Category
    category: String,
    /// Venue
    venue: String,
    /// Date and time
    when: String,
    /// Seats available / total
    seats: String,
    /// Price
    price: String,
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        EventRow {
            id: e.id,
            title: e.title.clone(),
            category: e.category.to_string(),
            venue: e.venue.clone(),
            when: format!("{} {}", e.date, e.time),
            seats: if e.is_sold_out() {
                "sold out".to_string()
            } else {
                format!("{}/{}", e.available_seats, e.total_seats)
            },
            price: e.price.clone(),
        }
    }
}

/// Execute event commands
pub async fn execute(
    args: &EventArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = super::build_client(config_path)?;

    match &args.command {
        EventCommand::List { upcoming, category } => {
            let events = match (upcoming, category) {
                (_, Some(cat)) => client.list_events_by_category(*cat).await?,
                (true, None) => client.list_upcoming_events().await?,
                (false, None) => client.list_events().await?,
            };
            let rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
            output::print_list(&rows, format);
        }
        EventCommand::Show { id } => {
            let event = client.get_event(*id).await?;
            output::print_item(&event, format);
        }
        EventCommand::Create(fields) => {
            let event = client.create_event(&EventInput::from(fields)).await?;
            output::print_success(&format!("Created event {} ({})", event.id, event.title));
        }
        EventCommand::Update { id, fields } => {
            let event = client.update_event(*id, &EventInput::from(fields)).await?;
            output::print_success(&format!("Updated event {} ({})", event.id, event.title));
        }
        EventCommand::Delete { id } => {
            client.delete_event(*id).await?;
            output::print_success(&format!("Deleted event {id}"));
        }
    }

    Ok(())
}
