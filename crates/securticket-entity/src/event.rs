//! Event types.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Movie,
    Concert,
    Sports,
    Theater,
}

impl EventCategory {
    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Concert => "concert",
            Self::Sports => "sports",
            Self::Theater => "theater",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = securticket_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "concert" => Ok(Self::Concert),
            "sports" => Ok(Self::Sports),
            "theater" => Ok(Self::Theater),
            _ => Err(securticket_core::AppError::validation(format!(
                "Invalid category: '{s}'. Expected one of: movie, concert, sports, theater"
            ))),
        }
    }
}

/// An event as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Numeric event ID.
    pub id: i64,
    /// Event title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Event category.
    pub category: EventCategory,
    /// Venue name.
    pub venue: String,
    /// Event date.
    pub date: NaiveDate,
    /// Start time.
    pub time: NaiveTime,
    /// Total seat capacity.
    pub total_seats: u32,
    /// Seats still available.
    pub available_seats: u32,
    /// Ticket price as the API's decimal string (e.g. `"49.99"`).
    pub price: String,
    /// Optional image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Username of the creating admin, if the endpoint includes it.
    #[serde(default)]
    pub created_by_username: Option<String>,
}

impl Event {
    /// Whether any seats remain.
    pub fn is_sold_out(&self) -> bool {
        self.available_seats == 0
    }

    /// Ticket price parsed for display math. The server owns all real
    /// pricing decisions.
    pub fn price_value(&self) -> Option<f64> {
        self.price.parse().ok()
    }
}

/// Fields accepted when creating or updating an event (admin only).
#[derive(Debug, Clone, Serialize)]
pub struct EventInput {
    /// Event title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Event category.
    pub category: EventCategory,
    /// Venue name.
    pub venue: String,
    /// Event date.
    pub date: NaiveDate,
    /// Start time.
    pub time: NaiveTime,
    /// Total seat capacity. The server initializes available seats from
    /// this on creation.
    pub total_seats: u32,
    /// Ticket price as a decimal string.
    pub price: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("Concert".parse::<EventCategory>().unwrap(), EventCategory::Concert);
        assert!("opera".parse::<EventCategory>().is_err());
    }

    #[test]
    fn test_event_deserializes() {
        let json = r#"{
            "id": 3,
            "title": "Night Show",
            "description": "desc",
            "category": "theater",
            "venue": "Grand Hall",
            "date": "2026-10-01",
            "time": "19:30:00",
            "total_seats": 100,
            "available_seats": 0,
            "price": "25.50"
        }"#;
        let event: Event = serde_json::from_str(json).expect("deserialize");
        assert!(event.is_sold_out());
        assert_eq!(event.price_value(), Some(25.50));
    }
}
