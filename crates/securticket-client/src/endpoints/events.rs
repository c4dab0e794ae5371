//! Event endpoints.

use securticket_core::result::AppResult;
use securticket_entity::event::{Event, EventCategory, EventInput};

use crate::http::{ApiClient, Method};
use crate::response;

impl ApiClient {
    /// GET `/events/` — list all events.
    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        let response = self.dispatch(Method::Get, "/events/", None).await?;
        response::into_result(response)
    }

    /// GET `/events/upcoming/` — list events from today onward.
    pub async fn list_upcoming_events(&self) -> AppResult<Vec<Event>> {
        let response = self.dispatch(Method::Get, "/events/upcoming/", None).await?;
        response::into_result(response)
    }

    /// GET `/events/by_category/?category=` — list events in a category.
    pub async fn list_events_by_category(&self, category: EventCategory) -> AppResult<Vec<Event>> {
        let path = format!("/events/by_category/?category={category}");
        let response = self.dispatch(Method::Get, &path, None).await?;
        response::into_result(response)
    }

    /// GET `/events/{id}/` — fetch one event.
    pub async fn get_event(&self, id: i64) -> AppResult<Event> {
        let response = self
            .dispatch(Method::Get, &format!("/events/{id}/"), None)
            .await?;
        response::into_result(response)
    }

    /// POST `/events/` — create an event (admin).
    pub async fn create_event(&self, input: &EventInput) -> AppResult<Event> {
        let body = serde_json::to_value(input)?;
        let response = self.dispatch(Method::Post, "/events/", Some(body)).await?;
        response::into_result(response)
    }

    /// PUT `/events/{id}/` — update an event (admin).
    pub async fn update_event(&self, id: i64, input: &EventInput) -> AppResult<Event> {
        let body = serde_json::to_value(input)?;
        let response = self
            .dispatch(Method::Put, &format!("/events/{id}/"), Some(body))
            .await?;
        response::into_result(response)
    }

    /// DELETE `/events/{id}/` — delete an event (admin).
    pub async fn delete_event(&self, id: i64) -> AppResult<()> {
        let response = self
            .dispatch(Method::Delete, &format!("/events/{id}/"), None)
            .await?;
        response::into_unit_result(response)
    }
}
