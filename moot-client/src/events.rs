use chrono::{DateTime, Utc};
use moot_common::requests::{EventPayload, RsvpRequest};
use moot_common::{EventId, EventSummary, Rsvp, RsvpStatus};

use crate::api::EventsApi;
use crate::error::Result;
use crate::http::ApiClient;

impl EventsApi for ApiClient {
    async fn create_event(&self, event: &EventPayload) -> Result<EventSummary> {
        self.post("/events", event).await
    }

    async fn event(&self, id: EventId) -> Result<EventSummary> {
        self.get(&format!("/events/{id}")).await
    }

    async fn update_event(&self, id: EventId, event: &EventPayload) -> Result<EventSummary> {
        self.put(&format!("/events/{id}"), event).await
    }

    async fn delete_event(&self, id: EventId) -> Result<()> {
        self.delete(&format!("/events/{id}")).await
    }

    async fn my_events(&self) -> Result<Vec<EventSummary>> {
        self.get("/events/my-events").await
    }

    async fn feed(&self) -> Result<Vec<EventSummary>> {
        self.get("/events/feed").await
    }

    async fn events_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>> {
        self.get_with_query(
            "/events/calendar",
            &[("start", start.to_rfc3339()), ("end", end.to_rfc3339())],
        )
        .await
    }

    async fn rsvp(&self, id: EventId, status: RsvpStatus) -> Result<()> {
        self.post_ignored(&format!("/events/{id}/rsvp"), &RsvpRequest { status })
            .await
    }

    async fn event_rsvps(&self, id: EventId) -> Result<Vec<Rsvp>> {
        self.get(&format!("/events/{id}/rsvp")).await
    }

    async fn my_rsvps(&self) -> Result<Vec<Rsvp>> {
        self.get("/events/my-rsvps").await
    }
}
