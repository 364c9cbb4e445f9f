//! Create-event page: form state, local validation, one POST on submit.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use moot_client::{ClientError, EventsApi, Result};
use moot_common::requests::EventPayload;
use moot_common::EventSummary;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub location: String,
    /// Datetime as typed, either RFC 3339 or the `YYYY-MM-DDTHH:MM` shape
    /// a datetime field produces.
    pub start: String,
    pub end: String,
    pub is_public: bool,
}

impl Default for EventForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            location: String::new(),
            start: String::new(),
            end: String::new(),
            is_public: true,
        }
    }
}

#[derive(Default)]
pub struct CreateEventPage {
    form: EventForm,
    submitting: bool,
    error: Option<String>,
}

impl CreateEventPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventForm {
        &mut self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Local validation; nothing is sent when this fails.
    fn payload(&self) -> Result<EventPayload> {
        if self.form.title.trim().is_empty() {
            return Err(ClientError::Rejected("a title is required".into()));
        }
        let start = parse_datetime(&self.form.start)
            .ok_or_else(|| ClientError::Rejected("a valid start time is required".into()))?;
        let end = if self.form.end.trim().is_empty() {
            None
        } else {
            let end = parse_datetime(&self.form.end)
                .ok_or_else(|| ClientError::Rejected("the end time is not a valid time".into()))?;
            if end < start {
                return Err(ClientError::Rejected(
                    "the event cannot end before it starts".into(),
                ));
            }
            Some(end)
        };
        Ok(EventPayload {
            title: self.form.title.trim().to_string(),
            description: optional(&self.form.description),
            location: optional(&self.form.location),
            start_date_time: start,
            end_date_time: end,
            is_public: self.form.is_public,
        })
    }

    pub async fn submit<A: EventsApi>(&mut self, api: &A) -> Result<EventSummary> {
        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };
        self.submitting = true;
        self.error = None;
        let result = api.create_event(&payload).await;
        self.submitting = false;
        result.map_err(|err| {
            tracing::warn!(error = %err, "event creation failed");
            self.error = Some(err.to_string());
            err
        })
    }
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
}
