//! Event detail page: one event plus its RSVP roster.

use std::collections::HashSet;

use futures::future::try_join;
use moot_client::{ClientError, EventsApi, Result};
use moot_common::{EventId, EventSummary, Rsvp, RsvpStatus, UserId};

use super::{Lifecycle, LoadToken};

pub struct EventDetailsPage {
    event_id: EventId,
    event: Option<EventSummary>,
    rsvps: Vec<Rsvp>,
    loading: bool,
    error: Option<String>,
    lifecycle: Lifecycle,
}

impl EventDetailsPage {
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            event: None,
            rsvps: Vec::new(),
            loading: false,
            error: None,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn event(&self) -> Option<&EventSummary> {
        self.event.as_ref()
    }

    pub fn rsvps(&self) -> &[Rsvp] {
        &self.rsvps
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// A missing event renders as this error state, never as a crash.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn attendees(&self, status: RsvpStatus) -> Vec<&Rsvp> {
        self.rsvps.iter().filter(|r| r.status == status).collect()
    }

    pub fn begin_load(&mut self) -> LoadToken {
        self.loading = true;
        self.error = None;
        self.lifecycle.begin()
    }

    pub fn finish_load(&mut self, token: LoadToken, event: EventSummary, rsvps: Vec<Rsvp>) -> bool {
        if !self.lifecycle.accepts(token) {
            tracing::debug!(event = %self.event_id, "dropping detail load for a page that was left");
            return false;
        }
        self.rsvps = dedup_by_user(rsvps);
        self.event = Some(event);
        self.loading = false;
        true
    }

    pub fn fail_load(&mut self, token: LoadToken, err: &ClientError) -> bool {
        if !self.lifecycle.accepts(token) {
            return false;
        }
        self.loading = false;
        self.error = Some(match err {
            ClientError::NotFound(_) => "Event not found".to_string(),
            _ => "Failed to load event details".to_string(),
        });
        true
    }

    /// Event and roster travel together, so the counts on the card and the
    /// names under it never come from different moments.
    pub async fn load<A: EventsApi>(&mut self, api: &A) -> Result<()> {
        let token = self.begin_load();
        match try_join(api.event(self.event_id), api.event_rsvps(self.event_id)).await {
            Ok((event, rsvps)) => {
                self.finish_load(token, event, rsvps);
                Ok(())
            }
            Err(err) => {
                self.fail_load(token, &err);
                tracing::warn!(error = %err, event = %self.event_id, "failed to load event details");
                Err(err)
            }
        }
    }

    /// Reload-after-mutate: the answer, the three counts and the roster all
    /// change together, so only the server's version of them is trusted.
    pub async fn rsvp<A: EventsApi>(&mut self, api: &A, status: RsvpStatus) -> Result<()> {
        api.rsvp(self.event_id, status).await.map_err(|err| {
            tracing::warn!(error = %err, event = %self.event_id, "rsvp failed");
            err
        })?;
        self.load(api).await
    }

    /// Creator-only; checked here so a non-creator never issues the call.
    pub async fn delete<A: EventsApi>(&mut self, api: &A, viewer: UserId) -> Result<()> {
        let Some(event) = &self.event else {
            return Err(ClientError::Rejected("event is not loaded".into()));
        };
        if !event.is_creator(viewer) {
            return Err(ClientError::Rejected(
                "only the creator can delete an event".into(),
            ));
        }
        api.delete_event(self.event_id).await.map_err(|err| {
            tracing::warn!(error = %err, event = %self.event_id, "delete failed");
            err
        })?;
        // The page is done; anything still in flight lands nowhere.
        self.leave();
        Ok(())
    }

    pub fn leave(&mut self) {
        self.lifecycle.leave();
        self.loading = false;
    }
}

/// One answer per user, whatever the server sent.
fn dedup_by_user(rsvps: Vec<Rsvp>) -> Vec<Rsvp> {
    let mut seen = HashSet::new();
    rsvps.into_iter().filter(|r| seen.insert(r.user_id)).collect()
}
