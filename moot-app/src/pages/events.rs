//! The events page: the viewer's own events and the feed from followed users.

use futures::future::try_join;
use moot_client::{EventsApi, Result};
use moot_common::{EventId, EventSummary, RsvpStatus};

use super::{Lifecycle, LoadToken};

#[derive(Default)]
pub struct EventsPage {
    my_events: Vec<EventSummary>,
    feed: Vec<EventSummary>,
    loading: bool,
    lifecycle: Lifecycle,
}

impl EventsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn my_events(&self) -> &[EventSummary] {
        &self.my_events
    }

    pub fn feed(&self) -> &[EventSummary] {
        &self.feed
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_load(&mut self) -> LoadToken {
        self.loading = true;
        self.lifecycle.begin()
    }

    /// Applies a finished load unless the page was left in the meantime.
    pub fn finish_load(
        &mut self,
        token: LoadToken,
        my_events: Vec<EventSummary>,
        feed: Vec<EventSummary>,
    ) -> bool {
        if !self.lifecycle.accepts(token) {
            tracing::debug!("dropping events that arrived after leaving the page");
            return false;
        }
        self.my_events = my_events;
        self.feed = feed;
        self.loading = false;
        true
    }

    pub fn fail_load(&mut self, token: LoadToken) {
        if self.lifecycle.accepts(token) {
            self.loading = false;
        }
    }

    /// Both lists travel together; a half-updated page is worse than a stale one.
    pub async fn load<A: EventsApi>(&mut self, api: &A) -> Result<()> {
        let token = self.begin_load();
        match try_join(api.my_events(), api.feed()).await {
            Ok((my_events, feed)) => {
                self.finish_load(token, my_events, feed);
                Ok(())
            }
            Err(err) => {
                self.fail_load(token);
                tracing::warn!(error = %err, "failed to load events");
                Err(err)
            }
        }
    }

    /// RSVP is reload-after-mutate: the lists change only through server
    /// truth, never through a local guess at the new counts.
    pub async fn rsvp<A: EventsApi>(
        &mut self,
        api: &A,
        event: EventId,
        status: RsvpStatus,
    ) -> Result<()> {
        api.rsvp(event, status).await.map_err(|err| {
            tracing::warn!(error = %err, event = %event, "rsvp failed");
            err
        })?;
        self.load(api).await
    }

    pub fn leave(&mut self) {
        self.lifecycle.leave();
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{event, viewer, FailWith, FakeApi};
    use moot_common::UserId;

    fn api_with_events() -> FakeApi {
        let api = FakeApi::new(viewer());
        api.push_event(event(EventId(7), "Board game night", UserId(2)));
        api.push_event(event(EventId(8), "My picnic", UserId(1)));
        api
    }

    #[tokio::test]
    async fn load_splits_mine_from_feed() -> anyhow::Result<()> {
        let api = api_with_events();
        let mut page = EventsPage::new();
        page.load(&api).await?;

        assert_eq!(page.my_events().len(), 1);
        assert_eq!(page.my_events()[0].id, EventId(8));
        assert_eq!(page.feed().len(), 1);
        assert_eq!(page.feed()[0].id, EventId(7));
        assert!(!page.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn rsvp_reloads_server_truth() -> anyhow::Result<()> {
        let api = api_with_events();
        let mut page = EventsPage::new();
        page.load(&api).await?;
        let going_before = page.feed()[0].going_count;

        page.rsvp(&api, EventId(7), RsvpStatus::Going).await?;

        let updated = &page.feed()[0];
        assert_eq!(updated.current_user_rsvp, Some(RsvpStatus::Going));
        assert_eq!(updated.going_count, going_before + 1);
        Ok(())
    }

    #[tokio::test]
    async fn failed_rsvp_leaves_lists_untouched() -> anyhow::Result<()> {
        let api = api_with_events();
        let mut page = EventsPage::new();
        page.load(&api).await?;
        let my_events_before = page.my_events().to_vec();
        let feed_before = page.feed().to_vec();

        api.fail_next(FailWith::Transport);
        let result = page.rsvp(&api, EventId(7), RsvpStatus::Maybe).await;

        assert!(result.is_err());
        assert_eq!(page.my_events(), my_events_before.as_slice());
        assert_eq!(page.feed(), feed_before.as_slice());
        Ok(())
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_lists() -> anyhow::Result<()> {
        let api = api_with_events();
        let mut page = EventsPage::new();
        page.load(&api).await?;
        let feed_before = page.feed().to_vec();

        api.fail_next(FailWith::Transport);
        assert!(page.load(&api).await.is_err());
        assert_eq!(page.feed(), feed_before.as_slice());
        assert!(!page.is_loading());
        Ok(())
    }

    #[test]
    fn responses_after_leave_are_dropped() {
        let mut page = EventsPage::new();
        let token = page.begin_load();
        page.leave();

        let applied = page.finish_load(token, vec![event(EventId(9), "Late", UserId(1))], vec![]);
        assert!(!applied);
        assert!(page.my_events().is_empty());
    }

    #[test]
    fn overlapping_loads_are_last_response_wins() {
        let mut page = EventsPage::new();
        let first = page.begin_load();
        let second = page.begin_load();

        assert!(page.finish_load(first, vec![event(EventId(1), "First", UserId(1))], vec![]));
        assert!(page.finish_load(second, vec![event(EventId(2), "Second", UserId(1))], vec![]));
        assert_eq!(page.my_events()[0].id, EventId(2));
    }
}
