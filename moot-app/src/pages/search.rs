//! Find-friends page: one snapshot fetch, then pure local filtering.
//!
//! Typing never touches the network; every keystroke recomputes the visible
//! list from the last full fetch. Follow and unfollow patch the snapshot in
//! place once the server confirms, because follower counts are advisory and
//! a round trip per button press is not worth it.

use moot_client::{ClientError, Result, UsersApi};
use moot_common::{UserId, UserSummary};

use super::{Lifecycle, LoadToken};

#[derive(Default)]
pub struct SearchPage {
    snapshot: Vec<UserSummary>,
    query: String,
    loading: bool,
    lifecycle: Lifecycle,
}

impl SearchPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_load(&mut self) -> LoadToken {
        self.loading = true;
        self.lifecycle.begin()
    }

    pub fn finish_load(&mut self, token: LoadToken, users: Vec<UserSummary>, viewer: UserId) -> bool {
        if !self.lifecycle.accepts(token) {
            tracing::debug!("dropping user snapshot that arrived after leaving the page");
            return false;
        }
        // The viewer never appears in their own results.
        self.snapshot = users.into_iter().filter(|u| u.id != viewer).collect();
        self.loading = false;
        true
    }

    pub fn fail_load(&mut self, token: LoadToken) {
        if self.lifecycle.accepts(token) {
            self.loading = false;
        }
    }

    /// Fetches the full snapshot this page filters from.
    pub async fn load<A: UsersApi>(&mut self, api: &A, viewer: UserId) -> Result<()> {
        let token = self.begin_load();
        match api.all_users().await {
            Ok(users) => {
                self.finish_load(token, users, viewer);
                Ok(())
            }
            Err(err) => {
                self.fail_load(token);
                tracing::warn!(error = %err, "failed to load users");
                Err(err)
            }
        }
    }

    /// Case-insensitive substring match on username or display name.
    /// Pure and synchronous; an empty query shows the whole snapshot.
    pub fn results(&self) -> Vec<&UserSummary> {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return self.snapshot.iter().collect();
        }
        self.snapshot
            .iter()
            .filter(|user| {
                user.username.to_lowercase().contains(&needle)
                    || user.display_name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Optimistic: once the server confirms, flip the flag and bump the count
    /// locally instead of refetching the snapshot.
    pub async fn follow<A: UsersApi>(
        &mut self,
        api: &A,
        viewer: UserId,
        target: UserId,
    ) -> Result<()> {
        if viewer == target {
            return Err(ClientError::Rejected("you cannot follow yourself".into()));
        }
        api.follow(target).await.map_err(|err| {
            tracing::warn!(error = %err, target = %target, "follow failed");
            err
        })?;
        self.patch(target, |user| {
            user.is_following = true;
            user.followers_count += 1;
        });
        Ok(())
    }

    pub async fn unfollow<A: UsersApi>(&mut self, api: &A, target: UserId) -> Result<()> {
        api.unfollow(target).await.map_err(|err| {
            tracing::warn!(error = %err, target = %target, "unfollow failed");
            err
        })?;
        self.patch(target, |user| {
            user.is_following = false;
            user.followers_count = user.followers_count.saturating_sub(1);
        });
        Ok(())
    }

    fn patch(&mut self, target: UserId, apply: impl FnOnce(&mut UserSummary)) {
        if let Some(user) = self.snapshot.iter_mut().find(|u| u.id == target) {
            apply(user);
        }
    }

    pub fn leave(&mut self) {
        self.lifecycle.leave();
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{user, viewer, FailWith, FakeApi};

    async fn loaded_page(api: &FakeApi) -> SearchPage {
        let mut page = SearchPage::new();
        page.load(api, UserId(1)).await.expect("load");
        page
    }

    fn api_with_users() -> FakeApi {
        let api = FakeApi::new(viewer());
        api.push_user(user(UserId(2), "grace", "Grace Hopper", 5));
        api.push_user(user(UserId(3), "linus", "Linus", 10));
        api
    }

    #[tokio::test]
    async fn snapshot_excludes_the_viewer() {
        let api = api_with_users();
        let page = loaded_page(&api).await;
        assert_eq!(page.results().len(), 2);
        assert!(page.results().iter().all(|u| u.id != UserId(1)));
    }

    #[tokio::test]
    async fn filtering_is_pure_and_idempotent() {
        let api = api_with_users();
        let mut page = loaded_page(&api).await;

        page.set_query("GRA");
        let once: Vec<UserSummary> = page.results().into_iter().cloned().collect();
        let twice: Vec<UserSummary> = page.results().into_iter().cloned().collect();
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
        assert_eq!(once[0].username, "grace");
        // Matching on display name works too.
        page.set_query("hopper");
        assert_eq!(page.results().len(), 1);

        // An empty query shows the full snapshot again.
        page.set_query("");
        assert_eq!(page.results().len(), 2);
        // And no network was involved beyond the initial fetch.
        assert_eq!(api.calls_named("all_users"), 1);
        assert_eq!(api.calls_named("search_users"), 0);
    }

    #[tokio::test]
    async fn follow_patches_the_local_record() -> anyhow::Result<()> {
        let api = api_with_users();
        let mut page = loaded_page(&api).await;

        page.follow(&api, UserId(1), UserId(2)).await?;
        let grace = page
            .results()
            .into_iter()
            .find(|u| u.id == UserId(2))
            .expect("present");
        assert!(grace.is_following);
        assert_eq!(grace.followers_count, 6);
        Ok(())
    }

    #[tokio::test]
    async fn unfollow_reverses_the_patch() -> anyhow::Result<()> {
        let api = api_with_users();
        let mut page = loaded_page(&api).await;

        page.follow(&api, UserId(1), UserId(2)).await?;
        page.unfollow(&api, UserId(2)).await?;
        let grace = page
            .results()
            .into_iter()
            .find(|u| u.id == UserId(2))
            .expect("present");
        assert!(!grace.is_following);
        assert_eq!(grace.followers_count, 5);
        Ok(())
    }

    #[tokio::test]
    async fn self_follow_never_reaches_the_network() {
        let api = api_with_users();
        let mut page = loaded_page(&api).await;

        let result = page.follow(&api, UserId(1), UserId(1)).await;
        assert!(matches!(result, Err(ClientError::Rejected(_))));
        assert_eq!(api.calls_named("follow"), 0);
    }

    #[tokio::test]
    async fn failed_follow_leaves_the_snapshot_untouched() {
        let api = api_with_users();
        let mut page = loaded_page(&api).await;
        let before: Vec<UserSummary> = page.results().into_iter().cloned().collect();

        api.fail_next(FailWith::Validation("already following this user"));
        let result = page.follow(&api, UserId(1), UserId(2)).await;

        assert!(result.is_err());
        let after: Vec<UserSummary> = page.results().into_iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn snapshot_after_leave_is_dropped() {
        let api = api_with_users();
        let mut page = SearchPage::new();
        let token = page.begin_load();
        page.leave();

        let users = api.all_users().await.expect("users");
        assert!(!page.finish_load(token, users, UserId(1)));
        assert!(page.results().is_empty());
    }
}
