//! The collaborator seams consumed by the app layer.
//!
//! Each trait method is exactly one network call against the remote API — no
//! retries, no caching. [`ApiClient`](crate::ApiClient) implements all three;
//! tests substitute in-memory fakes so state containers can be exercised
//! without a server.

use chrono::{DateTime, Utc};
use moot_common::requests::{EventPayload, LoginRequest, RegisterRequest, UpdateProfileRequest};
use moot_common::{AuthResponse, EventId, EventSummary, Rsvp, RsvpStatus, UserId, UserSummary};

use crate::error::Result;

#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse>;
    async fn register(&self, details: &RegisterRequest) -> Result<AuthResponse>;
    /// Installs a previously persisted bearer token (startup restore).
    fn adopt_token(&self, token: &str);
    /// Forgets the bearer token (logout, or an expired credential).
    fn discard_token(&self);
}

#[allow(async_fn_in_trait)]
pub trait EventsApi {
    async fn create_event(&self, event: &EventPayload) -> Result<EventSummary>;
    async fn event(&self, id: EventId) -> Result<EventSummary>;
    async fn update_event(&self, id: EventId, event: &EventPayload) -> Result<EventSummary>;
    async fn delete_event(&self, id: EventId) -> Result<()>;
    async fn my_events(&self) -> Result<Vec<EventSummary>>;
    async fn feed(&self) -> Result<Vec<EventSummary>>;
    async fn events_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>>;
    async fn rsvp(&self, id: EventId, status: RsvpStatus) -> Result<()>;
    async fn event_rsvps(&self, id: EventId) -> Result<Vec<Rsvp>>;
    async fn my_rsvps(&self) -> Result<Vec<Rsvp>>;
}

#[allow(async_fn_in_trait)]
pub trait UsersApi {
    async fn all_users(&self) -> Result<Vec<UserSummary>>;
    async fn current_user(&self) -> Result<UserSummary>;
    async fn user(&self, id: UserId) -> Result<UserSummary>;
    async fn update_profile(&self, profile: &UpdateProfileRequest) -> Result<UserSummary>;
    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>>;
    async fn follow(&self, id: UserId) -> Result<()>;
    async fn unfollow(&self, id: UserId) -> Result<()>;
    async fn followers(&self, id: UserId) -> Result<Vec<UserSummary>>;
    async fn following(&self, id: UserId) -> Result<Vec<UserSummary>>;
}
