//! In-memory stand-in for the remote API, shared by the unit tests.
//!
//! `FakeApi` behaves like a tiny server: it keeps users, events and RSVPs,
//! recomputes the viewer-relative fields the way the real one would, records
//! every call by name, and can be told to fail the next call with a chosen
//! error. That lets the state containers be driven end to end without HTTP.

use std::cell::{Cell, RefCell};

use chrono::{TimeZone, Utc};
use moot_client::{AuthApi, ClientError, EventsApi, Result, UsersApi};
use moot_common::requests::{EventPayload, LoginRequest, RegisterRequest, UpdateProfileRequest};
use moot_common::{
    AuthResponse, EventId, EventSummary, Rsvp, RsvpId, RsvpStatus, UserId, UserSummary,
};

pub(crate) enum FailWith {
    Transport,
    Auth,
    Validation(&'static str),
}

impl FailWith {
    fn into_error(self) -> ClientError {
        match self {
            Self::Transport => ClientError::Transport("connection reset".into()),
            Self::Auth => ClientError::Auth("token expired".into()),
            Self::Validation(message) => ClientError::Validation(message.into()),
        }
    }
}

pub(crate) struct FakeApi {
    viewer: UserSummary,
    users: RefCell<Vec<UserSummary>>,
    events: RefCell<Vec<EventSummary>>,
    rsvps: RefCell<Vec<Rsvp>>,
    calls: RefCell<Vec<String>>,
    fail_next: RefCell<Option<FailWith>>,
    auth_response: RefCell<Option<AuthResponse>>,
    token: RefCell<Option<String>>,
    next_rsvp_id: Cell<i64>,
}

impl FakeApi {
    pub fn new(viewer: UserSummary) -> Self {
        Self {
            viewer,
            users: RefCell::new(Vec::new()),
            events: RefCell::new(Vec::new()),
            rsvps: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            fail_next: RefCell::new(None),
            auth_response: RefCell::new(None),
            token: RefCell::new(None),
            next_rsvp_id: Cell::new(1),
        }
    }

    pub fn set_auth_response(&self, response: AuthResponse) {
        *self.auth_response.borrow_mut() = Some(response);
    }

    pub fn fail_next(&self, failure: FailWith) {
        *self.fail_next.borrow_mut() = Some(failure);
    }

    pub fn push_user(&self, user: UserSummary) {
        self.users.borrow_mut().push(user);
    }

    pub fn push_event(&self, event: EventSummary) {
        self.events.borrow_mut().push(event);
    }

    pub fn has_token(&self) -> bool {
        self.token.borrow().is_some()
    }

    pub fn calls_named(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == name).count()
    }

    /// Records the call and fails it if a failure was scripted.
    fn gate(&self, call: &str) -> Result<()> {
        self.calls.borrow_mut().push(call.to_string());
        if let Some(failure) = self.fail_next.borrow_mut().take() {
            return Err(failure.into_error());
        }
        Ok(())
    }

    /// What the server would do: recount the three buckets and the viewer's
    /// own answer from the RSVP records.
    fn refresh_event(&self, id: EventId) {
        let rsvps = self.rsvps.borrow();
        let mut events = self.events.borrow_mut();
        let Some(event) = events.iter_mut().find(|e| e.id == id) else {
            return;
        };
        let count = |status: RsvpStatus| {
            rsvps
                .iter()
                .filter(|r| r.event_id == id && r.status == status)
                .count() as u32
        };
        event.going_count = count(RsvpStatus::Going);
        event.maybe_count = count(RsvpStatus::Maybe);
        event.not_going_count = count(RsvpStatus::NotGoing);
        event.current_user_rsvp = rsvps
            .iter()
            .find(|r| r.event_id == id && r.user_id == self.viewer.id)
            .map(|r| r.status);
    }
}

impl AuthApi for FakeApi {
    async fn login(&self, _credentials: &LoginRequest) -> Result<AuthResponse> {
        self.gate("login")?;
        let response = self
            .auth_response
            .borrow()
            .clone()
            .ok_or_else(|| ClientError::Auth("invalid credentials".into()))?;
        *self.token.borrow_mut() = Some(response.token.clone());
        Ok(response)
    }

    async fn register(&self, _details: &RegisterRequest) -> Result<AuthResponse> {
        self.gate("register")?;
        let response = self
            .auth_response
            .borrow()
            .clone()
            .ok_or_else(|| ClientError::Validation("username already taken".into()))?;
        *self.token.borrow_mut() = Some(response.token.clone());
        Ok(response)
    }

    fn adopt_token(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn discard_token(&self) {
        *self.token.borrow_mut() = None;
    }
}

impl EventsApi for FakeApi {
    async fn create_event(&self, event: &EventPayload) -> Result<EventSummary> {
        self.gate("create_event")?;
        let id = EventId(100 + self.events.borrow().len() as i64);
        let created = EventSummary {
            id,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start_date_time: event.start_date_time,
            end_date_time: event.end_date_time,
            creator_id: self.viewer.id,
            creator_name: self.viewer.display_name.clone(),
            creator_username: self.viewer.username.clone(),
            is_public: event.is_public,
            going_count: 0,
            maybe_count: 0,
            not_going_count: 0,
            current_user_rsvp: None,
        };
        self.events.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn event(&self, id: EventId) -> Result<EventSummary> {
        self.gate("event")?;
        self.events
            .borrow()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("event does not exist".into()))
    }

    async fn update_event(&self, id: EventId, event: &EventPayload) -> Result<EventSummary> {
        self.gate("update_event")?;
        let mut events = self.events.borrow_mut();
        let existing = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ClientError::NotFound("event does not exist".into()))?;
        existing.title = event.title.clone();
        existing.description = event.description.clone();
        existing.location = event.location.clone();
        existing.start_date_time = event.start_date_time;
        existing.end_date_time = event.end_date_time;
        existing.is_public = event.is_public;
        Ok(existing.clone())
    }

    async fn delete_event(&self, id: EventId) -> Result<()> {
        self.gate("delete_event")?;
        self.events.borrow_mut().retain(|e| e.id != id);
        self.rsvps.borrow_mut().retain(|r| r.event_id != id);
        Ok(())
    }

    async fn my_events(&self) -> Result<Vec<EventSummary>> {
        self.gate("my_events")?;
        Ok(self
            .events
            .borrow()
            .iter()
            .filter(|e| e.creator_id == self.viewer.id)
            .cloned()
            .collect())
    }

    async fn feed(&self) -> Result<Vec<EventSummary>> {
        self.gate("feed")?;
        Ok(self
            .events
            .borrow()
            .iter()
            .filter(|e| e.creator_id != self.viewer.id)
            .cloned()
            .collect())
    }

    async fn events_between(
        &self,
        start: chrono::DateTime<Utc>,
        end: chrono::DateTime<Utc>,
    ) -> Result<Vec<EventSummary>> {
        self.gate("events_between")?;
        Ok(self
            .events
            .borrow()
            .iter()
            .filter(|e| e.start_date_time >= start && e.start_date_time <= end)
            .cloned()
            .collect())
    }

    async fn rsvp(&self, id: EventId, status: RsvpStatus) -> Result<()> {
        self.gate("rsvp")?;
        if !self.events.borrow().iter().any(|e| e.id == id) {
            return Err(ClientError::NotFound("event does not exist".into()));
        }
        let mut rsvps = self.rsvps.borrow_mut();
        // One answer per (event, user): a repeat replaces the previous one.
        rsvps.retain(|r| !(r.event_id == id && r.user_id == self.viewer.id));
        let rsvp_id = RsvpId(self.next_rsvp_id.get());
        self.next_rsvp_id.set(rsvp_id.0 + 1);
        rsvps.push(Rsvp {
            id: rsvp_id,
            event_id: id,
            user_id: self.viewer.id,
            display_name: self.viewer.display_name.clone(),
            username: self.viewer.username.clone(),
            status,
        });
        drop(rsvps);
        self.refresh_event(id);
        Ok(())
    }

    async fn event_rsvps(&self, id: EventId) -> Result<Vec<Rsvp>> {
        self.gate("event_rsvps")?;
        Ok(self
            .rsvps
            .borrow()
            .iter()
            .filter(|r| r.event_id == id)
            .cloned()
            .collect())
    }

    async fn my_rsvps(&self) -> Result<Vec<Rsvp>> {
        self.gate("my_rsvps")?;
        Ok(self
            .rsvps
            .borrow()
            .iter()
            .filter(|r| r.user_id == self.viewer.id)
            .cloned()
            .collect())
    }
}

impl UsersApi for FakeApi {
    async fn all_users(&self) -> Result<Vec<UserSummary>> {
        self.gate("all_users")?;
        let mut users = vec![self.viewer.clone()];
        users.extend(self.users.borrow().iter().cloned());
        Ok(users)
    }

    async fn current_user(&self) -> Result<UserSummary> {
        self.gate("current_user")?;
        Ok(self.viewer.clone())
    }

    async fn user(&self, id: UserId) -> Result<UserSummary> {
        self.gate("user")?;
        if id == self.viewer.id {
            return Ok(self.viewer.clone());
        }
        self.users
            .borrow()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("user does not exist".into()))
    }

    async fn update_profile(&self, profile: &UpdateProfileRequest) -> Result<UserSummary> {
        self.gate("update_profile")?;
        let mut updated = self.viewer.clone();
        updated.display_name = profile.display_name.clone();
        updated.bio = profile.bio.clone();
        Ok(updated)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>> {
        self.gate("search_users")?;
        let needle = query.to_lowercase();
        Ok(self
            .users
            .borrow()
            .iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.display_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn follow(&self, id: UserId) -> Result<()> {
        self.gate("follow")?;
        let mut users = self.users.borrow_mut();
        let target = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ClientError::NotFound("user does not exist".into()))?;
        if target.is_following {
            return Err(ClientError::Validation("already following this user".into()));
        }
        target.is_following = true;
        target.followers_count += 1;
        Ok(())
    }

    async fn unfollow(&self, id: UserId) -> Result<()> {
        self.gate("unfollow")?;
        let mut users = self.users.borrow_mut();
        let target = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ClientError::NotFound("user does not exist".into()))?;
        if !target.is_following {
            return Err(ClientError::Validation("not following this user".into()));
        }
        target.is_following = false;
        target.followers_count = target.followers_count.saturating_sub(1);
        Ok(())
    }

    async fn followers(&self, _id: UserId) -> Result<Vec<UserSummary>> {
        self.gate("followers")?;
        Ok(Vec::new())
    }

    async fn following(&self, _id: UserId) -> Result<Vec<UserSummary>> {
        self.gate("following")?;
        Ok(self
            .users
            .borrow()
            .iter()
            .filter(|u| u.is_following)
            .cloned()
            .collect())
    }
}

pub(crate) fn viewer() -> UserSummary {
    UserSummary {
        id: UserId(1),
        username: "ada".into(),
        display_name: "Ada".into(),
        email: Some("ada@example.com".into()),
        bio: None,
        followers_count: 3,
        following_count: 5,
        is_following: false,
    }
}

pub(crate) fn user(id: UserId, username: &str, display_name: &str, followers: u32) -> UserSummary {
    UserSummary {
        id,
        username: username.into(),
        display_name: display_name.into(),
        email: None,
        bio: None,
        followers_count: followers,
        following_count: 0,
        is_following: false,
    }
}

pub(crate) fn event(id: EventId, title: &str, creator: UserId) -> EventSummary {
    EventSummary {
        id,
        title: title.into(),
        description: None,
        location: None,
        start_date_time: Utc.with_ymd_and_hms(2026, 9, 12, 18, 30, 0).unwrap(),
        end_date_time: None,
        creator_id: creator,
        creator_name: format!("User {creator}"),
        creator_username: format!("user{creator}"),
        is_public: true,
        going_count: 0,
        maybe_count: 0,
        not_going_count: 0,
        current_user_rsvp: None,
    }
}

pub(crate) fn rsvp(id: i64, event_id: EventId, user_id: UserId, status: RsvpStatus) -> Rsvp {
    Rsvp {
        id: RsvpId(id),
        event_id,
        user_id,
        display_name: format!("User {user_id}"),
        username: format!("user{user_id}"),
        status,
    }
}

pub(crate) fn sample_auth_response() -> AuthResponse {
    AuthResponse {
        token: "tok-1".into(),
        user: viewer(),
    }
}
