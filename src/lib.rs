//! Wire-format types shared by the moot client and app layers.
//!
//! Everything here mirrors the JSON the event-planning API speaks: camelCase
//! field names, `GOING`/`MAYBE`/`NOT_GOING` status values, RFC 3339 timestamps.

pub mod requests;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone, Debug, Serialize, Deserialize, Default)]
pub struct UserId(pub i64);

#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone, Debug, Serialize, Deserialize, Default)]
pub struct EventId(pub i64);

#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone, Debug, Serialize, Deserialize, Default)]
pub struct RsvpId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for RsvpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Attendance answer for an event. At most one per (event, user) pair.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsvpStatus {
    Going,
    Maybe,
    NotGoing,
}

/// A user as seen by the current viewer.
///
/// `is_following` and the two counts are viewer-relative: they describe the
/// relationship between the authenticated caller and this user, not an
/// absolute property of the record.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub following_count: u32,
    #[serde(default)]
    pub is_following: bool,
}

/// An event as seen by the current viewer.
///
/// `current_user_rsvp` and the three counts move together as a unit: the
/// server recomputes them from the RSVP records on every read.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date_time: DateTime<Utc>,
    #[serde(default)]
    pub end_date_time: Option<DateTime<Utc>>,
    pub creator_id: UserId,
    pub creator_name: String,
    pub creator_username: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub going_count: u32,
    #[serde(default)]
    pub maybe_count: u32,
    #[serde(default)]
    pub not_going_count: u32,
    #[serde(default, rename = "currentUserRSVP")]
    pub current_user_rsvp: Option<RsvpStatus>,
}

impl EventSummary {
    pub fn is_creator(&self, viewer: UserId) -> bool {
        self.creator_id == viewer
    }

    /// Total number of answers reflected in the displayed counts.
    pub fn rsvp_total(&self) -> u32 {
        self.going_count + self.maybe_count + self.not_going_count
    }
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: RsvpId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub display_name: String,
    pub username: String,
    pub status: RsvpStatus,
}

/// Returned by the auth endpoints: the bearer token plus the signed-in identity.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}
