//! One view-model per page.
//!
//! Each page owns local state mirroring a slice of server data and updates it
//! either by reloading authoritative state after a mutation (RSVP, delete) or
//! by patching the local copy once the server confirms (follow/unfollow).
//! A failed call never changes page state.

pub mod create_event;
pub mod event_details;
pub mod events;
pub mod home;
pub mod profile;
pub mod search;

/// Proof that a load was started against the current incarnation of a page.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LoadToken(u64);

/// Guards against a response being applied after the user left the page.
///
/// A page hands out a [`LoadToken`] when a fetch starts; applying the result
/// requires the token to still be current. [`leave`](Lifecycle::leave)
/// invalidates every outstanding token. Starting a second load does *not*
/// invalidate the first: overlapping loads both land and the last response
/// wins, which is the documented race model.
#[derive(Debug, Default)]
pub struct Lifecycle {
    epoch: u64,
}

impl Lifecycle {
    pub fn begin(&self) -> LoadToken {
        LoadToken(self.epoch)
    }

    pub fn leave(&mut self) {
        self.epoch += 1;
    }

    pub fn accepts(&self, token: LoadToken) -> bool {
        self.epoch == token.0
    }
}

/// Feedback line surfaced by a page after an operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StatusMessage {
    Success(String),
    Error(String),
}
