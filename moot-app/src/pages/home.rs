//! Landing page. No server data of its own; everything comes from the session.

use moot_client::CredentialStore;

use crate::session::SessionStore;

pub fn greeting<S: CredentialStore>(session: &SessionStore<S>) -> Option<String> {
    session
        .user()
        .map(|user| format!("Welcome, {}!", user.display_name))
}
