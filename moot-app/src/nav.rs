//! Navigation view-model. The bar only exists for authenticated sessions.

use moot_client::CredentialStore;

use crate::session::SessionStore;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: &'static str,
}

pub const LINKS: [NavLink; 4] = [
    NavLink {
        label: "Home",
        route: "/",
    },
    NavLink {
        label: "Events",
        route: "/events",
    },
    NavLink {
        label: "Find Friends",
        route: "/search",
    },
    NavLink {
        label: "Profile",
        route: "/profile",
    },
];

pub fn visible_links<S: CredentialStore>(session: &SessionStore<S>) -> &'static [NavLink] {
    if session.is_authenticated() {
        &LINKS
    } else {
        &[]
    }
}

pub fn signed_in_label<S: CredentialStore>(session: &SessionStore<S>) -> Option<&str> {
    session.user().map(|user| user.display_name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_auth_response, viewer, FakeApi};
    use moot_client::MemoryCredentials;
    use moot_common::requests::LoginRequest;

    #[tokio::test]
    async fn hidden_until_signed_in() -> anyhow::Result<()> {
        let api = FakeApi::new(viewer());
        api.set_auth_response(sample_auth_response());
        let mut session = SessionStore::new(MemoryCredentials::default());

        assert!(visible_links(&session).is_empty());
        assert_eq!(signed_in_label(&session), None);

        let request = LoginRequest {
            email: "ada@example.com".into(),
            password: "hunter2".into(),
        };
        session.login(&api, &request).await?;
        assert_eq!(visible_links(&session).len(), 4);
        assert_eq!(signed_in_label(&session), Some("Ada"));

        session.logout(&api)?;
        assert!(visible_links(&session).is_empty());
        Ok(())
    }
}
