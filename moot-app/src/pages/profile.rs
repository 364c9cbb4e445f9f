//! Profile page: view and edit the signed-in user.

use moot_client::{CredentialStore, Result, UsersApi};
use moot_common::requests::UpdateProfileRequest;
use moot_common::UserSummary;

use super::StatusMessage;
use crate::session::SessionStore;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProfileForm {
    pub display_name: String,
    pub bio: String,
}

impl ProfileForm {
    fn from_user(user: &UserSummary) -> Self {
        Self {
            display_name: user.display_name.clone(),
            bio: user.bio.clone().unwrap_or_default(),
        }
    }
}

#[derive(Default)]
pub struct ProfilePage {
    form: ProfileForm,
    editing: bool,
    saving: bool,
    message: Option<StatusMessage>,
}

impl ProfilePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    pub fn begin_edit(&mut self, user: &UserSummary) {
        self.form = ProfileForm::from_user(user);
        self.editing = true;
        self.message = None;
    }

    pub fn cancel(&mut self, user: &UserSummary) {
        self.form = ProfileForm::from_user(user);
        self.editing = false;
        self.message = None;
    }

    /// On success the updated identity flows through the session store (and
    /// from there back into persistent storage). On failure both the session
    /// and the form stay exactly as they were.
    pub async fn submit<A, S>(&mut self, api: &A, session: &mut SessionStore<S>) -> Result<()>
    where
        A: UsersApi,
        S: CredentialStore,
    {
        let request = UpdateProfileRequest {
            display_name: self.form.display_name.clone(),
            bio: if self.form.bio.trim().is_empty() {
                None
            } else {
                Some(self.form.bio.clone())
            },
        };
        self.saving = true;
        self.message = None;
        let result = api.update_profile(&request).await;
        self.saving = false;
        match result {
            Ok(updated) => {
                session.set_user(updated);
                self.editing = false;
                self.message = Some(StatusMessage::Success("Profile updated".into()));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile update failed");
                self.message = Some(StatusMessage::Error(err.to_string()));
                Err(err)
            }
        }
    }
}
