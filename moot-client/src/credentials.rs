//! Durable cache for the authenticated identity.
//!
//! A page reload (process restart) must restore the session without a
//! re-login, so the bearer token and the signed-in user are written through
//! [`CredentialStore`] on login and after every successful profile update.
//! The JSON file implementation replaces the file atomically
//! (write-to-temp, then rename) so a crash mid-write never corrupts it.

use std::fs;
use std::io;
use std::path::PathBuf;

use moot_common::UserSummary;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// The identity cached between runs.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: UserSummary,
}

/// Capability interface over whatever key-value backend holds the session.
pub trait CredentialStore {
    fn load(&self) -> Result<Option<StoredSession>>;
    fn save(&mut self, session: &StoredSession) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// File-backed store, one JSON document per client.
pub struct JsonFileCredentials {
    path: PathBuf,
}

impl JsonFileCredentials {
    /// Parent directories are created up front so `save` never has to.
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }
}

impl CredentialStore for JsonFileCredentials {
    fn load(&self) -> Result<Option<StoredSession>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let session = serde_json::from_str(&contents)
            .map_err(|err| ClientError::Storage(format!("failed to parse session file: {err}")))?;
        Ok(Some(session))
    }

    fn save(&mut self, session: &StoredSession) -> Result<()> {
        let contents = serde_json::to_string_pretty(session)
            .map_err(|err| ClientError::Storage(format!("failed to encode session: {err}")))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = ?self.path, "session persisted");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Volatile store for tests and for callers that opt out of persistence.
#[derive(Default)]
pub struct MemoryCredentials {
    session: Option<StoredSession>,
}

impl CredentialStore for MemoryCredentials {
    fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &StoredSession) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.session = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moot_common::UserId;

    fn sample_session() -> StoredSession {
        StoredSession {
            token: "tok-123".into(),
            user: UserSummary {
                id: UserId(1),
                username: "ada".into(),
                display_name: "Ada".into(),
                email: Some("ada@example.com".into()),
                bio: None,
                followers_count: 3,
                following_count: 5,
                is_following: false,
            },
        }
    }

    #[test]
    fn round_trips_through_disk() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = JsonFileCredentials::new(dir.path().join("session.json"))?;
        assert_eq!(store.load()?, None);

        store.save(&sample_session())?;
        assert_eq!(store.load()?, Some(sample_session()));
        Ok(())
    }

    #[test]
    fn clear_is_idempotent() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = JsonFileCredentials::new(dir.path().join("session.json"))?;
        store.save(&sample_session())?;
        store.clear()?;
        assert_eq!(store.load()?, None);
        // A second clear with nothing on disk is a no-op, not an error.
        store.clear()?;
        Ok(())
    }

    #[test]
    fn corrupted_file_surfaces_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonFileCredentials::new(path).unwrap();
        assert!(matches!(store.load(), Err(ClientError::Storage(_))));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("session.json");
        let mut store = JsonFileCredentials::new(nested).unwrap();
        store.save(&sample_session()).unwrap();
        assert!(store.load().unwrap().is_some());
    }
}
